//! `SQLite` implementation of [`EventRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use leavehub_app::ports::EventRepository;
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::event::Event;
use leavehub_domain::id::{ApplicationId, EventId};

use crate::codec::{format_date, parse, parse_optional};
use crate::error::StorageError;

struct Wrapper(Event);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let application_id: String = row.try_get("application_id")?;
        let requested_date: String = row.try_get("requested_date")?;
        let application_hour: String = row.try_get("application_hour")?;
        let original_event_id: Option<String> = row.try_get("original_event_id")?;

        Ok(Self(Event {
            id: parse(&id)?,
            application_id: parse(&application_id)?,
            requested_date: parse(&requested_date)?,
            application_hour: parse(&application_hour)?,
            location: row.try_get("location")?,
            original_event_id: parse_optional(original_event_id)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO events (id, application_id, requested_date, application_hour, location, original_event_id)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM events WHERE id = ?";
const SELECT_BY_APPLICATION: &str =
    "SELECT * FROM events WHERE application_id = ? ORDER BY requested_date, application_hour";
const SELECT_FIRST_BY_APPLICATION: &str =
    "SELECT * FROM events WHERE application_id = ? ORDER BY requested_date, application_hour LIMIT 1";
const SELECT_BY_ORIGINAL_EVENT: &str = "SELECT * FROM events WHERE original_event_id = ?";

const DELETE_BY_ID: &str = "DELETE FROM events WHERE id = ?";
const DELETE_BY_APPLICATION: &str = "DELETE FROM events WHERE application_id = ?";

/// `SQLite`-backed event repository.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: Event) -> Result<Event, LeaveHubError> {
        sqlx::query(INSERT)
            .bind(event.id.to_string())
            .bind(event.application_id.to_string())
            .bind(format_date(event.requested_date))
            .bind(event.application_hour.as_str())
            .bind(&event.location)
            .bind(event.original_event_id.map(|id| id.to_string()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(event)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, LeaveHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Event>, LeaveHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_APPLICATION)
            .bind(application_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_application_ids(
        &self,
        application_ids: Vec<ApplicationId>,
    ) -> Result<Vec<Event>, LeaveHubError> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM events WHERE application_id IN (");
        let mut separated = builder.separated(", ");
        for id in &application_ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(") ORDER BY requested_date");

        let rows: Vec<Wrapper> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_first_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<Event>, LeaveHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_FIRST_BY_APPLICATION)
            .bind(application_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_by_original_event_id(
        &self,
        original_event_id: EventId,
    ) -> Result<Vec<Event>, LeaveHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ORIGINAL_EVENT)
            .bind(original_event_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: EventId) -> Result<(), LeaveHubError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> Result<(), LeaveHubError> {
        sqlx::query(DELETE_BY_APPLICATION)
            .bind(application_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
