//! `SQLite` implementation of [`ApplicationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use leavehub_app::ports::ApplicationRepository;
use leavehub_domain::application::{Application, ApplicationState, ApplicationStatus};
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::id::{ApplicationId, StaffId};
use leavehub_domain::time::now;

use crate::codec::{format_date, format_timestamp, parse, parse_optional, parse_timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Application);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let staff_id: i64 = row.try_get("staff_id")?;
        let approver_id: Option<i64> = row.try_get("approver_id")?;
        let status: String = row.try_get("status")?;
        let application_state: Option<String> = row.try_get("application_state")?;
        let original_application_id: Option<String> = row.try_get("original_application_id")?;
        let recurrence_type: Option<String> = row.try_get("recurrence_type")?;
        let end_date: Option<String> = row.try_get("end_date")?;
        let created_on: String = row.try_get("created_on")?;
        let last_updated_on: String = row.try_get("last_updated_on")?;

        Ok(Self(Application {
            id: parse(&id)?,
            staff_id: StaffId::new(staff_id),
            approver_id: approver_id.map(StaffId::new),
            reason: row.try_get("reason")?,
            description: row.try_get("description")?,
            status: parse(&status)?,
            application_state: parse_optional(application_state)?,
            original_application_id: parse_optional(original_application_id)?,
            outcome_reason: row.try_get("outcome_reason")?,
            recurring: row.try_get("recurring")?,
            recurrence_type: parse_optional(recurrence_type)?,
            end_date: parse_optional(end_date)?,
            created_on: parse_timestamp(&created_on)?,
            last_updated_on: parse_timestamp(&last_updated_on)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO applications (
        id, staff_id, approver_id, reason, description, status, application_state,
        original_application_id, outcome_reason, recurring, recurrence_type, end_date,
        created_on, last_updated_on
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM applications WHERE id = ?";
const SELECT_BY_STAFF: &str =
    "SELECT * FROM applications WHERE staff_id = ? ORDER BY created_on DESC";
const SELECT_BY_APPROVER: &str =
    "SELECT * FROM applications WHERE approver_id = ? ORDER BY created_on DESC";
const SELECT_BY_STATUS: &str =
    "SELECT * FROM applications WHERE status = ? ORDER BY created_on DESC";

const UPDATE_PENDING: &str = r"
    UPDATE applications
    SET reason = ?, description = ?, recurring = ?, recurrence_type = ?, end_date = ?,
        last_updated_on = ?
    WHERE id = ? AND status = ?
";

const UPDATE_STATUS: &str = r"
    UPDATE applications
    SET status = ?, outcome_reason = ?, last_updated_on = ?
    WHERE id = ?
";

const UPDATE_STATE: &str = r"
    UPDATE applications
    SET application_state = ?, outcome_reason = ?, status = ?, last_updated_on = ?
    WHERE id = ?
";

const COMPARE_AND_SET_STATUS: &str = r"
    UPDATE applications
    SET status = ?, outcome_reason = ?, last_updated_on = ?
    WHERE id = ? AND status = ?
";

const DELETE_BY_ID: &str = "DELETE FROM applications WHERE id = ?";

/// `SQLite`-backed application repository.
pub struct SqliteApplicationRepository {
    pool: SqlitePool,
}

impl SqliteApplicationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_list(
        &self,
        query: &'static str,
        value: i64,
    ) -> Result<Vec<Application>, LeaveHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

impl ApplicationRepository for SqliteApplicationRepository {
    async fn create(&self, application: Application) -> Result<Application, LeaveHubError> {
        sqlx::query(INSERT)
            .bind(application.id.to_string())
            .bind(application.staff_id.get())
            .bind(application.approver_id.map(StaffId::get))
            .bind(&application.reason)
            .bind(&application.description)
            .bind(application.status.as_str())
            .bind(application.application_state.map(ApplicationState::as_str))
            .bind(application.original_application_id.map(|id| id.to_string()))
            .bind(&application.outcome_reason)
            .bind(application.recurring)
            .bind(application.recurrence_type.map(|r| r.as_str()))
            .bind(application.end_date.map(format_date))
            .bind(format_timestamp(application.created_on))
            .bind(format_timestamp(application.last_updated_on))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(application)
    }

    async fn get_by_id(&self, id: ApplicationId) -> Result<Option<Application>, LeaveHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_by_staff_id(&self, staff_id: StaffId) -> Result<Vec<Application>, LeaveHubError> {
        self.fetch_list(SELECT_BY_STAFF, staff_id.get()).await
    }

    async fn find_by_approver_id(
        &self,
        approver_id: StaffId,
    ) -> Result<Vec<Application>, LeaveHubError> {
        self.fetch_list(SELECT_BY_APPROVER, approver_id.get()).await
    }

    async fn find_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, LeaveHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_STATUS)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update_pending(&self, application: &Application) -> Result<bool, LeaveHubError> {
        let result = sqlx::query(UPDATE_PENDING)
            .bind(&application.reason)
            .bind(&application.description)
            .bind(application.recurring)
            .bind(application.recurrence_type.map(|r| r.as_str()))
            .bind(application.end_date.map(format_date))
            .bind(format_timestamp(application.last_updated_on))
            .bind(application.id.to_string())
            .bind(ApplicationStatus::Pending.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> Result<(), LeaveHubError> {
        sqlx::query(UPDATE_STATUS)
            .bind(status.as_str())
            .bind(outcome_reason)
            .bind(format_timestamp(now()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn update_state(
        &self,
        id: ApplicationId,
        state: Option<ApplicationState>,
        outcome_reason: Option<String>,
        status: ApplicationStatus,
    ) -> Result<(), LeaveHubError> {
        sqlx::query(UPDATE_STATE)
            .bind(state.map(ApplicationState::as_str))
            .bind(outcome_reason)
            .bind(status.as_str())
            .bind(format_timestamp(now()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn compare_and_set_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> Result<bool, LeaveHubError> {
        let result = sqlx::query(COMPARE_AND_SET_STATUS)
            .bind(status.as_str())
            .bind(outcome_reason)
            .bind(format_timestamp(now()))
            .bind(id.to_string())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), LeaveHubError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
