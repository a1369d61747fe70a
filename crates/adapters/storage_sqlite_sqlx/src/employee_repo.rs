//! `SQLite` implementation of [`EmployeeRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use leavehub_app::ports::EmployeeRepository;
use leavehub_domain::employee::Employee;
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::id::StaffId;

use crate::error::StorageError;

struct Wrapper(Employee);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let staff_id: i64 = row.try_get("staff_id")?;
        let reporting_manager: Option<i64> = row.try_get("reporting_manager")?;

        Ok(Self(Employee {
            staff_id: StaffId::new(staff_id),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            reporting_manager: reporting_manager.map(StaffId::new),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO employees (staff_id, first_name, last_name, email, reporting_manager)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM employees WHERE staff_id = ?";
const SELECT_BY_MANAGER: &str =
    "SELECT * FROM employees WHERE reporting_manager = ? ORDER BY staff_id";

/// `SQLite`-backed employee repository.
pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository {
    async fn create(&self, employee: Employee) -> Result<Employee, LeaveHubError> {
        sqlx::query(INSERT)
            .bind(employee.staff_id.get())
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.email)
            .bind(employee.reporting_manager.map(StaffId::get))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(employee)
    }

    async fn get_by_id(&self, staff_id: StaffId) -> Result<Option<Employee>, LeaveHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(staff_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_by_manager(&self, manager_id: StaffId) -> Result<Vec<Employee>, LeaveHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_MANAGER)
            .bind(manager_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
