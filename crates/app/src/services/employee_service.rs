//! Employee service — use-cases for the staff directory.

use leavehub_domain::employee::Employee;
use leavehub_domain::error::{ConflictError, LeaveHubError, NotFoundError};
use leavehub_domain::id::StaffId;

use crate::ports::EmployeeRepository;

/// Application service for employee records and reporting lines.
pub struct EmployeeService<R> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register an employee after validating domain invariants.
    ///
    /// A reporting manager other than the employee themself must already
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::Validation`] if invariants fail,
    /// [`LeaveHubError::Conflict`] when the staff id is taken,
    /// [`LeaveHubError::NotFound`] when the manager is unknown, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, employee), fields(staff_id = %employee.staff_id))]
    pub async fn create_employee(&self, employee: Employee) -> Result<Employee, LeaveHubError> {
        employee.validate()?;
        if self.repo.get_by_id(employee.staff_id).await?.is_some() {
            return Err(ConflictError::EmployeeExists(employee.staff_id.to_string()).into());
        }
        if let Some(manager) = employee.reporting_manager
            && manager != employee.staff_id
        {
            self.get_employee_as("Manager", manager).await?;
        }
        self.repo.create(employee).await
    }

    /// Look up an employee by staff id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::NotFound`] when no employee with `staff_id`
    /// exists, or a storage error from the repository.
    pub async fn get_employee(&self, staff_id: StaffId) -> Result<Employee, LeaveHubError> {
        self.get_employee_as("Employee", staff_id).await
    }

    /// Direct reports of `manager_id`, ordered by staff id.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::NotFound`] when the manager does not exist,
    /// or a storage error from the repository.
    pub async fn get_employees_under_manager(
        &self,
        manager_id: StaffId,
    ) -> Result<Vec<Employee>, LeaveHubError> {
        self.get_employee_as("Manager", manager_id).await?;
        let reports = self.repo.find_by_manager(manager_id).await?;
        Ok(reports
            .into_iter()
            .filter(|employee| employee.staff_id != manager_id)
            .collect())
    }

    async fn get_employee_as(
        &self,
        entity: &'static str,
        staff_id: StaffId,
    ) -> Result<Employee, LeaveHubError> {
        self.repo.get_by_id(staff_id).await?.ok_or_else(|| {
            NotFoundError {
                entity,
                id: staff_id.to_string(),
            }
            .into()
        })
    }
}
