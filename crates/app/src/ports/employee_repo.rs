//! Employee repository port.

use std::future::Future;

use leavehub_domain::employee::Employee;
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::id::StaffId;

/// Repository for [`Employee`]s. The lifecycle core only reads from it.
pub trait EmployeeRepository {
    /// Persist a new employee.
    fn create(
        &self,
        employee: Employee,
    ) -> impl Future<Output = Result<Employee, LeaveHubError>> + Send;

    /// Get an employee by staff id.
    fn get_by_id(
        &self,
        staff_id: StaffId,
    ) -> impl Future<Output = Result<Option<Employee>, LeaveHubError>> + Send;

    /// Employees whose reporting manager is `manager_id`.
    fn find_by_manager(
        &self,
        manager_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Employee>, LeaveHubError>> + Send;
}
