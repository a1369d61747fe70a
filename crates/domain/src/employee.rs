//! Employee — the applicant or manager behind an application.
//!
//! The lifecycle core only reads employees: to resolve the approver of a
//! new application, to route notifications and to decide whether an editor
//! is the owner or the owner's reporting manager.

use serde::{Deserialize, Serialize};

use crate::error::{LeaveHubError, ValidationError};
use crate::id::StaffId;

/// A member of staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub staff_id: StaffId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub reporting_manager: Option<StaffId>,
}

impl Employee {
    /// Create a builder for constructing an [`Employee`].
    #[must_use]
    pub fn builder() -> EmployeeBuilder {
        EmployeeBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::Validation`] when the name or email is empty.
    pub fn validate(&self) -> Result<(), LeaveHubError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "first_name",
                value: self.first_name.clone(),
            }
            .into());
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidValue {
                field: "email",
                value: self.email.clone(),
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether `staff_id` is this employee's reporting manager.
    #[must_use]
    pub fn is_managed_by(&self, staff_id: StaffId) -> bool {
        self.reporting_manager == Some(staff_id)
    }
}

/// Step-by-step builder for [`Employee`].
#[derive(Debug, Default)]
pub struct EmployeeBuilder {
    staff_id: Option<StaffId>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    reporting_manager: Option<StaffId>,
}

impl EmployeeBuilder {
    #[must_use]
    pub fn staff_id(mut self, staff_id: impl Into<StaffId>) -> Self {
        self.staff_id = Some(staff_id.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn reporting_manager(mut self, manager: impl Into<StaffId>) -> Self {
        self.reporting_manager = Some(manager.into());
        self
    }

    /// Consume the builder, validate, and return an [`Employee`].
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::Validation`] if `staff_id` is missing or a
    /// field is invalid.
    pub fn build(self) -> Result<Employee, LeaveHubError> {
        let staff_id = self.staff_id.ok_or(ValidationError::InvalidValue {
            field: "staff_id",
            value: String::new(),
        })?;
        let employee = Employee {
            staff_id,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            reporting_manager: self.reporting_manager,
        };
        employee.validate()?;
        Ok(employee)
    }
}
