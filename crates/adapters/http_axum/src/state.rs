//! Shared application state for axum handlers.

use std::sync::Arc;

use leavehub_app::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use leavehub_app::services::application_service::ApplicationService;
use leavehub_app::services::employee_service::EmployeeService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and notifier types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types need not be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<AR, EVR, EMR, N> {
    /// Application lifecycle service.
    pub application_service: Arc<ApplicationService<AR, EVR, EMR, N>>,
    /// Staff directory service.
    pub employee_service: Arc<EmployeeService<EMR>>,
}

impl<AR, EVR, EMR, N> Clone for AppState<AR, EVR, EMR, N> {
    fn clone(&self) -> Self {
        Self {
            application_service: Arc::clone(&self.application_service),
            employee_service: Arc::clone(&self.employee_service),
        }
    }
}

impl<AR, EVR, EMR, N> AppState<AR, EVR, EMR, N>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        application_service: ApplicationService<AR, EVR, EMR, N>,
        employee_service: EmployeeService<EMR>,
    ) -> Self {
        Self {
            application_service: Arc::new(application_service),
            employee_service: Arc::new(employee_service),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the application service is shared with the sweeper
    /// before constructing the HTTP state.
    pub fn from_arcs(
        application_service: Arc<ApplicationService<AR, EVR, EMR, N>>,
        employee_service: Arc<EmployeeService<EMR>>,
    ) -> Self {
        Self {
            application_service,
            employee_service,
        }
    }
}
