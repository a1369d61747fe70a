//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod application_repo;
pub mod employee_repo;
pub mod event_repo;
pub mod notifier;

pub use application_repo::ApplicationRepository;
pub use employee_repo::EmployeeRepository;
pub use event_repo::EventRepository;
pub use notifier::Notifier;
