//! # leavehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ApplicationRepository` — applications, including compare-and-set on status
//!   - `EventRepository` — dated occurrences and cancel-one markers
//!   - `EmployeeRepository` — staff and reporting lines
//!   - `Notifier` — best-effort delivery of lifecycle notices
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ApplicationService` — create, update, withdraw, decide, sweep
//!   - `EmployeeService` — register, get, list reports
//! - Provide **in-process infrastructure** that doesn't need IO: the
//!   auto-rejection `Sweeper` task and the logging `TracingMailer`
//!
//! ## Dependency rule
//! Depends on `leavehub-domain` only (plus `tokio` for the sweeper task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod mailer;
pub mod ports;
pub mod services;
pub mod sweeper;

#[cfg(test)]
mod test_support;
