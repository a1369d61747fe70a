//! Logging mailer — a [`Notifier`] that renders each notification as a
//! plain-text message and writes it to the tracing log.
//!
//! Stands in for an SMTP transport; deliveries always succeed.

use std::fmt::Write as _;
use std::future::Future;

use leavehub_domain::notification::{Notice, Notification};

use crate::ports::Notifier;

/// Renders notifications and logs them at `info`.
pub struct TracingMailer {
    sender: String,
}

impl TracingMailer {
    /// Create a mailer that signs messages as `sender`.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    /// Plain-text body for `notice`.
    #[must_use]
    pub fn render(&self, notice: &Notice) -> String {
        let application = notice.application();
        let mut body = String::new();
        let _ = writeln!(body, "Application ID: {}", application.id);
        let _ = writeln!(body, "Status: {}", application.status);
        let _ = writeln!(body, "Reason: {}", application.reason);
        if let Some(outcome) = &application.outcome_reason {
            let _ = writeln!(body, "Outcome: {outcome}");
        }

        match notice {
            Notice::Created { events, .. } | Notice::Updated { events, .. } => {
                let _ = writeln!(body, "Dates:");
                for event in events {
                    let _ = writeln!(
                        body,
                        "  {} {} at {}",
                        event.requested_date, event.application_hour, event.location
                    );
                }
            }
            Notice::ChangeRequested {
                original_events,
                proposed_events,
                ..
            } => {
                let _ = writeln!(body, "Current dates:");
                for event in original_events {
                    let _ = writeln!(body, "  {} {}", event.requested_date, event.application_hour);
                }
                let _ = writeln!(body, "Proposed dates:");
                for event in proposed_events {
                    let _ = writeln!(body, "  {} {}", event.requested_date, event.application_hour);
                }
            }
            Notice::EventWithdrawn { event, .. }
            | Notice::EventCancelRequested { event, .. }
            | Notice::CancelOneDecided { event, .. } => {
                let _ = writeln!(
                    body,
                    "Date: {} {}",
                    event.requested_date, event.application_hour
                );
            }
            Notice::Withdrawn { .. }
            | Notice::CancelRequested { .. }
            | Notice::Decided { .. }
            | Notice::CancelDecided { .. }
            | Notice::ChangeDecided { .. }
            | Notice::AutoRejected { .. } => {}
        }

        let _ = write!(body, "-- {}", self.sender);
        body
    }
}

impl Notifier for TracingMailer {
    fn send(&self, notification: Notification) -> impl Future<Output = bool> + Send {
        let subject = notification.notice.subject();
        let body = self.render(&notification.notice);
        for recipient in &notification.recipients {
            tracing::info!(
                from = %self.sender,
                to = %recipient.email,
                %subject,
                %body,
                "mail sent"
            );
        }
        async { true }
    }
}
