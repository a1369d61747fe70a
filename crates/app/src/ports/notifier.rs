//! Notifier port — delivers human-readable messages about lifecycle outcomes.

use std::future::Future;

use leavehub_domain::notification::Notification;

/// Sends notifications. Delivery is best-effort.
///
/// Implementations report failure through the returned flag and never
/// propagate an error: a committed transition stays committed even when the
/// accompanying message could not be sent.
pub trait Notifier {
    fn send(&self, notification: Notification) -> impl Future<Output = bool> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn send(&self, notification: Notification) -> impl Future<Output = bool> + Send {
        (**self).send(notification)
    }
}
