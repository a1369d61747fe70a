//! In-memory port fakes shared by the service tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

use leavehub_domain::application::{Application, ApplicationState, ApplicationStatus};
use leavehub_domain::employee::Employee;
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::event::Event;
use leavehub_domain::id::{ApplicationId, EventId, StaffId};
use leavehub_domain::notification::Notification;

use crate::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};

#[derive(Default)]
struct Tables {
    applications: HashMap<ApplicationId, Application>,
    events: HashMap<EventId, Event>,
    employees: HashMap<StaffId, Employee>,
    failing_status_writes: HashSet<ApplicationId>,
}

/// One shared store backing every repository port.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            for employee in employees {
                tables.employees.insert(employee.staff_id, employee);
            }
        }
        store
    }

    /// Insert an application as-is, bypassing the service.
    pub fn seed_application(&self, application: Application, events: Vec<Event>) {
        let mut tables = self.tables.lock().unwrap();
        for event in events {
            tables.events.insert(event.id, event);
        }
        tables.applications.insert(application.id, application);
    }

    pub fn application(&self, id: ApplicationId) -> Option<Application> {
        self.tables.lock().unwrap().applications.get(&id).cloned()
    }

    pub fn event(&self, id: EventId) -> Option<Event> {
        self.tables.lock().unwrap().events.get(&id).cloned()
    }

    pub fn events_of(&self, id: ApplicationId) -> Vec<Event> {
        let tables = self.tables.lock().unwrap();
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| e.application_id == id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.requested_date);
        events
    }

    pub fn application_count(&self) -> usize {
        self.tables.lock().unwrap().applications.len()
    }

    /// Make every status write to `id` fail with a storage error.
    pub fn fail_status_writes_for(&self, id: ApplicationId) {
        self.tables.lock().unwrap().failing_status_writes.insert(id);
    }
}

fn injected_failure() -> LeaveHubError {
    LeaveHubError::Storage(Box::new(std::io::Error::other("injected failure")))
}

fn newest_first(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(|a, b| b.created_on.cmp(&a.created_on));
    applications
}

impl ApplicationRepository for InMemoryStore {
    fn create(
        &self,
        application: Application,
    ) -> impl Future<Output = Result<Application, LeaveHubError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables
            .applications
            .insert(application.id, application.clone());
        async { Ok(application) }
    }

    fn get_by_id(
        &self,
        id: ApplicationId,
    ) -> impl Future<Output = Result<Option<Application>, LeaveHubError>> + Send {
        let result = self.application(id);
        async { Ok(result) }
    }

    fn find_by_staff_id(
        &self,
        staff_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<_> = tables
            .applications
            .values()
            .filter(|a| a.staff_id == staff_id)
            .cloned()
            .collect();
        async { Ok(newest_first(result)) }
    }

    fn find_by_approver_id(
        &self,
        approver_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<_> = tables
            .applications
            .values()
            .filter(|a| a.approver_id == Some(approver_id))
            .cloned()
            .collect();
        async { Ok(newest_first(result)) }
    }

    fn find_by_status(
        &self,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<_> = tables
            .applications
            .values()
            .filter(|a| a.status == status)
            .cloned()
            .collect();
        async { Ok(newest_first(result)) }
    }

    fn update_pending(
        &self,
        application: &Application,
    ) -> impl Future<Output = Result<bool, LeaveHubError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let updated = match tables.applications.get_mut(&application.id) {
            Some(stored) if stored.is_pending() => {
                stored.reason.clone_from(&application.reason);
                stored.description.clone_from(&application.description);
                stored.recurring = application.recurring;
                stored.recurrence_type = application.recurrence_type;
                stored.end_date = application.end_date;
                stored.last_updated_on = application.last_updated_on;
                true
            }
            _ => false,
        };
        async move { Ok(updated) }
    }

    fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.failing_status_writes.contains(&id) {
            Err(injected_failure())
        } else {
            if let Some(app) = tables.applications.get_mut(&id) {
                app.status = status;
                app.outcome_reason = outcome_reason;
            }
            Ok(())
        };
        async { result }
    }

    fn update_state(
        &self,
        id: ApplicationId,
        state: Option<ApplicationState>,
        outcome_reason: Option<String>,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.failing_status_writes.contains(&id) {
            Err(injected_failure())
        } else {
            if let Some(app) = tables.applications.get_mut(&id) {
                app.application_state = state;
                app.outcome_reason = outcome_reason;
                app.status = status;
            }
            Ok(())
        };
        async { result }
    }

    fn compare_and_set_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> impl Future<Output = Result<bool, LeaveHubError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.failing_status_writes.contains(&id) {
            Err(injected_failure())
        } else {
            match tables.applications.get_mut(&id) {
                Some(app) if app.status == expected => {
                    app.status = status;
                    app.outcome_reason = outcome_reason;
                    Ok(true)
                }
                _ => Ok(false),
            }
        };
        async { result }
    }

    fn delete(&self, id: ApplicationId) -> impl Future<Output = Result<(), LeaveHubError>> + Send {
        self.tables.lock().unwrap().applications.remove(&id);
        async { Ok(()) }
    }
}

impl EventRepository for InMemoryStore {
    fn create(&self, event: Event) -> impl Future<Output = Result<Event, LeaveHubError>> + Send {
        self.tables
            .lock()
            .unwrap()
            .events
            .insert(event.id, event.clone());
        async { Ok(event) }
    }

    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, LeaveHubError>> + Send {
        let result = self.event(id);
        async { Ok(result) }
    }

    fn find_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send {
        let result = self.events_of(application_id);
        async { Ok(result) }
    }

    fn find_by_application_ids(
        &self,
        application_ids: Vec<ApplicationId>,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let mut result: Vec<Event> = tables
            .events
            .values()
            .filter(|e| application_ids.contains(&e.application_id))
            .cloned()
            .collect();
        result.sort_by_key(|e| e.requested_date);
        async { Ok(result) }
    }

    fn find_first_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<Option<Event>, LeaveHubError>> + Send {
        let result = self.events_of(application_id).into_iter().next();
        async { Ok(result) }
    }

    fn find_by_original_event_id(
        &self,
        original_event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Event> = tables
            .events
            .values()
            .filter(|e| e.original_event_id == Some(original_event_id))
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn delete(&self, id: EventId) -> impl Future<Output = Result<(), LeaveHubError>> + Send {
        self.tables.lock().unwrap().events.remove(&id);
        async { Ok(()) }
    }

    fn delete_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send {
        self.tables
            .lock()
            .unwrap()
            .events
            .retain(|_, e| e.application_id != application_id);
        async { Ok(()) }
    }
}

impl EmployeeRepository for InMemoryStore {
    fn create(
        &self,
        employee: Employee,
    ) -> impl Future<Output = Result<Employee, LeaveHubError>> + Send {
        self.tables
            .lock()
            .unwrap()
            .employees
            .insert(employee.staff_id, employee.clone());
        async { Ok(employee) }
    }

    fn get_by_id(
        &self,
        staff_id: StaffId,
    ) -> impl Future<Output = Result<Option<Employee>, LeaveHubError>> + Send {
        let result = self.tables.lock().unwrap().employees.get(&staff_id).cloned();
        async { Ok(result) }
    }

    fn find_by_manager(
        &self,
        manager_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Employee>, LeaveHubError>> + Send {
        let tables = self.tables.lock().unwrap();
        let mut result: Vec<Employee> = tables
            .employees
            .values()
            .filter(|e| e.reporting_manager == Some(manager_id))
            .cloned()
            .collect();
        result.sort_by_key(|e| e.staff_id);
        async { Ok(result) }
    }
}

/// Notifier that records everything it is asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    failing: bool,
}

impl RecordingNotifier {
    /// A notifier whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, notification: Notification) -> impl Future<Output = bool> + Send {
        self.sent.lock().unwrap().push(notification);
        let delivered = !self.failing;
        async move { delivered }
    }
}
