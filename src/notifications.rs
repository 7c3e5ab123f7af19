// 📣 Notification Hub - fan out admission events to the desks
//
// Listeners are registered per event kind and called synchronously,
// in registration order. The hub keeps no business state.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::rc::Rc;
use tracing::debug;

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    PatientAdmitted,
    BillGenerated,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PatientAdmitted => "patient_admitted",
            NotificationKind::BillGenerated => "bill_generated",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event together with the text the listeners receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    PatientAdmitted(String),
    BillGenerated(String),
}

impl NotificationEvent {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationEvent::PatientAdmitted(_) => NotificationKind::PatientAdmitted,
            NotificationEvent::BillGenerated(_) => NotificationKind::BillGenerated,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            NotificationEvent::PatientAdmitted(message)
            | NotificationEvent::BillGenerated(message) => message,
        }
    }
}

// ============================================================================
// HUB
// ============================================================================

/// A listener receives the event message. An error stops the fan-out
/// and is handed back to whoever published.
pub type Listener = Box<dyn Fn(&str) -> Result<()>>;

#[derive(Default)]
pub struct NotificationHub {
    listeners: HashMap<NotificationKind, Vec<Listener>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        NotificationHub {
            listeners: HashMap::new(),
        }
    }

    /// Register a listener; it runs after every listener already registered for `kind`
    pub fn subscribe<F>(&mut self, kind: NotificationKind, listener: F)
    where
        F: Fn(&str) -> Result<()> + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    /// Call every listener for `kind` in order. No listeners is a no-op.
    pub fn publish(&self, kind: NotificationKind, message: &str) -> Result<()> {
        let listeners = match self.listeners.get(&kind) {
            Some(listeners) => listeners,
            None => {
                debug!(%kind, "no listeners registered");
                return Ok(());
            }
        };

        debug!(%kind, listeners = listeners.len(), "publishing notification");

        for listener in listeners {
            listener(message)?;
        }

        Ok(())
    }

    pub fn dispatch(&self, event: &NotificationEvent) -> Result<()> {
        self.publish(event.kind(), event.message())
    }

    pub fn listener_count(&self, kind: NotificationKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

// ============================================================================
// DESK LISTENERS
// ============================================================================

/// The two desks that watch admissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desk {
    Reception,
    Accounts,
}

impl Desk {
    pub fn prefix(&self) -> &'static str {
        match self {
            Desk::Reception => "[Reception]",
            Desk::Accounts => "[Accounts]",
        }
    }

    /// Which event this desk is subscribed to at startup
    pub fn watches(&self) -> NotificationKind {
        match self {
            Desk::Reception => NotificationKind::PatientAdmitted,
            Desk::Accounts => NotificationKind::BillGenerated,
        }
    }

    /// Listener that prints `"{prefix} {message}"` to the shared display
    pub fn listener<W>(self, display: Rc<RefCell<W>>) -> impl Fn(&str) -> Result<()>
    where
        W: Write + 'static,
    {
        move |message: &str| {
            let mut out = display.borrow_mut();
            writeln!(out, "{} {}", self.prefix(), message)
                .with_context(|| format!("{} could not print notification", self.prefix()))?;
            Ok(())
        }
    }
}

/// Subscribe the reception and accounts desks to their events
pub fn register_desks<W>(hub: &mut NotificationHub, display: Rc<RefCell<W>>)
where
    W: Write + 'static,
{
    for desk in [Desk::Reception, Desk::Accounts] {
        hub.subscribe(desk.watches(), desk.listener(Rc::clone(&display)));
    }
}

// ============================================================================
// TESTS
// ============================================================================
