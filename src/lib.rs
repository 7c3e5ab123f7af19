// Hospital Admission - Core Library
// Exposes billing, notifications and the admission flow for the console and tests

pub mod error;
pub mod patient;
pub mod billing;
pub mod notifications;
pub mod admission;
pub mod console;
pub mod screen;

// Re-export commonly used types
pub use error::{AdmissionError, AdmissionResult};
pub use patient::{Patient, PatientType};
pub use billing::{
    BillingCalculator, BillingPlan, BillingStrategy,
    insurance_billing, normal_billing,
};
pub use notifications::{
    Desk, Listener, NotificationEvent, NotificationHub, NotificationKind,
    register_desks,
};
pub use admission::{AdmissionRecord, AdmissionService, select_plan, DEFAULT_CURRENCY};
pub use console::{Console, ConsoleOptions, MenuChoice};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
