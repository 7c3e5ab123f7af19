// 🧑‍⚕️ Patient - who is being admitted
//
// A Patient is a value: built once at admission, never mutated,
// dropped when the admission flow is done.

use crate::error::{AdmissionError, AdmissionResult};
use serde::Serialize;
use std::fmt;

// ============================================================================
// PATIENT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatientType {
    /// Walk-in / outpatient admission
    General,

    /// Admitted through the emergency desk
    Emergency,

    /// Covered by a health insurance plan
    Insurance,
}

impl PatientType {
    pub const ALL: [PatientType; 3] = [
        PatientType::General,
        PatientType::Emergency,
        PatientType::Insurance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientType::General => "General",
            PatientType::Emergency => "Emergency",
            PatientType::Insurance => "Insurance",
        }
    }

    /// Menu number shown to the operator (1-based)
    pub fn selector(&self) -> i64 {
        match self {
            PatientType::General => 1,
            PatientType::Emergency => 2,
            PatientType::Insurance => 3,
        }
    }

    /// Map a menu number back to a type
    pub fn from_selector(choice: i64) -> AdmissionResult<Self> {
        PatientType::ALL
            .iter()
            .copied()
            .find(|t| t.selector() == choice)
            .ok_or(AdmissionError::InvalidSelection {
                what: "patient type",
                choice,
            })
    }
}

impl fmt::Display for PatientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PATIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    id: i64,
    name: String,
    patient_type: PatientType,
}

impl Patient {
    /// The id is whatever the operator typed; uniqueness is not checked.
    pub fn new(id: i64, name: impl Into<String>, patient_type: PatientType) -> Self {
        Patient {
            id,
            name: name.into(),
            patient_type,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patient_type(&self) -> PatientType {
        self.patient_type
    }
}

// ============================================================================
// TESTS
// ============================================================================
