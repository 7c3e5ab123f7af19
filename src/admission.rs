// 🏥 Admission Service - admit, bill, notify
//
// One admission = two steps:
//   1. Admit -> PatientAdmitted("Patient {name} admitted.")
//   2. Bill  -> base charge, strategy, BillGenerated("Final bill for {name} is {currency}{final}")
// Nothing is kept between admissions.

use crate::billing::{BillingCalculator, BillingPlan};
use crate::notifications::{NotificationEvent, NotificationHub};
use crate::patient::{Patient, PatientType};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_CURRENCY: &str = "Rs.";

/// Insurance patients get insurance billing; everyone else pays the surcharge
pub fn select_plan(patient_type: PatientType) -> BillingPlan {
    match patient_type {
        PatientType::Insurance => BillingPlan::Insurance,
        PatientType::General | PatientType::Emergency => BillingPlan::Normal,
    }
}

// ============================================================================
// ADMISSION RECORD
// ============================================================================

/// Outcome of one admission, handed back to the console
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionRecord {
    pub admission_id: Uuid,
    pub patient: Patient,
    pub base_charge: f64,
    pub plan: BillingPlan,
    pub final_amount: f64,
    pub admitted_at: DateTime<Utc>,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct AdmissionService {
    hub: NotificationHub,
    calculator: BillingCalculator,
    currency: String,
}

impl AdmissionService {
    pub fn new(hub: NotificationHub) -> Self {
        Self::with_currency(hub, DEFAULT_CURRENCY)
    }

    pub fn with_currency(hub: NotificationHub, currency: impl Into<String>) -> Self {
        AdmissionService {
            hub,
            calculator: BillingCalculator::new(),
            currency: currency.into(),
        }
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Step 1: announce the admission
    pub fn announce_admission(&self, patient: &Patient) -> Result<()> {
        let event =
            NotificationEvent::PatientAdmitted(format!("Patient {} admitted.", patient.name()));
        self.hub.dispatch(&event)
    }

    /// Step 2: compute the final bill and announce it. Returns (base, plan, final).
    pub fn generate_bill(&self, patient: &Patient) -> Result<(f64, BillingPlan, f64)> {
        let base = self.calculator.base_charge(patient.patient_type());
        let plan = select_plan(patient.patient_type());
        let final_amount = self.calculator.apply_strategy(base, plan.strategy());

        let event = NotificationEvent::BillGenerated(format!(
            "Final bill for {} is {}{}",
            patient.name(),
            self.currency,
            final_amount
        ));
        self.hub.dispatch(&event)?;

        Ok((base, plan, final_amount))
    }

    /// Run both steps and return the full record
    pub fn admit(&self, patient: Patient) -> Result<AdmissionRecord> {
        self.announce_admission(&patient)?;
        let (base_charge, plan, final_amount) = self.generate_bill(&patient)?;

        info!(
            patient_id = patient.id(),
            patient_type = %patient.patient_type(),
            base_charge,
            %plan,
            final_amount,
            "admission processed"
        );

        Ok(AdmissionRecord {
            admission_id: Uuid::new_v4(),
            patient,
            base_charge,
            plan,
            final_amount,
            admitted_at: Utc::now(),
        })
    }

    /// Admit and bill a patient, returning the final amount payable
    pub fn process_admission(&self, patient: Patient) -> Result<f64> {
        Ok(self.admit(patient)?.final_amount)
    }
}

// ============================================================================
// TESTS
// ============================================================================
