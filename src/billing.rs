// 💰 Billing Calculator - base charge by patient type + billing strategies
//
// The calculator knows the rate card and how to apply a strategy.
// It does NOT decide which strategy a patient gets; that is admission policy.

use crate::patient::PatientType;
use serde::Serialize;
use std::fmt;

// ============================================================================
// RATE CARD
// ============================================================================

pub const GENERAL_BASE_CHARGE: f64 = 2000.0;
pub const EMERGENCY_BASE_CHARGE: f64 = 5000.0;
pub const INSURANCE_BASE_CHARGE: f64 = 3000.0;

/// Insurance covers half of the base charge
pub const INSURANCE_COVERAGE_FACTOR: f64 = 0.5;

/// Normal billing adds an 18% surcharge
pub const NORMAL_SURCHARGE_FACTOR: f64 = 1.18;

// ============================================================================
// STRATEGIES
// ============================================================================

/// A billing strategy turns a base charge into the payable amount
pub type BillingStrategy = fn(f64) -> f64;

pub fn insurance_billing(amount: f64) -> f64 {
    amount * INSURANCE_COVERAGE_FACTOR
}

pub fn normal_billing(amount: f64) -> f64 {
    amount * NORMAL_SURCHARGE_FACTOR
}

/// Named handle for the two standard strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BillingPlan {
    Insurance,
    Normal,
}

impl BillingPlan {
    pub fn strategy(&self) -> BillingStrategy {
        match self {
            BillingPlan::Insurance => insurance_billing,
            BillingPlan::Normal => normal_billing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPlan::Insurance => "Insurance",
            BillingPlan::Normal => "Normal",
        }
    }
}

impl fmt::Display for BillingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BillingCalculator;

impl BillingCalculator {
    pub fn new() -> Self {
        BillingCalculator
    }

    /// Flat charge before any adjustment; depends on the type only
    pub fn base_charge(&self, patient_type: PatientType) -> f64 {
        match patient_type {
            PatientType::General => GENERAL_BASE_CHARGE,
            PatientType::Emergency => EMERGENCY_BASE_CHARGE,
            PatientType::Insurance => INSURANCE_BASE_CHARGE,
        }
    }

    pub fn apply_strategy<F>(&self, amount: f64, strategy: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        strategy(amount)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_charges() {
        let calc = BillingCalculator::new();

        assert_eq!(calc.base_charge(PatientType::General), 2000.0);
        assert_eq!(calc.base_charge(PatientType::Emergency), 5000.0);
        assert_eq!(calc.base_charge(PatientType::Insurance), 3000.0);
    }

    #[test]
    fn test_base_charge_is_deterministic() {
        let calc = BillingCalculator::new();
        for t in PatientType::ALL {
            assert_eq!(calc.base_charge(t), calc.base_charge(t));
        }
    }

    #[test]
    fn test_standard_strategies() {
        assert_eq!(insurance_billing(3000.0), 1500.0);
        assert_eq!(normal_billing(2000.0), 2360.0);
        assert_eq!(normal_billing(5000.0), 5900.0);
        assert_eq!(normal_billing(0.0), 0.0);
    }

    #[test]
    fn test_apply_strategy_accepts_closures() {
        let calc = BillingCalculator::new();
        let waiver = 250.0;

        assert_eq!(calc.apply_strategy(1000.0, |amount| amount - waiver), 750.0);
        assert_eq!(calc.apply_strategy(1000.0, BillingPlan::Insurance.strategy()), 500.0);
    }

    #[test]
    fn test_plan_names() {
        assert_eq!(BillingPlan::Insurance.to_string(), "Insurance");
        assert_eq!(BillingPlan::Normal.to_string(), "Normal");
    }

    proptest! {
        #[test]
        fn prop_normal_billing_adds_surcharge(x in 0.0f64..1.0e9) {
            prop_assert_eq!(normal_billing(x), x * 1.18);
        }

        #[test]
        fn prop_insurance_billing_halves(x in 0.0f64..1.0e9) {
            prop_assert_eq!(insurance_billing(x), x * 0.5);
        }

        #[test]
        fn prop_apply_strategy_is_plain_call(x in 0.0f64..1.0e9) {
            let calc = BillingCalculator::new();
            prop_assert_eq!(calc.apply_strategy(x, normal_billing), normal_billing(x));
            prop_assert_eq!(calc.apply_strategy(x, insurance_billing), insurance_billing(x));
        }
    }
}
