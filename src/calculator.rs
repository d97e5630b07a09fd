// 🧮 Bill Split Calculator
// Raw form text in, tip / grand total / per-person share out.
// Invalid input never errors: it falls back to a default value.

use serde::{Deserialize, Serialize};

use crate::tips::TipSelection;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Check amount used when the amount field does not parse
pub const DEFAULT_CHECK_AMOUNT: f64 = 0.0;

/// People count used when the people field does not parse
pub const DEFAULT_PEOPLE_COUNT: f64 = 1.0;

/// Smallest people count the per-person division will use
pub const MIN_PEOPLE_COUNT: f64 = 1.0;

/// Largest check amount magnitude accepted. Adding the biggest tip (25%)
/// to anything larger could overflow the grand total.
pub const MAX_CHECK_AMOUNT: f64 = f64::MAX / 1.3;

// ============================================================================
// PARSING
// ============================================================================

/// Parse decimal text, treating non-finite values as unparseable
fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the check amount field. Anything unparseable is `0`, as is any
/// amount beyond [`MAX_CHECK_AMOUNT`].
///
/// Negative amounts are accepted as typed.
pub fn parse_check_amount(text: &str) -> f64 {
    parse_decimal(text)
        .filter(|amount| amount.abs() <= MAX_CHECK_AMOUNT)
        .unwrap_or(DEFAULT_CHECK_AMOUNT)
}

/// Parse the people field. Anything unparseable is `1`, and any parsed
/// value below `1` (a literal `"0"`, `"0.5"`, negatives) is clamped to `1`.
pub fn parse_people_count(text: &str) -> f64 {
    parse_decimal(text)
        .map(|count| count.max(MIN_PEOPLE_COUNT))
        .unwrap_or(DEFAULT_PEOPLE_COUNT)
}

// ============================================================================
// INPUTS & TOTALS
// ============================================================================

/// Inputs after parsing and defaulting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillInputs {
    pub check_amount: f64,
    pub people_count: f64,
    pub tip: TipSelection,
}

/// The three values shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedTotals {
    pub tip_amount: f64,
    pub grand_total: f64,
    pub per_person_amount: f64,
}

impl BillInputs {
    pub fn parse(check_amount_text: &str, people_count_text: &str, tip: TipSelection) -> Self {
        BillInputs {
            check_amount: parse_check_amount(check_amount_text),
            people_count: parse_people_count(people_count_text),
            tip,
        }
    }

    fn tip_percentage(&self) -> f64 {
        f64::from(self.tip.percentage())
    }

    pub fn tip_amount(&self) -> f64 {
        self.check_amount / 100.0 * self.tip_percentage()
    }

    pub fn grand_total(&self) -> f64 {
        self.check_amount + self.check_amount / 100.0 * self.tip_percentage()
    }

    pub fn per_person_amount(&self) -> f64 {
        (self.check_amount + self.check_amount / 100.0 * self.tip_percentage()) / self.people_count
    }

    pub fn totals(&self) -> DerivedTotals {
        DerivedTotals {
            tip_amount: self.tip_amount(),
            grand_total: self.grand_total(),
            per_person_amount: self.per_person_amount(),
        }
    }
}

/// Compute the split straight from the raw field values.
///
/// Pure: safe to call on every keystroke.
pub fn calculate(check_amount_text: &str, people_count_text: &str, tip: TipSelection) -> DerivedTotals {
    BillInputs::parse(check_amount_text, people_count_text, tip).totals()
}

// ============================================================================
// TESTS
// ============================================================================
