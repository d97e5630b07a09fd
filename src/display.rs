// Display formatting for derived totals.
// Every host (TUI, CLI, API) renders money through here.

use crate::calculator::DerivedTotals;

/// Two decimals with a currency symbol prefix. Negatives render as `-$5.00`.
pub fn format_money(symbol: &str, value: f64) -> String {
    // -0.004 would otherwise print as "-$0.00"
    let rounded = (value * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-{}{:.2}", symbol, -rounded)
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Formatted strings for each of the three totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub tip: String,
    pub grand_total: String,
    pub per_person: String,
}

impl TotalsView {
    pub fn new(totals: &DerivedTotals, symbol: &str) -> Self {
        TotalsView {
            tip: format_money(symbol, totals.tip_amount),
            grand_total: format_money(symbol, totals.grand_total),
            per_person: format_money(symbol, totals.per_person_amount),
        }
    }

    /// Label/value pairs in the order the form shows them
    pub fn lines(&self) -> [(&'static str, &str); 3] {
        [
            ("Tip", self.tip.as_str()),
            ("Grand total", self.grand_total.as_str()),
            ("Amount per person", self.per_person.as_str()),
        ]
    }
}
