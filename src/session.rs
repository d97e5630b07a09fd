// 🔁 Split Session - the form state owned by a host UI
// Holds the three raw inputs and recomputes totals after every change.

use tracing::{debug, trace};

use crate::calculator::{calculate, DerivedTotals};
use crate::tips::TipSelection;

#[derive(Debug, Clone)]
pub struct SplitSession {
    check_amount: String,
    people_count: String,
    tip: TipSelection,
    default_tip: TipSelection,
    totals: DerivedTotals,
}

impl SplitSession {
    /// Fresh session with empty fields and `tip` selected
    pub fn new(tip: TipSelection) -> Self {
        let mut session = SplitSession {
            check_amount: String::new(),
            people_count: String::new(),
            tip,
            default_tip: tip,
            totals: DerivedTotals::default(),
        };
        session.recompute();
        session
    }

    pub fn check_amount(&self) -> &str {
        &self.check_amount
    }

    pub fn people_count(&self) -> &str {
        &self.people_count
    }

    pub fn tip(&self) -> TipSelection {
        self.tip
    }

    /// Totals for the current inputs
    pub fn totals(&self) -> DerivedTotals {
        self.totals
    }

    pub fn set_check_amount(&mut self, text: impl Into<String>) {
        self.check_amount = text.into();
        self.recompute();
    }

    pub fn set_people_count(&mut self, text: impl Into<String>) {
        self.people_count = text.into();
        self.recompute();
    }

    pub fn set_tip(&mut self, tip: TipSelection) {
        self.tip = tip;
        self.recompute();
    }

    pub fn push_check_char(&mut self, c: char) {
        self.check_amount.push(c);
        self.recompute();
    }

    pub fn pop_check_char(&mut self) {
        if self.check_amount.pop().is_some() {
            self.recompute();
        }
    }

    pub fn push_people_char(&mut self, c: char) {
        self.people_count.push(c);
        self.recompute();
    }

    pub fn pop_people_char(&mut self) {
        if self.people_count.pop().is_some() {
            self.recompute();
        }
    }

    pub fn next_tip(&mut self) {
        self.set_tip(self.tip.next());
    }

    pub fn previous_tip(&mut self) {
        self.set_tip(self.tip.previous());
    }

    /// Clear both fields and go back to the session's starting tip
    pub fn reset(&mut self) {
        debug!("resetting split session");
        self.check_amount.clear();
        self.people_count.clear();
        self.tip = self.default_tip;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.totals = calculate(&self.check_amount, &self.people_count, self.tip);
        trace!(
            check_amount = %self.check_amount,
            people_count = %self.people_count,
            tip = self.tip.percentage(),
            per_person = self.totals.per_person_amount,
            "recomputed totals"
        );
    }
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::new(TipSelection::default())
    }
}
