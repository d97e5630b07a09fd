// 💸 Tip Table - the fixed set of tip percentages
// Shared by the calculator, the TUI picker, the CLI and the API

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// TIP TABLE
// ============================================================================

/// Selectable tip percentages, in picker order.
pub const TIP_PERCENTAGES: [u32; 5] = [10, 15, 20, 25, 0];

/// Index selected when nothing else is configured (20%).
pub const DEFAULT_TIP_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TipIndexError {
    #[error("tip index {index} is out of range (expected 0..={max})")]
    OutOfRange { index: usize, max: usize },

    #[error("tip index {0:?} is not a number")]
    NotANumber(String),
}

// ============================================================================
// TIP SELECTION
// ============================================================================

/// An index into [`TIP_PERCENTAGES`]. Always within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TipSelection(usize);

impl TipSelection {
    /// Returns `None` when `index` is past the end of the tip table
    pub fn new(index: usize) -> Option<Self> {
        if index < TIP_PERCENTAGES.len() {
            Some(TipSelection(index))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn percentage(self) -> u32 {
        TIP_PERCENTAGES[self.0]
    }

    /// Next option to the right, wrapping back to the first
    pub fn next(self) -> Self {
        TipSelection((self.0 + 1) % TIP_PERCENTAGES.len())
    }

    /// Previous option to the left, wrapping to the last
    pub fn previous(self) -> Self {
        if self.0 == 0 {
            TipSelection(TIP_PERCENTAGES.len() - 1)
        } else {
            TipSelection(self.0 - 1)
        }
    }

    /// Picker label, e.g. `"20%"`
    pub fn label(self) -> String {
        format!("{}%", self.percentage())
    }

    /// Every selectable option in picker order
    pub fn all() -> impl Iterator<Item = TipSelection> {
        (0..TIP_PERCENTAGES.len()).map(TipSelection)
    }
}

impl Default for TipSelection {
    fn default() -> Self {
        TipSelection(DEFAULT_TIP_INDEX)
    }
}

impl TryFrom<usize> for TipSelection {
    type Error = TipIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        TipSelection::new(index).ok_or(TipIndexError::OutOfRange {
            index,
            max: TIP_PERCENTAGES.len() - 1,
        })
    }
}

impl From<TipSelection> for usize {
    fn from(selection: TipSelection) -> usize {
        selection.0
    }
}

impl std::str::FromStr for TipSelection {
    type Err = TipIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index: usize = s
            .parse()
            .map_err(|_| TipIndexError::NotANumber(s.to_string()))?;
        TipSelection::try_from(index)
    }
}

impl fmt::Display for TipSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let percentages: Vec<u32> = TipSelection::all().map(|t| t.percentage()).collect();
        assert_eq!(percentages, vec![10, 15, 20, 25, 0]);
    }

    #[test]
    fn test_default_is_twenty_percent() {
        let tip = TipSelection::default();
        assert_eq!(tip.index(), 2);
        assert_eq!(tip.percentage(), 20);
        assert_eq!(tip.label(), "20%");
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(TipSelection::new(4).is_some());
        assert!(TipSelection::new(5).is_none());
        assert_eq!(
            TipSelection::try_from(7usize),
            Err(TipIndexError::OutOfRange { index: 7, max: 4 })
        );
    }

    #[test]
    fn test_wrapping_navigation() {
        let last = TipSelection::new(4).unwrap();
        assert_eq!(last.next().index(), 0);

        let first = TipSelection::new(0).unwrap();
        assert_eq!(first.previous().index(), 4);
        assert_eq!(first.next().percentage(), 15);
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("3".parse::<TipSelection>().unwrap().percentage(), 25);
        assert!(matches!(
            "abc".parse::<TipSelection>(),
            Err(TipIndexError::NotANumber(_))
        ));
        assert!(matches!(
            "5".parse::<TipSelection>(),
            Err(TipIndexError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_serde_uses_plain_index() {
        let tip = TipSelection::new(1).unwrap();
        assert_eq!(serde_json::to_string(&tip).unwrap(), "1");

        let parsed: TipSelection = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.percentage(), 0);

        assert!(serde_json::from_str::<TipSelection>("9").is_err());
    }
}
