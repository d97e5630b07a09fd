// WeSplit - Core Library
// Bill split calculator shared by the TUI, CLI and API server

pub mod tips;
pub mod calculator;
pub mod session;
pub mod display;
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use tips::{TipIndexError, TipSelection, DEFAULT_TIP_INDEX, TIP_PERCENTAGES};
pub use calculator::{
    calculate, parse_check_amount, parse_people_count,
    BillInputs, DerivedTotals,
};
pub use session::SplitSession;
pub use display::{format_money, TotalsView};
pub use config::Settings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
