//! Derived views over a pin sequence. Everything here is a pure function of
//! its input; nothing holds on to catalog state.

pub mod filter;
pub mod grouping;
pub mod stats;

pub use filter::filter_pins;
pub use grouping::{group_by_month, MonthGroup};
pub use stats::PinStats;
