//! Three small widgets built only on the guard layer's public contract.
//!
//! Each one is constructed from a root node and fails as a whole if a required part is missing.
//! Optional parts that are absent turn the operations that use them into no-ops.
//!
//! None of them subscribe to events or schedule timers themselves. The host wires its listeners
//! to the `on_*` methods and calls the follow-up operation after the documented delay.

mod header;
mod stay_card;
mod toolbar;

pub use header::Header;
pub use stay_card::{StayCard, CTA_RESTORE_DELAY, DEFAULT_CURRENCY};
pub use toolbar::{Status, Toolbar, REFRESH_SETTLE};
