//! walletfy-domain
//!
//! Pure domain models (Event, month keys, monthly summaries, balance reports).
//! No I/O, no storage. Only data types and core enums.

pub mod common;
pub mod event;
pub mod summary;

pub use common::*;
pub use event::*;
pub use summary::*;
