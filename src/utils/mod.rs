//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, the wall clock and helper functions.

pub mod clock;
pub mod errors;
pub mod logging;
pub mod helpers;

pub use clock::{Clock, SystemClock, FixedClock};
pub use errors::{BotError, StoreError, Result, StoreResult};
