//! Test helpers module
//!
//! Utilities shared by the integration tests: a recording messenger, a test
//! context around the real handlers, fixtures and a mock Telegram API server.

#![allow(dead_code)]

pub mod recording_messenger;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use recording_messenger::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
