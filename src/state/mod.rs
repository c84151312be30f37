//! State management module
//!
//! This module handles conversation state and user context

pub mod context;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::{AppContext, ConversationContext};
pub use scenarios::{flows, steps, Scenario, ScenarioManager, ScenarioStep, StepValidation, InputType};
pub use storage::{StateStorage, StateStorageManager, StorageStats};
