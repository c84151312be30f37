//! Conversation scenarios implementation
//!
//! This module defines the conversation flows users can go through
//! (registration, booking, cancellation and the master menu) as data:
//! steps, allowed transitions and input validation.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::texts;
use crate::utils::errors::{BotError, Result};
use super::context::ConversationContext;

/// Scenario identifiers
pub mod flows {
    pub const REGISTRATION: &str = "registration";
    pub const BOOKING: &str = "booking";
    pub const CANCELLATION: &str = "cancellation";
    pub const MASTER_MENU: &str = "master_menu";
}

/// Step identifiers
pub mod steps {
    pub const NAME_INPUT: &str = "name_input";
    pub const PHONE_CHOICE: &str = "phone_choice";
    pub const PHONE_MANUAL: &str = "phone_manual";

    pub const SERVICE_SELECTION: &str = "service_selection";
    pub const DATE_SELECTION: &str = "date_selection";
    pub const TIME_SELECTION: &str = "time_selection";
    pub const CONFIRMATION: &str = "confirmation";

    pub const APPOINTMENT_SELECTION: &str = "appointment_selection";

    pub const MENU: &str = "menu";
}

/// Represents a conversation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Initial step when starting this scenario
    pub initial_step: String,
    /// All possible steps in this scenario
    pub steps: HashMap<String, ScenarioStep>,
    /// Maximum duration for this scenario (in seconds)
    pub max_duration: Option<u64>,
}

/// Represents a step within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Step identifier
    pub id: String,
    /// Description of what happens in this step
    pub description: String,
    /// Possible next steps from this step
    pub next_steps: Vec<String>,
    /// Validation rules for user input
    pub validation: Option<StepValidation>,
}

/// Validation rules for a scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepValidation {
    /// Input type expected
    pub input_type: InputType,
    /// Minimum length in characters
    pub min_length: Option<usize>,
    /// Maximum length in characters
    pub max_length: Option<usize>,
    /// Pattern that must be found somewhere in the input (regex)
    pub pattern: Option<String>,
    /// Custom validation message
    pub error_message: Option<String>,
}

/// Longest client name kept for bookings
pub const NAME_MAX_CHARS: usize = 100;

/// Types of input expected in a step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InputType {
    Text,
    Phone,
    Choice(Vec<String>),
}

/// Scenario manager for handling all conversation scenarios
#[derive(Debug, Clone)]
pub struct ScenarioManager {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioManager {
    /// Create a new scenario manager with the salon scenarios
    pub fn new() -> Self {
        let mut manager = Self {
            scenarios: HashMap::new(),
        };

        manager.register_scenario(create_registration_scenario());
        manager.register_scenario(create_booking_scenario());
        manager.register_scenario(create_cancellation_scenario());
        manager.register_scenario(create_master_menu_scenario());
        manager
    }

    /// Register a new scenario
    pub fn register_scenario(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    /// Get a scenario by ID
    pub fn get_scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Start a scenario for a user, discarding any earlier flow data
    pub fn start_scenario(&self, context: &mut ConversationContext, scenario_id: &str) -> Result<()> {
        let scenario = self
            .get_scenario(scenario_id)
            .ok_or_else(|| BotError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        context.start_scenario(scenario_id, &scenario.initial_step);

        if let Some(max_duration) = scenario.max_duration {
            let expiry = chrono::Utc::now() + chrono::Duration::seconds(max_duration as i64);
            context.set_expiry(expiry);
        }

        Ok(())
    }

    /// Move to the next step in a scenario
    pub fn next_step(&self, context: &mut ConversationContext, next_step: &str) -> Result<()> {
        let current_step = self.get_current_step(context).map_err(|_| BotError::InvalidStateTransition {
            from: context.step.clone().unwrap_or_else(|| "no_step".to_string()),
            to: next_step.to_string(),
        })?;

        if !current_step.next_steps.iter().any(|step| step == next_step) {
            return Err(BotError::InvalidStateTransition {
                from: current_step.id.clone(),
                to: next_step.to_string(),
            });
        }

        context.next_step(next_step)
    }

    /// Validate user input for the current step
    pub fn validate_input(&self, context: &ConversationContext, input: &str) -> Result<()> {
        match &self.get_current_step(context)?.validation {
            Some(validation) => validate_input_against_rules(input, validation),
            None => Ok(()),
        }
    }

    /// Get the current step information
    pub fn get_current_step(&self, context: &ConversationContext) -> Result<&ScenarioStep> {
        let scenario_id = context
            .scenario
            .as_ref()
            .ok_or_else(|| BotError::InvalidInput("No active scenario".to_string()))?;

        let step_id = context
            .step
            .as_ref()
            .ok_or_else(|| BotError::InvalidInput("No active step".to_string()))?;

        let scenario = self
            .get_scenario(scenario_id)
            .ok_or_else(|| BotError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        scenario
            .steps
            .get(step_id)
            .ok_or_else(|| BotError::InvalidInput(format!("Unknown step: {}", step_id)))
    }
}

/// Validate input against validation rules
fn validate_input_against_rules(input: &str, validation: &StepValidation) -> Result<()> {
    let rejected = |fallback: &str| {
        BotError::InvalidInput(validation.error_message.clone().unwrap_or_else(|| fallback.to_string()))
    };
    let length = input.chars().count();

    if let Some(min_length) = validation.min_length {
        if length < min_length {
            return Err(rejected(&format!("Input too short (minimum {} characters)", min_length)));
        }
    }

    if let Some(max_length) = validation.max_length {
        if length > max_length {
            return Err(rejected(&format!("Input too long (maximum {} characters)", max_length)));
        }
    }

    if let Some(pattern) = &validation.pattern {
        let regex = regex::Regex::new(pattern)
            .map_err(|_| BotError::Config(format!("Invalid regex pattern: {}", pattern)))?;
        if !regex.is_match(input) {
            return Err(rejected("Input format is invalid"));
        }
    }

    match &validation.input_type {
        InputType::Phone if !input.chars().any(|c| c.is_ascii_digit()) => {
            Err(rejected("Phone number must contain digits"))
        }
        InputType::Choice(choices) if !choices.iter().any(|choice| choice == input) => {
            Err(rejected(&format!("Invalid choice. Available options: {}", choices.join(", "))))
        }
        _ => Ok(()),
    }
}

fn step(id: &str, description: &str, next_steps: &[&str], validation: Option<StepValidation>) -> (String, ScenarioStep) {
    (
        id.to_string(),
        ScenarioStep {
            id: id.to_string(),
            description: description.to_string(),
            next_steps: next_steps.iter().map(|s| s.to_string()).collect(),
            validation,
        },
    )
}

/// Create the client registration scenario
fn create_registration_scenario() -> Scenario {
    let steps = HashMap::from([
        step(
            steps::NAME_INPUT,
            "Client types the name used for bookings",
            &[steps::PHONE_CHOICE],
            Some(StepValidation {
                input_type: InputType::Text,
                min_length: None,
                max_length: Some(NAME_MAX_CHARS),
                pattern: None,
                error_message: Some(texts::NAME_TOO_LONG.to_string()),
            }),
        ),
        step(
            steps::PHONE_CHOICE,
            "Client shares the contact or chooses manual entry",
            &[steps::PHONE_MANUAL],
            None,
        ),
        step(
            steps::PHONE_MANUAL,
            "Client types the phone number",
            &[],
            Some(StepValidation {
                input_type: InputType::Phone,
                min_length: Some(10),
                max_length: None,
                pattern: Some(r"\d".to_string()),
                error_message: Some(texts::INVALID_PHONE.to_string()),
            }),
        ),
    ]);

    Scenario {
        id: flows::REGISTRATION.to_string(),
        name: "Client Registration".to_string(),
        initial_step: steps::NAME_INPUT.to_string(),
        steps,
        max_duration: None,
    }
}

/// Create the appointment booking scenario
fn create_booking_scenario() -> Scenario {
    let steps = HashMap::from([
        step(steps::SERVICE_SELECTION, "Client picks a service", &[steps::DATE_SELECTION], None),
        step(
            steps::DATE_SELECTION,
            "Client picks a day in the month calendar",
            &[steps::TIME_SELECTION],
            None,
        ),
        step(
            steps::TIME_SELECTION,
            "Client picks a free slot",
            &[steps::CONFIRMATION, steps::DATE_SELECTION],
            None,
        ),
        step(
            steps::CONFIRMATION,
            "Client confirms or declines the summary",
            &[steps::TIME_SELECTION, steps::DATE_SELECTION],
            None,
        ),
    ]);

    Scenario {
        id: flows::BOOKING.to_string(),
        name: "Appointment Booking".to_string(),
        initial_step: steps::SERVICE_SELECTION.to_string(),
        steps,
        max_duration: Some(1800), // 30 minutes
    }
}

/// Create the appointment cancellation scenario
fn create_cancellation_scenario() -> Scenario {
    let steps = HashMap::from([step(
        steps::APPOINTMENT_SELECTION,
        "Client picks one of their confirmed appointments",
        &[],
        None,
    )]);

    Scenario {
        id: flows::CANCELLATION.to_string(),
        name: "Appointment Cancellation".to_string(),
        initial_step: steps::APPOINTMENT_SELECTION.to_string(),
        steps,
        max_duration: Some(900), // 15 minutes
    }
}

/// Create the operator menu scenario
fn create_master_menu_scenario() -> Scenario {
    let choices = [
        texts::BTN_MASTER_TODAY,
        texts::BTN_MASTER_TOMORROW,
        texts::BTN_MASTER_ALL,
        texts::BTN_MASTER_STATS,
        texts::BTN_MASTER_BACK,
    ];

    let steps = HashMap::from([step(
        steps::MENU,
        "Operator picks a read-only schedule view",
        &[],
        Some(StepValidation {
            input_type: InputType::Choice(choices.iter().map(|c| c.to_string()).collect()),
            min_length: None,
            max_length: None,
            pattern: None,
            error_message: None,
        }),
    )]);

    Scenario {
        id: flows::MASTER_MENU.to_string(),
        name: "Master Menu".to_string(),
        initial_step: steps::MENU.to_string(),
        steps,
        max_duration: None,
    }
}

impl Default for ScenarioManager {
    fn default() -> Self {
        Self::new()
    }
}
