//! Persona compilation.
//!
//! A persona is the fixed system instruction an agent carries for a whole
//! session. Every builder here is a pure function of its arguments; the
//! constraints it spells out are advisory to the model and never checked.

mod debate;
mod interview;
mod review;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

pub use debate::compile;
pub use interview::{author, journalist};
pub use review::{review_author, reviewer, rigor_to_temperature, MAX_RIGOR};

/// Placeholder a retrieval agent replaces with the passages fetched for a question.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// One party in an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    /// Side taken in a debate, if any.
    pub stance: Option<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stance: None,
        }
    }

    pub fn with_stance(mut self, stance: impl Into<String>) -> Self {
        self.stance = Some(stance.into());
        self
    }
}

/// Compiled instructions plus the sampling temperature they ask for.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub text: String,
    /// Overrides the agent's configured temperature when set.
    pub temperature: Option<f32>,
}

impl Persona {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            temperature: None,
        }
    }

    pub fn has_context_slot(&self) -> bool {
        self.text.contains(CONTEXT_PLACEHOLDER)
    }

    /// Fills the `{context}` slot; personas without one get the context appended.
    pub fn with_context(&self, context: &str) -> String {
        if self.has_context_slot() {
            self.text.replace(CONTEXT_PLACEHOLDER, context)
        } else if context.is_empty() {
            self.text.clone()
        } else {
            format!("{}\n\n{}", self.text, context)
        }
    }
}

/// Session-length label and the number of rounds it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLength {
    Short,
    Long,
}

impl SessionLength {
    pub fn exchange_count(&self) -> usize {
        match self {
            SessionLength::Short => 4,
            SessionLength::Long => 8,
        }
    }
}

impl FromStr for SessionLength {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SessionLength::Short),
            "long" => Ok(SessionLength::Long),
            _ => Err(ConfigurationError::UnknownSessionLength(s.to_string())),
        }
    }
}

impl fmt::Display for SessionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionLength::Short => f.write_str("Short"),
            SessionLength::Long => f.write_str("Long"),
        }
    }
}

/// Rejects blank required parameters before any generation call.
pub(crate) fn require(value: &str, name: &'static str) -> Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::MissingParameter(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Short", 4)]
    #[case("Long", 8)]
    #[case("long", 8)]
    fn session_length_lookup(#[case] label: &str, #[case] rounds: usize) {
        let length: SessionLength = label.parse().expect("known label");
        assert_eq!(length.exchange_count(), rounds);
    }

    #[rstest]
    #[case("Medium")]
    #[case("")]
    #[case("4")]
    fn unknown_session_length_is_rejected(#[case] label: &str) {
        assert_eq!(
            label.parse::<SessionLength>(),
            Err(ConfigurationError::UnknownSessionLength(label.to_string()))
        );
    }

    #[test]
    fn context_fills_slot_or_is_appended() {
        let slotted = Persona::new("Answer using:\n{context}");
        assert_eq!(slotted.with_context("passage"), "Answer using:\npassage");

        let plain = Persona::new("Be brief.");
        assert_eq!(plain.with_context(""), "Be brief.");
        assert_eq!(plain.with_context("passage"), "Be brief.\n\npassage");
    }

    #[test]
    fn blank_parameters_are_missing() {
        assert_eq!(
            require("  ", "topic"),
            Err(ConfigurationError::MissingParameter("topic"))
        );
        assert!(require("graph neural networks", "topic").is_ok());
    }
}
