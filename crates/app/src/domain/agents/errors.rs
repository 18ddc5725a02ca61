//! Agents service errors.

use std::fmt;

use thiserror::Error;

use crate::domain::agents::{records::AgentStatus, validation::FieldError};

/// Comma-separated list of statuses, as shown in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusList(pub Vec<AgentStatus>);

impl fmt::Display for StatusList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, status) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            fmt::Display::fmt(status, f)?;
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AgentsServiceError {
    #[error("Agent not found")]
    NotFound,

    #[error("Agent code {0} already exists")]
    AlreadyExists(String),

    #[error("Validation failed")]
    Invalid(Vec<FieldError>),

    #[error("Invalid status. Valid statuses: {}", StatusList(AgentStatus::ALL.to_vec()))]
    InvalidStatus(String),

    #[error("Cannot change from {from} to {to}. Valid transitions: {allowed}")]
    InvalidTransition {
        from: AgentStatus,
        to: AgentStatus,
        allowed: StatusList,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_message_lists_allowed_targets() {
        let error = AgentsServiceError::InvalidTransition {
            from: AgentStatus::Available,
            to: AgentStatus::Offline,
            allowed: StatusList(vec![AgentStatus::Busy, AgentStatus::Break]),
        };

        assert_eq!(
            error.to_string(),
            "Cannot change from Available to Offline. Valid transitions: Busy, Break"
        );
    }

    #[test]
    fn invalid_status_message_lists_every_status() {
        let error = AgentsServiceError::InvalidStatus("Lunch".to_string());

        assert_eq!(
            error.to_string(),
            "Invalid status. Valid statuses: Available, Busy, Break, Offline"
        );
    }
}
