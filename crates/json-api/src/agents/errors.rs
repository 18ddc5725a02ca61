//! Agent Errors

use uuid::Uuid;

use wallboard_app::domain::agents::{
    AgentsServiceError, records::AgentUuid, validation::FieldError,
};

use crate::envelope::{ApiError, FieldErrorResponse};

const AGENT_NOT_FOUND: &str = "AGENT_NOT_FOUND";

impl From<FieldError> for FieldErrorResponse {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.to_string(),
            message: error.message,
        }
    }
}

pub(crate) fn into_api_error(error: AgentsServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        AgentsServiceError::NotFound => ApiError::not_found(message).with_code(AGENT_NOT_FOUND),
        AgentsServiceError::AlreadyExists(_) => {
            ApiError::conflict(message).with_code("AGENT_CODE_EXISTS")
        }
        AgentsServiceError::Invalid(fields) => {
            ApiError::bad_request(message).with_fields(fields.into_iter().map(Into::into))
        }
        AgentsServiceError::InvalidStatus(_) => {
            ApiError::bad_request(message).with_code("INVALID_STATUS")
        }
        AgentsServiceError::InvalidTransition { .. } => {
            ApiError::bad_request(message).with_code("INVALID_TRANSITION")
        }
    }
}

/// Parse an agent id path segment.
///
/// Agent ids are UUIDs, so anything else cannot name an agent.
pub(crate) fn parse_agent_uuid(id: &str) -> Result<AgentUuid, ApiError> {
    Uuid::parse_str(id)
        .map(AgentUuid::from_uuid)
        .map_err(|_ignored| into_api_error(AgentsServiceError::NotFound))
}
