//! Agents Data

use crate::domain::agents::records::{AgentStatus, Department};

/// New Agent Data
///
/// Text fields arrive unvalidated; an empty string counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAgent {
    pub agent_code: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Agent Update Data; the agent code cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentFilters {
    pub status: Option<AgentStatus>,
    pub department: Option<Department>,
}
