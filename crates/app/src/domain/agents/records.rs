//! Agent Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::UnknownVariant, uuids::TypedUuid};

pub type AgentUuid = TypedUuid<AgentRecord>;

/// Live availability of a contact-centre agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AgentStatus {
    #[default]
    Available,
    Busy,
    Break,
    Offline,
}

impl AgentStatus {
    pub const ALL: [Self; 4] = [Self::Available, Self::Busy, Self::Break, Self::Offline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
            Self::Break => "Break",
            Self::Offline => "Offline",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("status", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Department {
    #[default]
    General,
    Sales,
    Support,
    Technical,
    Billing,
}

impl Department {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Sales,
        Self::Support,
        Self::Technical,
        Self::Billing,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sales => "Sales",
            Self::Support => "Support",
            Self::Technical => "Technical",
            Self::Billing => "Billing",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("department", value))
    }
}

/// Agent Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    pub uuid: AgentUuid,
    pub agent_code: String,
    pub name: String,
    pub email: String,
    pub department: Department,
    /// Distinct skills in the order first supplied.
    pub skills: Vec<String>,
    pub status: AgentStatus,
    /// Reason given with the most recent status change.
    pub status_reason: Option<String>,
    pub status_changed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
