//! Wallboard status summary.

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::domain::agents::records::{AgentRecord, AgentStatus};

/// Head-count of agents per status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub total_agents: usize,
    /// Every status is present, including those with no agents.
    pub status_counts: BTreeMap<AgentStatus, usize>,
    /// Whole percentages rounded half up; they need not sum to 100.
    pub status_percentages: BTreeMap<AgentStatus, usize>,
    pub last_updated: Timestamp,
}

pub(crate) fn summarize(agents: &[AgentRecord], now: Timestamp) -> StatusSummary {
    let total_agents = agents.len();

    let mut status_counts: BTreeMap<AgentStatus, usize> =
        AgentStatus::ALL.into_iter().map(|status| (status, 0)).collect();

    for agent in agents {
        *status_counts.entry(agent.status).or_default() += 1;
    }

    let status_percentages = status_counts
        .iter()
        .map(|(status, count)| (*status, percentage(*count, total_agents)))
        .collect();

    StatusSummary {
        total_agents,
        status_counts,
        status_percentages,
        last_updated: now,
    }
}

/// `round(count * 100 / total)`, halves rounding up.
fn percentage(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }

    (count * 200 + total) / (2 * total)
}
