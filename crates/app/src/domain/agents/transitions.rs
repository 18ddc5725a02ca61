//! Agent status transition graph.

use rustc_hash::FxHashMap;

use crate::domain::agents::records::AgentStatus;

/// Directed adjacency table of permitted status changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransitions {
    table: FxHashMap<AgentStatus, Vec<AgentStatus>>,
}

impl StatusTransitions {
    /// Build a table from `(from, allowed targets)` pairs. Statuses that do
    /// not appear have no outgoing transitions.
    pub fn new<I>(table: I) -> Self
    where
        I: IntoIterator<Item = (AgentStatus, Vec<AgentStatus>)>,
    {
        Self {
            table: table.into_iter().collect(),
        }
    }

    /// Statuses reachable in one step from `from`.
    #[must_use]
    pub fn allowed(&self, from: AgentStatus) -> &[AgentStatus] {
        self.table.get(&from).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn permits(&self, from: AgentStatus, to: AgentStatus) -> bool {
        self.allowed(from).contains(&to)
    }
}

impl Default for StatusTransitions {
    fn default() -> Self {
        use AgentStatus::{Available, Break, Busy, Offline};

        Self::new([
            (Available, vec![Busy, Break]),
            (Busy, vec![Available, Break]),
            (Break, vec![Available, Offline]),
            (Offline, vec![Available]),
        ])
    }
}
