use serde::{Deserialize, Serialize};

use crate::Distance;

/// Limits for a single search. A search that runs out of budget reports
/// "no route" instead of running on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum number of settled nodes
    pub max_expansions: Option<usize>,
    /// Paths longer than this are not explored
    pub max_cost: Option<Distance>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_max_cost(mut self, max_cost: Distance) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    pub(crate) fn exhausted(&self, expansions: usize) -> bool {
        self.max_expansions.is_some_and(|max| expansions > max)
    }

    pub(crate) fn exceeds_cost(&self, cost: Distance) -> bool {
        self.max_cost.is_some_and(|max| cost > max)
    }
}
