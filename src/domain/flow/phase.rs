//! Question flow phase state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of one search session.
///
/// ```text
/// Idle ─► Loading ─► Active ─► Searching ─► Results
///            │                    │   └───► Blocked
///            ▼                    ▼
///          Failed ◄───────────────┘
///            └─► Loading | Searching | Active   (retry / dismiss)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// Nothing loaded yet.
    Idle,
    /// Waiting for the question list.
    Loading,
    /// Questions loaded, user answering.
    Active,
    /// Answers submitted, waiting for the ranked result.
    Searching,
    /// Ranked result received.
    Results,
    /// Server refused the search because free usage is exhausted.
    Blocked,
    /// Loading or searching failed; the action can be retried.
    Failed,
}

impl FlowPhase {
    /// Whether answers and position may change in this phase.
    pub fn is_editable(&self) -> bool {
        matches!(self, FlowPhase::Active | FlowPhase::Failed)
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowPhase::Idle => "idle",
            FlowPhase::Loading => "loading",
            FlowPhase::Active => "active",
            FlowPhase::Searching => "searching",
            FlowPhase::Results => "results",
            FlowPhase::Blocked => "blocked",
            FlowPhase::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

impl StateMachine for FlowPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowPhase::*;
        matches!(
            (self, target),
            (Idle, Loading)
                | (Loading, Active)
                | (Loading, Failed)
                | (Active, Searching)
                | (Searching, Results)
                | (Searching, Blocked)
                | (Searching, Failed)
                | (Failed, Loading)
                | (Failed, Searching)
                | (Failed, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowPhase::*;
        match self {
            Idle => vec![Loading],
            Loading => vec![Active, Failed],
            Active => vec![Searching],
            Searching => vec![Results, Blocked, Failed],
            Failed => vec![Loading, Searching, Active],
            Results | Blocked => vec![],
        }
    }
}
