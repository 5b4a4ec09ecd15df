//! Question flow module.
//!
//! - `phase` - FlowPhase state machine
//! - `question_flow` - Position, answers and phase of one search session
//! - `errors` - Caller contract violations

mod errors;
mod phase;
mod question_flow;

pub use errors::FlowError;
pub use phase::FlowPhase;
pub use question_flow::{FailedAction, FlowFailure, FlowStatus, QuestionFlow};
