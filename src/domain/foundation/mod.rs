//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the Shortlist client.

mod errors;
mod ids;
mod locale;
mod match_score;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{CategoryId, DeviceId, QuestionId, SubcategoryId, UserId};
pub use locale::{Currency, Locale, Region};
pub use match_score::MatchScore;
pub use state_machine::StateMachine;
