//! Answers module.
//!
//! - `answer` - The three answer shapes and their editing rules
//! - `answer_set` - Per-session mapping from question to answer

mod answer;
mod answer_set;

pub use answer::{Answer, AnswerShape, MultiSelection, NumericRange, MAX_MULTI_SELECTIONS};
pub use answer_set::{AnswerEntry, AnswerSet};
