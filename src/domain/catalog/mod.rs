//! Catalog module.
//!
//! - `category` - Categories and the subcategories a search is scoped to
//! - `question` - Question definitions and question sets

mod category;
mod question;

pub use category::{Category, Subcategory};
pub use question::{Question, QuestionKind, QuestionOption, QuestionSet, RangeBounds, RangePreset};
