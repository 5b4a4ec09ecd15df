//! Search request and result types.

mod ranked_result;

pub use ranked_result::{RankedItem, RankedResult, SearchRequest};
