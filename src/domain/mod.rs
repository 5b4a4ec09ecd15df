//! Domain layer containing client-side business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, locale, match score, errors)
//! - `account` - Auth session, user status, plans
//! - `catalog` - Categories and questions
//! - `answers` - Answer shapes and the per-session answer set
//! - `flow` - Question flow state machine
//! - `search` - Search request and ranked result

pub mod account;
pub mod answers;
pub mod catalog;
pub mod flow;
pub mod foundation;
pub mod search;
