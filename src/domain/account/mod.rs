//! Account module.
//!
//! - `session` - Device identity and bearer token
//! - `user` - Registration result and usage status
//! - `plan` - Subscription plans and receipt validation

mod plan;
mod session;
mod user;

pub use plan::{BillingPeriod, Plan, ReceiptRequest, ValidationResult};
pub use session::AuthSession;
pub use user::{Registration, User, UserStatus};
