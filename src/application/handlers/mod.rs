//! Command and query handlers.
//!
//! Each handler takes its ports as `Arc<dyn Port>` and exposes async
//! operations over them.

pub mod account;
pub mod catalog;
pub mod flow;

pub use account::{
    PurchaseProgress, PurchaseReconciler, ReconcileError, ReconcileHandle, SessionError,
    SessionManager,
};
pub use catalog::{LoadStorefrontHandler, LoadStorefrontQuery, SearchAccess, SearchGate, Storefront};
pub use flow::AnswerFlowEngine;
