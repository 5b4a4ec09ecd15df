//! Application layer - Handlers over the ports.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! the answer flow engine, the session manager, storefront loading, search
//! gating and purchase reconciliation.

pub mod handlers;

pub use handlers::{
    // Flow
    AnswerFlowEngine,
    // Account
    PurchaseProgress, PurchaseReconciler, ReconcileError, ReconcileHandle, SessionError,
    SessionManager,
    // Catalog
    LoadStorefrontHandler, LoadStorefrontQuery, SearchAccess, SearchGate, Storefront,
};
