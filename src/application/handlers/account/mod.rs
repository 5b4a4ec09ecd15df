//! Account handlers: session lifecycle and purchase reconciliation.

mod purchase_reconciler;
mod session_manager;

pub use purchase_reconciler::{PurchaseProgress, PurchaseReconciler, ReconcileError, ReconcileHandle};
pub use session_manager::{SessionError, SessionManager};
