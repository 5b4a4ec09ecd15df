//! Storage Adapters
//!
//! Implementations of the CredentialStore port.
//!
//! ## Available Adapters
//!
//! - **FileCredentialStore** - Stores the session as a JSON file on disk
//! - **InMemoryCredentialStore** - Stores the session in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use shortlist::adapters::storage::{FileCredentialStore, InMemoryCredentialStore};
//!
//! // Production: file-based storage
//! let store = FileCredentialStore::new(&config.storage.credentials_path);
//!
//! // Testing: in-memory storage
//! let store = InMemoryCredentialStore::new();
//! ```

mod file_credential_store;
mod in_memory_credential_store;

pub use file_credential_store::FileCredentialStore;
pub use in_memory_credential_store::InMemoryCredentialStore;
