//! Error handling.
//!
//! Error types are grouped by the stage that raises them:
//! - **Initialization**: logger and HTTP client setup
//! - **Criteria**: search input validation
//! - **Fetch**: retrieval loop (fatal or partial-result terminating)
//! - **Export** and **Credential**: file output

mod types;

// Re-export public API
pub use types::{CredentialError, CriteriaError, ExportError, FetchError, InitializationError};
