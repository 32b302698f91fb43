//! # Services Layer
//!
//! Services encapsulate the outside world and reusable rules:
//! - `api`: generic REST client over the backend
//! - `backend`: typed resource operations, the seam used by tests
//! - `dispatcher`: runs backend calls off the UI loop and returns tagged completions
//! - `validation`: new-comment form checks

pub mod api;
pub mod backend;
pub mod dispatcher;
pub mod validation;

pub use api::{NetworkError, RestClient};
pub use backend::Backend;
pub use dispatcher::ApiService;
pub use validation::{validate_draft, ValidationError};
