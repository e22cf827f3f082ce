//! Access-check abstraction and backends for Warden.

pub mod http;
pub mod policy;
pub mod registry;

use async_trait::async_trait;
use warden_core::error::WardenResult;
use warden_core::{AccessDecision, AccessQuery};

pub use http::HttpAccessChecker;
pub use policy::StaticPolicy;

/// Abstraction for deciding record access from any source.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    async fn check_access(&self, query: &AccessQuery) -> WardenResult<AccessDecision>;
}
