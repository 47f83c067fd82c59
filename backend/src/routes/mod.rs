mod docs;
mod health;
/// Upload credential endpoint
pub mod upload;

use aide::axum::{routing::get, ApiRouter};
use common_types::PRESIGNED_URL_ROUTE;

use crate::types::Environment;

/// Creates the router with all handler routes
#[must_use]
pub fn handler(environment: &Environment) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler(environment))
        .api_route("/health", get(health::handler))
        .api_route(PRESIGNED_URL_ROUTE, get(upload::generate_presigned_url))
}
