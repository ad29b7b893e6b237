pub mod cars;
pub mod clients;
pub mod documents;
pub mod finance;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod storefront;
pub mod transitaires;

use serde::Serialize;

/// Uniform admin-API envelope.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
