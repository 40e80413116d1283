pub mod corpus;
pub mod health;
pub mod summarize;

use crate::api::error::ApiError;

/// Fallback for unmatched routes: the 404 envelope with a directory of
/// valid endpoints.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
