mod dto;
pub(crate) mod extractor;
pub mod handlers;
mod password;
pub mod repo;

pub use extractor::Identity;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
