pub mod home;
pub mod measurements;
pub mod stations;

pub use home::*;
pub use measurements::*;
pub use stations::*;

use axum::http::StatusCode;
use log::error;

use crate::db;

/// Log a store failure and turn it into a plain-text 500 response.
pub(crate) fn internal_error(
    context: &'static str,
) -> impl FnOnce(db::Error) -> (StatusCode, String) {
    move |err| {
        error!("error querying {}: {}", context, err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to query {}: {}", context, err),
        )
    }
}
