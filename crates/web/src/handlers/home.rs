//! Handler for the home page.

use axum::extract::Query;
use registry_core::notice::HomeNotice;
use serde::Deserialize;

use crate::middleware::session::CurrentUser;
use crate::views::View;

/// Query parameters for `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    /// `1` after a create, `2` after an update.
    pub success: Option<String>,
}

/// GET /
///
/// Render the home page, with a confirmation when `success` is `1` or `2`.
pub async fn index(current: CurrentUser, Query(params): Query<HomeParams>) -> View {
    let notice = HomeNotice::from_query(params.success.as_deref());
    View::index(current.name(), notice)
}
