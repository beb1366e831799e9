//! Dashboard page

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum_extra::extract::CookieJar;

use super::auth::current_session;
use crate::api::auth::AuthManager;
use crate::api::pages;

pub fn routes(auth_manager: Arc<AuthManager>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .with_state(auth_manager)
}

pub async fn dashboard(State(auth_manager): State<Arc<AuthManager>>, jar: CookieJar) -> impl IntoResponse {
    let signed_in = current_session(&auth_manager, &jar).is_some();
    pages::dashboard(signed_in)
}
