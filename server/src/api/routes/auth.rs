//! Login, registration and session pages

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::api::auth::{AuthManager, SessionClaims};
use crate::api::pages::{self, FormEcho, INVALID_CREDENTIALS_MESSAGE, USER_EXISTS_MESSAGE};
use crate::api::types::ApiError;
use crate::core::constants::SESSION_COOKIE_NAME;
use crate::domain::{AccountService, RegisterOutcome};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 64, message = "Email must be at most 64 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Username must be at most 64 characters"))]
    pub username: Option<String>,
    // bcrypt only reads the first 72 bytes
    #[validate(length(
        min = 1,
        max = 72,
        message = "Password must be between 1 and 72 characters"
    ))]
    pub password: String,
}

/// Auth routes state
#[derive(Clone)]
pub struct AuthRoutesState {
    pub auth_manager: Arc<AuthManager>,
    pub accounts: AccountService,
}

/// Create auth routes
pub fn routes(auth_manager: Arc<AuthManager>, accounts: AccountService) -> Router {
    let state = AuthRoutesState {
        auth_manager,
        accounts,
    };

    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
        .route("/protected", get(protected))
        .with_state(state)
}

/// Claims of a valid session cookie, if any
pub fn current_session(auth_manager: &AuthManager, jar: &CookieJar) -> Option<SessionClaims> {
    let cookie = jar.get(SESSION_COOKIE_NAME)?;
    match auth_manager.validate_session(cookie.value()) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring session cookie");
            None
        }
    }
}

/// First validation message, checked in form field order
fn first_error(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["email", "username", "password"]
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid form submission".to_string())
}

fn session_cookie(token: String, ttl_days: u32) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(ttl_days as i64))
        .build()
}

pub async fn login_page() -> impl IntoResponse {
    pages::login(None, FormEcho::default())
}

/// Check credentials and start a session
pub async fn login(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let echo = FormEcho {
        email: &form.email,
        username: "",
    };

    if let Err(errors) = form.validate() {
        let page = pages::login(Some(&first_error(&errors)), echo);
        return Ok(page.with_status(StatusCode::BAD_REQUEST).into_response());
    }

    let Some(account) = state.accounts.authenticate(&form.email, &form.password).await? else {
        tracing::debug!("Login rejected");
        let page = pages::login(Some(INVALID_CREDENTIALS_MESSAGE), echo);
        return Ok(page.with_status(StatusCode::UNAUTHORIZED).into_response());
    };

    let token = state
        .auth_manager
        .create_session(&account)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let cookie = session_cookie(token, state.auth_manager.session_ttl_days());

    tracing::debug!(account_id = account.id, "Session started");
    Ok((jar.add(cookie), Redirect::to("/protected")).into_response())
}

pub async fn register_page() -> impl IntoResponse {
    pages::register(None, FormEcho::default())
}

/// Create an account unless the email is taken
pub async fn register(
    State(state): State<AuthRoutesState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    let echo = FormEcho {
        email: &form.email,
        username: form.username.as_deref().unwrap_or(""),
    };

    if let Err(errors) = form.validate() {
        let page = pages::register(Some(&first_error(&errors)), echo);
        return Ok(page.with_status(StatusCode::BAD_REQUEST).into_response());
    }

    let outcome = state
        .accounts
        .register(&form.email, &form.password, form.username.as_deref())
        .await?;

    match outcome {
        RegisterOutcome::Registered(account) => {
            tracing::info!(account_id = account.id, "Account registered");
            Ok(Redirect::to("/login").into_response())
        }
        RegisterOutcome::AlreadyExists => {
            let page = pages::register(Some(USER_EXISTS_MESSAGE), echo);
            Ok(page.with_status(StatusCode::CONFLICT).into_response())
        }
    }
}

/// Page visible only with a valid session
pub async fn protected(State(state): State<AuthRoutesState>, jar: CookieJar) -> Response {
    match current_session(&state.auth_manager, &jar) {
        Some(claims) => pages::protected(&claims.email).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

/// Clear the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (jar.remove(cookie), Redirect::to("/"))
}
