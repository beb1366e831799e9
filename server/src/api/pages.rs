//! Server-rendered HTML pages

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::core::constants::APP_NAME;
use crate::utils::string::escape_html;

/// Message shown when registering an email that is already taken
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Message shown when login fails
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Values echoed back into a form after a failed submission
#[derive(Debug, Default, Clone, Copy)]
pub struct FormEcho<'a> {
    pub email: &'a str,
    pub username: &'a str,
}

/// An HTML page with a status code
pub struct Page {
    status: StatusCode,
    html: String,
}

impl Page {
    fn ok(html: String) -> Self {
        Self {
            status: StatusCode::OK,
            html,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        (self.status, Html(self.html)).into_response()
    }
}

fn layout(title: &str, signed_in: bool, body: &str) -> String {
    let session_links = if signed_in {
        r#"<a href="/protected">Account</a><form method="post" action="/logout"><button type="submit" class="link">Logout</button></form>"#
    } else {
        r#"<a href="/login">Login</a><a href="/register">Register</a>"#
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<link rel="stylesheet" href="/assets/styles.css">
</head>
<body>
<header>
<a class="brand" href="/">{app}</a>
<nav><a href="/">Home</a>{session_links}</nav>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        app = APP_NAME,
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(e)))
        .unwrap_or_default()
}

/// Dashboard with the five-unit chart
pub fn dashboard(signed_in: bool) -> Page {
    let body = r#"<section class="card">
<h1>Five-unit mathematics by school</h1>
<p class="muted">Share of each school's students on the five-unit track.</p>
<p id="five-unit-status" class="muted">Loading...</p>
<canvas id="five-unit-chart"></canvas>
<table id="five-unit-table">
<thead><tr><th>School</th><th>Students</th><th>Five-unit</th><th>Percentage</th></tr></thead>
<tbody></tbody>
</table>
</section>
<script src="/assets/chart.js" defer></script>"#;

    Page::ok(layout("Dashboard", signed_in, body))
}

/// Sign-in form
pub fn login(error: Option<&str>, echo: FormEcho<'_>) -> Page {
    let body = format!(
        r#"<section class="card auth">
<h1>Sign In</h1>
<p class="muted">Use your email and password to sign in</p>
<form method="post" action="/login">
<label for="email">Email Address</label>
<input id="email" name="email" type="email" autocomplete="email" required value="{email}">
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
{error}
<button type="submit">Sign in</button>
</form>
<p class="muted">Don't have an account? <a href="/register">Sign up</a> for free.</p>
</section>"#,
        email = escape_html(echo.email),
        error = error_block(error),
    );

    Page::ok(layout("Sign In", false, &body))
}

/// Registration form
pub fn register(error: Option<&str>, echo: FormEcho<'_>) -> Page {
    let body = format!(
        r#"<section class="card auth">
<h1>Sign Up</h1>
<p class="muted">Create an account with your email and password</p>
<form method="post" action="/register">
<label for="email">Email Address</label>
<input id="email" name="email" type="email" autocomplete="email" required value="{email}">
<label for="username">Username</label>
<input id="username" name="username" type="text" autocomplete="username" value="{username}">
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="new-password" required>
{error}
<button type="submit">Sign Up</button>
</form>
<p class="muted">Already have an account? <a href="/login">Sign in</a> instead.</p>
</section>"#,
        email = escape_html(echo.email),
        username = escape_html(echo.username),
        error = error_block(error),
    );

    Page::ok(layout("Sign Up", false, &body))
}

/// Signed-in landing page
pub fn protected(email: &str) -> Page {
    let body = format!(
        r#"<section class="card">
<h1>Protected</h1>
<p>You are logged in as <strong>{}</strong>.</p>
<form method="post" action="/logout"><button type="submit">Sign out</button></form>
</section>"#,
        escape_html(email)
    );

    Page::ok(layout("Protected", true, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_page_shows_error() {
        let page = register(Some(USER_EXISTS_MESSAGE), FormEcho::default())
            .with_status(StatusCode::CONFLICT);
        assert_eq!(page.status, StatusCode::CONFLICT);
        assert!(page.html.contains("User already exists"));
    }

    #[test]
    fn test_login_page_escapes_echo() {
        let page = login(
            None,
            FormEcho {
                email: r#""><script>"#,
                username: "",
            },
        );
        assert!(!page.html.contains("<script>"));
        assert!(page.html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(!page.html.contains(r#"class="error""#));
    }

    #[test]
    fn test_protected_page_shows_email() {
        let page = protected("noa@school.org");
        assert!(page.html.contains("noa@school.org"));
        assert!(page.html.contains(r#"action="/logout""#));
    }

    #[test]
    fn test_dashboard_loads_chart() {
        let page = dashboard(false);
        assert!(page.html.contains("/assets/chart.js"));
        assert!(page.html.contains(r#"href="/login""#));
        assert!(dashboard(true).html.contains(r#"href="/protected""#));
    }
}
