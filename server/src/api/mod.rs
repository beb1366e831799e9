//! HTTP server, pages and routes

pub mod auth;
mod embedded;
pub mod middleware;
pub mod pages;
pub mod routes;
mod server;
pub mod types;

pub use auth::AuthManager;
pub use server::{ApiServer, router};
