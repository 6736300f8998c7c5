//! HTTP surface for the survey pipeline

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::{create_router, AppState};
