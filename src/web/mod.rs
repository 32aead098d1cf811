//! HTTP surface: HTML page, form endpoint, and JSON API.

pub mod handlers;
pub mod server;
pub mod types;
pub mod view;

pub use server::{AppState, ServerHandle, routes, start_server};
pub use view::{HomeView, render_home};
