//! HTTP front end for the shortener: creation, reporting and redirects.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
