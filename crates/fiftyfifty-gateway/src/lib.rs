//! HTTP front end for the video set service.

pub mod app;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
