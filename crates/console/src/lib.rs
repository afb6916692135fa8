pub mod app;
pub mod config;
pub mod form;
pub mod render;

pub use app::{build_router, AppState};
