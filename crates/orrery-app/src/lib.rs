//! Orrery application: window, frame loop and headless runner.

pub mod app;
pub mod error;
pub mod headless;
pub mod pacer;

pub use app::{AppState, run};
pub use error::AppError;
pub use headless::{HeadlessReport, run_headless};
pub use pacer::FramePacer;
