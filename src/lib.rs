pub mod app;
pub mod config;
pub mod emissions;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tips;
pub mod validation;

pub use app::router;
pub use config::AppConfig;
pub use errors::TrackerError;
pub use state::AppState;
pub use storage::load_data;
pub use store::Tracker;
