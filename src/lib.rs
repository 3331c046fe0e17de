pub mod app;
pub mod calendar;
pub mod config;
pub mod date_key;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod state;
pub mod stats;
pub mod storage;
pub mod summary;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::JsonFileStore;
