pub mod app;
pub mod clicks;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod mood;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use mood::MoodStore;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, resolve_data_path};
