pub mod state;

pub use state::{AppState, CachedResponse, RefreshStatus, ResponseCache};
