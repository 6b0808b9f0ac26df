pub mod handlers;
mod state;

pub use state::AppState;
