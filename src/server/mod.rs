mod caption;
mod handlers;
mod models;
mod state;
mod upload;

pub use handlers::{build_app, run_server};
pub(crate) use state::ServerState;
