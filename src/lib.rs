pub mod ident;
pub mod logging;
pub mod mime;
pub mod overlay;
pub mod server;
pub mod settings;
pub mod store;
mod test_util;

pub use overlay::{CaptionError, Compositor, OverlayGeometry};
pub use server::{build_app, run_server};
pub use store::{AssetStore, StoreError, StoreRoot};
