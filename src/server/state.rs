use crate::overlay::Compositor;
use crate::settings;
use crate::store::AssetStore;

#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) settings: settings::Settings,
    pub(crate) store: AssetStore,
    pub(crate) compositor: Compositor,
}
