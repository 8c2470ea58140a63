use tally_cache::Cache;

use crate::store::UserStore;

/// Shared state handed to every handler
///
/// Cloning is cheap; the store is internally shared and the cache client
/// multiplexes its connection.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub cache: Option<Cache>,
}
