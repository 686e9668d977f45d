use crate::clicks::ClickCounter;
use crate::mood::MoodStore;
use crate::storage::SharedStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub moods: Arc<Mutex<MoodStore>>,
    pub clicks: Arc<Mutex<ClickCounter>>,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        let mut moods = MoodStore::new(Arc::clone(&store));
        // Dashboards are built per request; the listener only traces changes.
        moods.subscribe(|entries| debug!(total = entries.len(), "moods changed"));

        Self {
            moods: Arc::new(Mutex::new(moods)),
            clicks: Arc::new(Mutex::new(ClickCounter::new(store))),
        }
    }
}
