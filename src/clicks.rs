use crate::errors::StorageError;
use crate::models::Achievement;
use crate::storage::{CLICK_COUNT_KEY, SharedStore};
use tracing::info;

pub struct ClickCounter {
    store: SharedStore,
    count: u64,
}

impl ClickCounter {
    pub fn new(store: SharedStore) -> Self {
        let count = store
            .get(CLICK_COUNT_KEY)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        Self { store, count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn increment(&mut self) -> Result<Option<Achievement>, StorageError> {
        let next = self.count.saturating_add(1);
        self.store.set(CLICK_COUNT_KEY, &next.to_string())?;
        self.count = next;

        let achievement = achievement_for(next);
        if let Some(achievement) = achievement {
            info!(count = next, ?achievement, "click achievement unlocked");
        }
        Ok(achievement)
    }
}

pub fn achievement_for(count: u64) -> Option<Achievement> {
    match count {
        0 => None,
        10 => Some(Achievement::Encourage),
        n if n % 10 == 0 => Some(Achievement::Milestone(n)),
        _ => None,
    }
}
