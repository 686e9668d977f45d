use crate::errors::MoodError;
use crate::models::MoodEntry;
use crate::storage::{MOODS_KEY, SharedStore};
use chrono::{Local, NaiveDateTime};
use std::fmt::Write as _;
use tracing::{debug, error, info};

pub const EXPORT_HEADER: &str = "=== Diary ===\n";
pub const EXPORT_FILE_NAME: &str = "diary.txt";

type Listener = Box<dyn Fn(&[MoodEntry]) + Send + Sync>;

/// Newest-first diary backed by a key-value store.
///
/// Every mutation is written through before it becomes visible: the new
/// sequence is persisted first and only then swapped in, so a failed write
/// leaves both sides on the previous sequence.
pub struct MoodStore {
    store: SharedStore,
    entries: Vec<MoodEntry>,
    listeners: Vec<Listener>,
}

impl MoodStore {
    /// Builds the store and loads whatever is persisted under `moods`.
    pub fn new(store: SharedStore) -> Self {
        let mut moods = Self {
            store,
            entries: Vec::new(),
            listeners: Vec::new(),
        };
        moods.load();
        moods
    }

    pub fn load(&mut self) {
        self.entries = match self.store.get(MOODS_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("mood data is corrupt, resetting: {err}");
                    Vec::new()
                }
            },
        };
    }

    /// Registers a callback run with the current list after each mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&[MoodEntry]) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn list(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Blank text is ignored and yields `Ok(None)`.
    pub fn add(&mut self, text: &str) -> Result<Option<MoodEntry>, MoodError> {
        self.add_at(text, Local::now().naive_local())
    }

    pub fn add_at(&mut self, text: &str, at: NaiveDateTime) -> Result<Option<MoodEntry>, MoodError> {
        let Some(entry) = MoodEntry::new(text, at) else {
            return Ok(None);
        };

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry.clone());
        next.extend(self.entries.iter().cloned());
        self.commit(next)?;

        info!(date = %entry.date, "mood recorded");
        Ok(Some(entry))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<MoodEntry, MoodError> {
        if index >= self.entries.len() {
            return Err(MoodError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.entries.len(),
            });
        }

        let mut next = self.entries.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(index, "mood removed");
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), MoodError> {
        let removed = self.entries.len();
        self.commit(Vec::new())?;
        info!(removed, "moods cleared");
        Ok(())
    }

    pub fn export(&self) -> String {
        export_diary(&self.entries)
    }

    fn commit(&mut self, next: Vec<MoodEntry>) -> Result<(), MoodError> {
        let payload = serde_json::to_string(&next).map_err(crate::errors::StorageError::from)?;
        self.store.set(MOODS_KEY, &payload)?;
        self.entries = next;

        debug!(listeners = self.listeners.len(), total = self.entries.len(), "mood store changed");
        for listener in &self.listeners {
            listener(&self.entries);
        }
        Ok(())
    }
}

/// Plain-text diary: a header line, then `[date] text` per entry in list order.
pub fn export_diary(entries: &[MoodEntry]) -> String {
    let mut content = String::from(EXPORT_HEADER);
    for entry in entries {
        let _ = writeln!(content, "[{}] {}", entry.date, entry.text);
    }
    content
}
