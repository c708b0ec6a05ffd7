//! In-memory list of fichas mirroring the last successful server response.

use crate::error::FichaError;
use crate::models::Ficha;
use crate::sync::SyncClient;

/// Ordered collection of fichas keyed by `code`.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Ficha>,
    loaded: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with the server's list.
    ///
    /// On failure the collection is emptied; stale rows are never kept.
    pub async fn load<C: SyncClient>(&mut self, client: &C) -> Result<usize, FichaError> {
        match client.list().await {
            Ok(records) => {
                tracing::info!("Loaded {} ficha(s)", records.len());
                self.records = records;
                self.loaded = true;
                Ok(self.records.len())
            }
            Err(e) => {
                self.records.clear();
                self.loaded = false;
                Err(e)
            }
        }
    }

    /// Appends a freshly created ficha.
    pub fn insert(&mut self, record: Ficha) {
        self.records.push(record);
    }

    /// Swaps the ficha stored under `code` for `record`.
    ///
    /// Returns false, leaving the store untouched, when no ficha matches.
    pub fn replace(&mut self, code: i64, record: Ficha) -> bool {
        match self.records.iter_mut().find(|r| r.code == code) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                tracing::warn!("Dropping update for ficha {}: not in the list", code);
                false
            }
        }
    }

    /// Removes the ficha stored under `code`, returning it if present.
    pub fn remove(&mut self, code: i64) -> Option<Ficha> {
        let index = self.records.iter().position(|r| r.code == code)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, code: i64) -> Option<&Ficha> {
        self.records.iter().find(|r| r.code == code)
    }

    pub fn records(&self) -> &[Ficha] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the last load succeeded.
    ///
    /// An empty store that is not loaded has no list to show, as opposed to
    /// a server that simply has no fichas.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
