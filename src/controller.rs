//! Root composition of the ficha manager state.
//!
//! [`Controller`] owns the record list, the form, the reference lists and
//! the notification slot, and routes every user action through the API
//! client. Errors never escape as panics: each action turns its failure
//! into an error notification and also returns it to the caller.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::FichaError;
use crate::form::{DraftField, FormController, SubmitRequest};
use crate::models::Ficha;
use crate::notification::NotificationState;
use crate::reference::ReferenceDataLoader;
use crate::store::RecordStore;
use crate::sync::{ReferenceSource, SyncClient};

pub struct Controller<C> {
    client: C,
    store: RecordStore,
    form: FormController,
    reference: ReferenceDataLoader,
    notification: NotificationState,
    pending_deletes: PendingDeletes,
}

/// Codes with a delete request waiting for the server.
#[derive(Debug, Clone, Default)]
struct PendingDeletes(Arc<Mutex<HashSet<i64>>>);

impl PendingDeletes {
    /// Marks `code` as pending, or returns `None` if it already is.
    fn claim(&self, code: i64) -> Option<DeleteClaim> {
        if !self.lock().insert(code) {
            return None;
        }
        Some(DeleteClaim {
            pending: self.clone(),
            code,
        })
    }

    fn contains(&self, code: i64) -> bool {
        self.lock().contains(&code)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<i64>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its code when dropped, whether or not the request resolved.
struct DeleteClaim {
    pending: PendingDeletes,
    code: i64,
}

impl Drop for DeleteClaim {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.code);
    }
}

impl<C> Controller<C>
where
    C: SyncClient + ReferenceSource,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            store: RecordStore::new(),
            form: FormController::new(),
            reference: ReferenceDataLoader::new(),
            notification: NotificationState::new(),
            pending_deletes: PendingDeletes::default(),
        }
    }

    /// Loads the record list and the reference lists concurrently.
    ///
    /// Only a record list failure is reported; reference failures just
    /// leave their selector empty.
    pub async fn init(&mut self) {
        let (records, ()) = tokio::join!(
            self.store.load(&self.client),
            self.reference.load(&self.client)
        );

        if let Err(e) = records {
            tracing::error!("Failed to load fichas: {}", e);
            self.notification
                .set_error(format!("Could not load fichas: {}", e));
        }
    }

    /// Reloads only the record list.
    pub async fn reload(&mut self) -> Result<usize, FichaError> {
        self.notification.clear();
        let result = self.store.load(&self.client).await;
        if let Err(e) = &result {
            self.notification
                .set_error(format!("Could not load fichas: {}", e));
        }
        result
    }

    /// Switches the form to edit the stored ficha with `code`.
    pub fn begin_edit(&mut self, code: i64) -> Result<(), FichaError> {
        let result = match self.store.get(code) {
            Some(record) => self.form.begin_edit(record),
            None => Err(FichaError::Validation(format!("ficha {} not found", code))),
        };
        if let Err(e) = &result {
            self.notification.set_error(e.to_string());
        }
        result
    }

    /// Abandons the current draft.
    pub fn cancel_edit(&mut self) -> Result<(), FichaError> {
        let result = self.form.cancel();
        if let Err(e) = &result {
            self.notification.set_error(e.to_string());
        }
        result
    }

    /// Sets one field of the draft from its text form.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), FichaError> {
        let result = self.form.set_field(field, value);
        if let Err(e) = &result {
            self.notification.set_error(e.to_string());
        }
        result
    }

    /// Sends the draft as a create or an update depending on the form mode.
    pub async fn submit(&mut self) -> Result<Ficha, FichaError> {
        self.notification.clear();

        let request = match self.form.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                self.notification.set_error(e.to_string());
                return Err(e);
            }
        };

        // frees the form even if this future is dropped mid-request
        let guard = self.form.in_flight_guard();
        let outcome = match &request {
            SubmitRequest::Create(ficha) => self.client.create(ficha).await,
            SubmitRequest::Update { code, ficha } => self.client.update(*code, ficha).await,
        };

        match (request, guard.finish(outcome)) {
            (SubmitRequest::Create(_), Ok(saved)) => {
                tracing::info!("Created ficha {}", saved.code);
                self.store.insert(saved.clone());
                self.notification
                    .set_success(format!("Ficha {} created successfully.", saved.code));
                Ok(saved)
            }
            (SubmitRequest::Update { code, .. }, Ok(saved)) => {
                tracing::info!("Updated ficha {}", code);
                self.store.replace(code, saved.clone());
                self.notification
                    .set_success(format!("Ficha {} updated successfully.", code));
                Ok(saved)
            }
            (SubmitRequest::Create(ficha), Err(e)) => {
                tracing::warn!("Create of ficha {} failed: {}", ficha.code, e);
                self.notification
                    .set_error(format!("Could not create ficha: {}", e));
                Err(e)
            }
            (SubmitRequest::Update { code, .. }, Err(e)) => {
                tracing::warn!("Update of ficha {} failed: {}", code, e);
                self.notification
                    .set_error(format!("Could not update ficha {}: {}", code, e));
                Err(e)
            }
        }
    }

    /// Deletes the ficha with `code` on the server, then locally.
    pub async fn delete(&mut self, code: i64) -> Result<(), FichaError> {
        self.notification.clear();

        let Some(claim) = self.pending_deletes.claim(code) else {
            let err = FichaError::RequestInFlight(format!("ficha {}", code));
            self.notification.set_error(err.to_string());
            return Err(err);
        };

        let result = self.client.delete(code).await;
        drop(claim);

        match result {
            Ok(()) => {
                tracing::info!("Deleted ficha {}", code);
                self.store.remove(code);
                // an edit of a ficha that no longer exists could never be saved
                if self.form.selected().map(|f| f.code) == Some(code) {
                    self.form.reset();
                }
                self.notification
                    .set_success(format!("Ficha {} deleted successfully.", code));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Delete of ficha {} failed: {}", code, e);
                self.notification
                    .set_error(format!("Could not delete ficha {}: {}", code, e));
                Err(e)
            }
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn reference(&self) -> &ReferenceDataLoader {
        &self.reference
    }

    pub fn notification(&self) -> &NotificationState {
        &self.notification
    }
}
