//! Fichas client library
//!
//! Keeps a local list of cohort records ("fichas") in step with a remote
//! API, together with the single create/edit form used to change them and
//! the program/site lists that feed the form's selectors.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod notification;
pub mod reference;
pub mod store;
pub mod sync;

pub use config::{Config, ConfigError, ConfigSource, ConfigValue};
pub use controller::Controller;
pub use error::FichaError;
pub use form::{DraftField, FormController, FormDraft, FormMode, SubmitGuard, SubmitRequest};
pub use models::{date_part, Ficha, FichaStatus, Program, Site};
pub use notification::{Notification, NotificationKind, NotificationState};
pub use reference::ReferenceDataLoader;
pub use store::RecordStore;
pub use sync::{decode_list, ApiVersion, HttpSyncClient, ReferenceSource, SyncClient};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
