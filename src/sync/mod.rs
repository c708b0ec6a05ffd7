//! Remote API access for fichas and their reference data.
//!
//! The rest of the crate only talks to the server through the
//! [`SyncClient`] and [`ReferenceSource`] traits, so the controller can be
//! driven by [`HttpSyncClient`] in production and by an in-memory double in
//! tests.
//!
//! # Endpoints
//!
//! - `GET /fichas`: list (shape depends on [`ApiVersion`])
//! - `POST /fichas`: create
//! - `PUT /fichas/{code}`: update
//! - `DELETE /fichas/{code}`: delete
//! - `GET /programas`, `GET /sedes`: reference lists

mod envelope;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use envelope::{decode_list, ApiVersion};
pub use http::HttpSyncClient;

use crate::error::FichaError;
use crate::models::{Ficha, Program, Site};

/// CRUD contract for fichas.
///
/// Every call returns the server's canonical view of the record; callers
/// must not assume their own payload was stored verbatim.
#[allow(async_fn_in_trait)]
pub trait SyncClient {
    async fn list(&self) -> Result<Vec<Ficha>, FichaError>;

    async fn create(&self, ficha: &Ficha) -> Result<Ficha, FichaError>;

    async fn update(&self, code: i64, ficha: &Ficha) -> Result<Ficha, FichaError>;

    async fn delete(&self, code: i64) -> Result<(), FichaError>;
}

/// Read-only lookup lists used to fill the program and site selectors.
#[allow(async_fn_in_trait)]
pub trait ReferenceSource {
    async fn programs(&self) -> Result<Vec<Program>, FichaError>;

    async fn sites(&self) -> Result<Vec<Site>, FichaError>;
}
