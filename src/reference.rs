//! Program and site lookup lists backing the form's selectors.

use crate::models::{FichaStatus, Program, Site};
use crate::sync::ReferenceSource;

/// Holds the reference lists once loaded.
///
/// Fetch failures are logged and leave the affected list empty; they are
/// never reported to the user.
#[derive(Debug, Default)]
pub struct ReferenceDataLoader {
    programs: Vec<Program>,
    sites: Vec<Site>,
}

impl ReferenceDataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches programs and sites concurrently.
    pub async fn load<R: ReferenceSource>(&mut self, source: &R) {
        let (programs, sites) = tokio::join!(source.programs(), source.sites());

        self.programs = programs.unwrap_or_else(|e| {
            tracing::warn!("Failed to load programs: {}", e);
            Vec::new()
        });
        self.sites = sites.unwrap_or_else(|e| {
            tracing::warn!("Failed to load sites: {}", e);
            Vec::new()
        });

        tracing::info!(
            "Loaded {} program(s) and {} site(s)",
            self.programs.len(),
            self.sites.len()
        );
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The status selector's options; static, no fetch involved.
    pub fn statuses(&self) -> &'static [FichaStatus] {
        &FichaStatus::ALL
    }

    pub fn program_name(&self, id: i64) -> Option<&str> {
        self.programs
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    pub fn site_name(&self, id: i64) -> Option<&str> {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }
}
