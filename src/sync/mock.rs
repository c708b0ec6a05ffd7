//! Scripted in-memory API used by controller tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{ReferenceSource, SyncClient};
use crate::error::FichaError;
use crate::models::{Ficha, Program, Site};

/// A call received by [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Ficha),
    Update(i64, Ficha),
    Delete(i64),
    Programs,
    Sites,
}

/// Answers from queued responses, falling back to echoing the payload.
#[derive(Default)]
pub struct MockClient {
    pub calls: RefCell<Vec<Call>>,
    pub list: RefCell<VecDeque<Result<Vec<Ficha>, FichaError>>>,
    pub create: RefCell<VecDeque<Result<Ficha, FichaError>>>,
    pub update: RefCell<VecDeque<Result<Ficha, FichaError>>>,
    pub delete: RefCell<VecDeque<Result<(), FichaError>>>,
    pub programs: RefCell<Option<Result<Vec<Program>, FichaError>>>,
    pub sites: RefCell<Option<Result<Vec<Site>, FichaError>>>,
    stalled: Cell<bool>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, fichas: Vec<Ficha>) -> Self {
        self.list.borrow_mut().push_back(Ok(fichas));
        self
    }

    pub fn with_reference(self, programs: Vec<Program>, sites: Vec<Site>) -> Self {
        *self.programs.borrow_mut() = Some(Ok(programs));
        *self.sites.borrow_mut() = Some(Ok(sites));
        self
    }

    pub fn fail_next_list(&self, err: FichaError) {
        self.list.borrow_mut().push_back(Err(err));
    }

    pub fn fail_next_create(&self, err: FichaError) {
        self.create.borrow_mut().push_back(Err(err));
    }

    pub fn fail_next_update(&self, err: FichaError) {
        self.update.borrow_mut().push_back(Err(err));
    }

    pub fn fail_next_delete(&self, err: FichaError) {
        self.delete.borrow_mut().push_back(Err(err));
    }

    pub fn fail_sites(&self, err: FichaError) {
        *self.sites.borrow_mut() = Some(Err(err));
    }

    /// While set, create/update/delete never answer.
    pub fn stall_writes(&self, stalled: bool) {
        self.stalled.set(stalled);
    }

    async fn wait_if_stalled(&self) {
        if self.stalled.get() {
            std::future::pending::<()>().await;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of create/update/delete calls received.
    pub fn write_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .count()
    }
}

impl SyncClient for MockClient {
    async fn list(&self) -> Result<Vec<Ficha>, FichaError> {
        self.calls.borrow_mut().push(Call::List);
        self.list.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn create(&self, ficha: &Ficha) -> Result<Ficha, FichaError> {
        self.calls.borrow_mut().push(Call::Create(ficha.clone()));
        self.wait_if_stalled().await;
        self.create
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ficha.clone()))
    }

    async fn update(&self, code: i64, ficha: &Ficha) -> Result<Ficha, FichaError> {
        self.calls.borrow_mut().push(Call::Update(code, ficha.clone()));
        self.wait_if_stalled().await;
        self.update
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ficha.clone()))
    }

    async fn delete(&self, code: i64) -> Result<(), FichaError> {
        self.calls.borrow_mut().push(Call::Delete(code));
        self.wait_if_stalled().await;
        self.delete.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

impl ReferenceSource for MockClient {
    async fn programs(&self) -> Result<Vec<Program>, FichaError> {
        self.calls.borrow_mut().push(Call::Programs);
        self.programs.borrow().clone().unwrap_or(Ok(Vec::new()))
    }

    async fn sites(&self) -> Result<Vec<Site>, FichaError> {
        self.calls.borrow_mut().push(Call::Sites);
        self.sites.borrow().clone().unwrap_or(Ok(Vec::new()))
    }
}
