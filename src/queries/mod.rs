//! Query/aggregation layer.
//!
//! `InsightsService` is the one context object the presentation layer
//! talks to: it owns the read-only corpus and the mutable annotation
//! store, and every operation hangs off it. Reads flow corpus → queries →
//! caller, with the store overlaid where user state takes precedence
//! (alerts, exemplar flags); writes flow caller → store.

pub mod alerts;
pub mod briefs;
pub mod exemplars;
pub mod performance;
pub mod search;
pub mod tips;

use crate::corpus::Corpus;
use crate::error::StoreError;
use crate::store::AnnotationStore;
use crate::summary;
use crate::types::{Agent, Call, CallSummary, DailyMetric};

pub struct InsightsService {
    corpus: Corpus,
    store: AnnotationStore,
}

impl InsightsService {
    pub fn new(corpus: Corpus, store: AnnotationStore) -> Self {
        Self { corpus, store }
    }

    /// Open the service and run first-load seeding: if the store has never
    /// been seeded, the generator's alert list is copied in once.
    pub fn open(corpus: Corpus, mut store: AnnotationStore) -> Result<Self, StoreError> {
        store.seed_alerts(&corpus.alerts, false)?;
        Ok(Self { corpus, store })
    }

    /// Demo reset: wipe every annotation collection and re-seed
    /// immediately from the generator alerts.
    pub fn reset_demo_data(&mut self) -> Result<(), StoreError> {
        self.store.reset_and_reseed(&self.corpus.alerts)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Direct mutable access for annotation writes the thin wrappers here
    /// don't cover (notes, bookmarks, settings, notifications).
    pub fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    pub fn agents(&self) -> &[Agent] {
        &self.corpus.agents
    }

    pub fn get_call(&self, call_id: &str) -> Option<&Call> {
        self.corpus.call(call_id)
    }

    /// Synthesize the summary for a call, or `None` when the id is unknown.
    pub fn get_summary(&self, call_id: &str) -> Option<CallSummary> {
        self.corpus.call(call_id).map(summary::synthesize)
    }

    pub fn daily_metrics(&self) -> &[DailyMetric] {
        &self.corpus.daily_metrics
    }

    pub fn calls_by_agent(&self, agent_id: &str) -> Vec<&Call> {
        self.corpus.calls_by_agent(agent_id)
    }
}
