//! Data and query core for the Connect Insights demo console.
//!
//! Everything the supervisor and agent views show comes from three layers:
//!
//! - [`corpus`]: a generator-produced, read-only population of agents,
//!   calls, initial alerts, and daily rollups (mock data, no backend).
//! - [`queries`]: the [`queries::InsightsService`] context object answering
//!   search, alert, brief, performance, exemplar, and coaching-tip
//!   queries, overlaying annotation-store state where user edits win.
//! - [`store`]: the persisted annotation layer for everything
//!   user-introduced, with a one-time seeding contract and an injected
//!   [`store::Storage`] backend.
//!
//! There is no network and no real sentiment model; the only asynchrony is
//! the simulated latency on [`queries::InsightsService::search_calls`].

pub mod corpus;
pub mod error;
pub mod export;
pub mod queries;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;
pub mod util;

pub use corpus::Corpus;
pub use error::StoreError;
pub use queries::InsightsService;
pub use session::SessionStore;
pub use store::{AnnotationStore, JsonFileStorage, MemoryStorage, Storage};

/// Initialize env-filtered logging. Safe to call more than once; later
/// calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}

/// Wire up a ready-to-use service over the default on-disk storage
/// location: generate the corpus, open the annotation store, and run
/// first-load seeding.
pub fn bootstrap() -> Result<InsightsService, StoreError> {
    let data_dir = store::default_data_dir();
    let storage =
        JsonFileStorage::<store::PersistedState>::new(data_dir.join("annotations.json"));
    let store = AnnotationStore::open(Box::new(storage));
    InsightsService::open(Corpus::generate_default(), store)
}
