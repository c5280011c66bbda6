use std::sync::Arc;

use crate::generation::generator::Generator;
use crate::profiling::analyzer::Profiler;
use crate::storage::PostStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiler: Profiler,
    pub generator: Generator,
    /// Pluggable post store. `FileStore` when POSTS_DIR is set, `NoopStore` otherwise.
    pub store: Arc<dyn PostStore>,
}
