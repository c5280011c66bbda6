// Profiling: writing sample in, trait profile out.
// All model calls go through llm_client — no direct HTTP here.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod profile;
pub mod prompts;
pub mod schema;
