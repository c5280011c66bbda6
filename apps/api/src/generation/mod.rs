// Generation: persona + topic in, text in that voice out.
// All model calls go through llm_client — no direct HTTP here.

pub mod generator;
pub mod handlers;
pub mod persona;
pub mod prompts;
