// Cross-cutting prompt fragments.
// Each module that calls the model keeps its own prompts.rs; only fragments
// shared between them live here.

/// Closes every prompt whose reply is parsed as a JSON object.
pub const JSON_RESULT_INSTRUCTION: &str = "Return the results in a JSON format.";

/// Closes every generation system prompt. The title is not parsed back out.
pub const TITLE_INSTRUCTION: &str = "The response should include a title.";
