// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Opens the persona system prompt.
pub const PERSONA_PREAMBLE: &str = "You are a writer with the following characteristics:";

/// Follows the trait groups, before the title instruction.
pub const PERSONA_CLOSING: &str = "Write in a way that naturally reflects these characteristics.";

/// Prefixes the caller's topic on the final line of the prompt.
pub const TOPIC_PREFIX: &str = "Write about: ";
