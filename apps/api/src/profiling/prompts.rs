// All LLM prompt constants for the Profiling module.

/// Writing-sample analysis prompt.
/// Replace: {json_instruction}, {trait_template}, then {writing_sample} last so
/// placeholder-looking text inside the sample is left alone.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Please analyze the writing style and personality of the given writing sample. Provide a detailed assessment of their characteristics using the following template. Rate each applicable characteristic on a scale of 1-10 where relevant, or provide a descriptive value. {json_instruction}

{trait_template}

Writing Sample:
{writing_sample}"#;
