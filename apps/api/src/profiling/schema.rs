//! Trait schema — the fixed, ordered vocabulary a writing sample is rated against.
//!
//! The analysis prompt is rendered from this table, and extracted profiles are
//! checked against it. Order matters: it is the order the model sees.

use serde_json::Value;

/// How a single trait is expected to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitKind {
    /// Integer rating, 1 through 10 inclusive.
    Scale,
    /// Short label. When `open` is set the options are only examples ("etc.").
    Category {
        options: &'static [&'static str],
        open: bool,
    },
    /// Free text. The hint is what the template shows inside the brackets.
    Description(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitSpec {
    pub name: &'static str,
    pub kind: TraitKind,
}

pub const SCALE_MIN: i64 = 1;
pub const SCALE_MAX: i64 = 10;

const fn scale(name: &'static str) -> TraitSpec {
    TraitSpec {
        name,
        kind: TraitKind::Scale,
    }
}

const fn category(name: &'static str, options: &'static [&'static str]) -> TraitSpec {
    TraitSpec {
        name,
        kind: TraitKind::Category {
            options,
            open: false,
        },
    }
}

const fn open_category(name: &'static str, options: &'static [&'static str]) -> TraitSpec {
    TraitSpec {
        name,
        kind: TraitKind::Category {
            options,
            open: true,
        },
    }
}

const fn description(name: &'static str, hint: &'static str) -> TraitSpec {
    TraitSpec {
        name,
        kind: TraitKind::Description(hint),
    }
}

pub const TRAIT_SCHEMA: &[TraitSpec] = &[
    description("name", "Author/Character Name"),
    scale("vocabulary_complexity"),
    category("sentence_structure", &["simple", "complex", "varied"]),
    category("paragraph_organization", &["structured", "loose", "stream-of-consciousness"]),
    scale("idiom_usage"),
    scale("metaphor_frequency"),
    scale("simile_frequency"),
    open_category("tone", &["formal", "informal", "academic", "conversational"]),
    category("punctuation_style", &["minimal", "heavy", "unconventional"]),
    scale("contraction_usage"),
    open_category("pronoun_preference", &["first-person", "third-person"]),
    scale("passive_voice_frequency"),
    scale("rhetorical_question_usage"),
    scale("list_usage_tendency"),
    scale("personal_anecdote_inclusion"),
    scale("pop_culture_reference_frequency"),
    scale("technical_jargon_usage"),
    scale("parenthetical_aside_frequency"),
    scale("humor_sarcasm_usage"),
    scale("emotional_expressiveness"),
    scale("emphatic_device_usage"),
    scale("quotation_frequency"),
    scale("analogy_usage"),
    scale("sensory_detail_inclusion"),
    scale("onomatopoeia_usage"),
    scale("alliteration_frequency"),
    category("word_length_preference", &["short", "long", "varied"]),
    scale("foreign_phrase_usage"),
    scale("rhetorical_device_usage"),
    scale("statistical_data_usage"),
    scale("personal_opinion_inclusion"),
    scale("transition_usage"),
    scale("reader_question_frequency"),
    scale("imperative_sentence_usage"),
    scale("dialogue_inclusion"),
    scale("regional_dialect_usage"),
    scale("hedging_language_frequency"),
    category("language_abstraction", &["concrete", "abstract", "mixed"]),
    scale("personal_belief_inclusion"),
    scale("repetition_usage"),
    scale("subordinate_clause_frequency"),
    category("verb_type_preference", &["active", "stative", "mixed"]),
    scale("sensory_imagery_usage"),
    scale("symbolism_usage"),
    scale("digression_frequency"),
    scale("formality_level"),
    scale("reflection_inclusion"),
    scale("irony_usage"),
    scale("neologism_frequency"),
    scale("ellipsis_usage"),
    scale("cultural_reference_inclusion"),
    scale("stream_of_consciousness_usage"),
    scale("openness_to_experience"),
    scale("conscientiousness"),
    scale("extraversion"),
    scale("agreeableness"),
    scale("emotional_stability"),
    open_category("dominant_motivations", &["achievement", "affiliation", "power"]),
    open_category("core_values", &["integrity", "freedom", "knowledge"]),
    open_category("decision_making_style", &["analytical", "intuitive", "spontaneous"]),
    scale("empathy_level"),
    scale("self_confidence"),
    scale("risk_taking_tendency"),
    category("idealism_vs_realism", &["idealistic", "realistic", "mixed"]),
    open_category("conflict_resolution_style", &["assertive", "collaborative", "avoidant"]),
    category("relationship_orientation", &["independent", "communal", "mixed"]),
    category("emotional_response_tendency", &["calm", "reactive", "intense"]),
    scale("creativity_level"),
    description("age", "age or age range"),
    description("gender", "gender"),
    description("education_level", "highest level of education"),
    description("professional_background", "brief description"),
    description("cultural_background", "brief description"),
    description("primary_language", "language"),
    category("language_fluency", &["native", "fluent", "intermediate", "beginner"]),
];

/// Looks up a trait by name.
pub fn find(name: &str) -> Option<&'static TraitSpec> {
    TRAIT_SCHEMA.iter().find(|spec| spec.name == name)
}

impl TraitSpec {
    /// The bracketed placeholder shown to the model, e.g. `[1-10]` or `"[short/long/varied]"`.
    pub fn placeholder(&self) -> String {
        match self.kind {
            TraitKind::Scale => format!("[{SCALE_MIN}-{SCALE_MAX}]"),
            TraitKind::Category { options, open } => {
                let mut joined = options.join("/");
                if open {
                    joined.push_str("/etc.");
                }
                format!("\"[{joined}]\"")
            }
            TraitKind::Description(hint) => format!("\"[{hint}]\""),
        }
    }

    /// Human-readable statement of what a valid value looks like.
    pub fn expected(&self) -> String {
        match self.kind {
            TraitKind::Scale => format!("integer {SCALE_MIN}-{SCALE_MAX}"),
            TraitKind::Category { options, open: false } => {
                format!("one of {}", options.join("/"))
            }
            TraitKind::Category { open: true, .. } => "short label".to_string(),
            TraitKind::Description(_) => "text".to_string(),
        }
    }

    /// Checks a single extracted value. Closed categories compare case-insensitively.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.kind {
            TraitKind::Scale => {
                integral(value).is_some_and(|v| (SCALE_MIN..=SCALE_MAX).contains(&v))
            }
            TraitKind::Category { options, open } => match value.as_str() {
                Some(label) if open => !label.trim().is_empty(),
                Some(label) => options
                    .iter()
                    .any(|o| o.eq_ignore_ascii_case(label.trim())),
                None => false,
            },
            TraitKind::Description(_) => value.is_string(),
        }
    }
}

/// Integer value of a JSON number, accepting integral floats such as `4.0`.
pub fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && v.abs() <= i64::MAX as f64)
            .map(|v| v as i64)
    })
}

/// Renders the full trait template, one `"name": placeholder,` line per trait.
pub fn render_template() -> String {
    TRAIT_SCHEMA
        .iter()
        .map(|spec| format!("\"{}\": {},", spec.name, spec.placeholder()))
        .collect::<Vec<_>>()
        .join("\n")
}
