//! Persona — a trait profile read through fixed named fields.
//!
//! Every field is optional. A missing or blank field renders as a placeholder
//! in the generation prompt instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::profiling::profile::TraitProfile;
use crate::profiling::schema::{self, TraitKind};

/// Rendered in place of a field the persona does not carry.
pub const MISSING_PLACEHOLDER: &str = "unspecified";

/// A single persona value, kept as loosely typed as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(Number),
    Text(String),
    Other(Value),
}

impl TraitValue {
    /// Same mapping as deserializing an `Option<TraitValue>`: null is `None`.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(TraitValue::Number(n.clone())),
            Value::String(text) => Some(TraitValue::Text(text.clone())),
            other => Some(TraitValue::Other(other.clone())),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            TraitValue::Text(text) => text.trim().is_empty(),
            TraitValue::Other(value) => value.is_null(),
            TraitValue::Number(_) => false,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Number(n) => write!(f, "{n}"),
            TraitValue::Text(text) => f.write_str(text.trim()),
            TraitValue::Other(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TraitValue>,

    // Writing style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_complexity: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_structure: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_organization: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punctuation_style: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronoun_preference: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality_level: Option<TraitValue>,

    // Language patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idiom_usage: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metaphor_frequency: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simile_frequency: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_jargon_usage: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humor_sarcasm_usage: Option<TraitValue>,

    // Personality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openness_to_experience: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conscientiousness: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraversion: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreeableness: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_stability: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_motivations: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_values: Option<TraitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_making_style: Option<TraitValue>,

    /// Every other profile key, carried through untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A labelled group of persona fields, in prompt order.
pub struct FieldGroup {
    pub label: &'static str,
    pub fields: &'static [&'static str],
}

pub const FIELD_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        label: "Writing Style",
        fields: &[
            "vocabulary_complexity",
            "sentence_structure",
            "paragraph_organization",
            "tone",
            "punctuation_style",
            "pronoun_preference",
            "formality_level",
        ],
    },
    FieldGroup {
        label: "Language Patterns",
        fields: &[
            "idiom_usage",
            "metaphor_frequency",
            "simile_frequency",
            "technical_jargon_usage",
            "humor_sarcasm_usage",
        ],
    },
    FieldGroup {
        label: "Personality",
        fields: &[
            "openness_to_experience",
            "conscientiousness",
            "extraversion",
            "agreeableness",
            "emotional_stability",
            "dominant_motivations",
            "core_values",
            "decision_making_style",
        ],
    },
];

impl Persona {
    /// Reads a profile through the named fields. Keys outside them land in `other`;
    /// a null named field stays unset.
    pub fn from_profile(profile: &TraitProfile) -> Self {
        let mut persona = Persona::default();
        for (key, value) in profile.as_map() {
            match persona.field_mut(key) {
                Some(slot) => *slot = TraitValue::from_json(value),
                None => {
                    persona.other.insert(key.clone(), value.clone());
                }
            }
        }
        persona
    }

    /// Looks up one of the named fields.
    pub fn field(&self, name: &str) -> Option<&TraitValue> {
        let value = match name {
            "name" => &self.name,
            "vocabulary_complexity" => &self.vocabulary_complexity,
            "sentence_structure" => &self.sentence_structure,
            "paragraph_organization" => &self.paragraph_organization,
            "tone" => &self.tone,
            "punctuation_style" => &self.punctuation_style,
            "pronoun_preference" => &self.pronoun_preference,
            "formality_level" => &self.formality_level,
            "idiom_usage" => &self.idiom_usage,
            "metaphor_frequency" => &self.metaphor_frequency,
            "simile_frequency" => &self.simile_frequency,
            "technical_jargon_usage" => &self.technical_jargon_usage,
            "humor_sarcasm_usage" => &self.humor_sarcasm_usage,
            "openness_to_experience" => &self.openness_to_experience,
            "conscientiousness" => &self.conscientiousness,
            "extraversion" => &self.extraversion,
            "agreeableness" => &self.agreeableness,
            "emotional_stability" => &self.emotional_stability,
            "dominant_motivations" => &self.dominant_motivations,
            "core_values" => &self.core_values,
            "decision_making_style" => &self.decision_making_style,
            _ => return None,
        };
        value.as_ref()
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Option<TraitValue>> {
        let slot = match name {
            "name" => &mut self.name,
            "vocabulary_complexity" => &mut self.vocabulary_complexity,
            "sentence_structure" => &mut self.sentence_structure,
            "paragraph_organization" => &mut self.paragraph_organization,
            "tone" => &mut self.tone,
            "punctuation_style" => &mut self.punctuation_style,
            "pronoun_preference" => &mut self.pronoun_preference,
            "formality_level" => &mut self.formality_level,
            "idiom_usage" => &mut self.idiom_usage,
            "metaphor_frequency" => &mut self.metaphor_frequency,
            "simile_frequency" => &mut self.simile_frequency,
            "technical_jargon_usage" => &mut self.technical_jargon_usage,
            "humor_sarcasm_usage" => &mut self.humor_sarcasm_usage,
            "openness_to_experience" => &mut self.openness_to_experience,
            "conscientiousness" => &mut self.conscientiousness,
            "extraversion" => &mut self.extraversion,
            "agreeableness" => &mut self.agreeableness,
            "emotional_stability" => &mut self.emotional_stability,
            "dominant_motivations" => &mut self.dominant_motivations,
            "core_values" => &mut self.core_values,
            "decision_making_style" => &mut self.decision_making_style,
            _ => return None,
        };
        Some(slot)
    }

    /// Renders `<field>: <value>`. Scale traits get a `/10` suffix; absent or
    /// blank values become `MISSING_PLACEHOLDER` without one.
    pub fn render_field(&self, name: &str) -> String {
        let is_scale = schema::find(name).is_some_and(|spec| spec.kind == TraitKind::Scale);
        match self.field(name) {
            Some(value) if !value.is_blank() && is_scale => format!("{name}: {value}/10"),
            Some(value) if !value.is_blank() => format!("{name}: {value}"),
            _ => format!("{name}: {MISSING_PLACEHOLDER}"),
        }
    }

    /// Fields of `FIELD_GROUPS` the persona does not carry.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FIELD_GROUPS
            .iter()
            .flat_map(|group| group.fields.iter().copied())
            .filter(|name| self.field(name).map_or(true, TraitValue::is_blank))
            .collect()
    }
}
