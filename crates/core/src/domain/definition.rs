// Definition providers: immutable dictionary text or editable custom text

use super::issues::Issues;
use super::resource::{DictionarySense, Synonym};
use serde::{Deserialize, Serialize};

/// Run of gloss text, optionally linked to another dictionary sense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossSegment {
    pub text: String,
    pub linked_sense: Option<String>,
}

/// Definition sourced from the dictionary resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryDefinition {
    legacy_id: String,
    synonyms: Vec<Synonym>,
    gloss: String,
    annotations: Vec<(usize, usize, String)>,
    examples: Vec<String>,
}

impl DictionaryDefinition {
    pub fn from_sense(sense: &DictionarySense) -> Self {
        Self {
            legacy_id: sense.legacy_id.clone(),
            synonyms: sense.info.synonyms.clone(),
            gloss: sense.gloss.string.clone(),
            annotations: sense.gloss.annotations.clone(),
            examples: sense.info.examples.clone(),
        }
    }

    pub fn legacy_id(&self) -> &str {
        &self.legacy_id
    }

    /// `[syn a, syn b] gloss, e.g. example 1, example 2`
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        if !self.synonyms.is_empty() {
            let synonyms: Vec<String> = self
                .synonyms
                .iter()
                .map(|s| s.string.replace('_', " "))
                .collect();
            text.push('[');
            text.push_str(&synonyms.join(", "));
            text.push_str("] ");
        }
        text.push_str(&self.gloss);
        if !self.examples.is_empty() {
            text.push_str(", e.g. ");
            text.push_str(&self.examples.join(", "));
        }
        text
    }

    /// Gloss split into plain and linked runs following the annotation spans
    pub fn segments(&self) -> Vec<GlossSegment> {
        let chars: Vec<char> = self.gloss.chars().collect();
        let slice = |start: usize, end: usize| -> String {
            let end = end.min(chars.len());
            let start = start.min(end);
            chars[start..end].iter().collect()
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for (start, end, sense_id) in &self.annotations {
            if *start > cursor {
                segments.push(GlossSegment {
                    text: slice(cursor, *start),
                    linked_sense: None,
                });
            }
            segments.push(GlossSegment {
                text: slice(*start, *end),
                linked_sense: Some(sense_id.clone()),
            });
            cursor = cursor.max(*end);
        }
        if cursor < chars.len() {
            segments.push(GlossSegment {
                text: slice(cursor, chars.len()),
                linked_sense: None,
            });
        }
        segments
    }
}

/// Free-form definition written by the annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDefinition {
    text: String,
    /// Text the definition was seeded with when a sense was split
    original: Option<String>,
}

impl CustomDefinition {
    /// Empty definition for a virtual sense
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            original: None,
        }
    }

    /// Definition pre-filled with the text of the sense being split
    pub fn seeded(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: Some(text.clone()),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
}

/// Source text of a sense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Definition {
    Dictionary(DictionaryDefinition),
    Custom(CustomDefinition),
}

impl Definition {
    pub fn plain_text(&self) -> String {
        match self {
            Definition::Dictionary(d) => d.plain_text(),
            Definition::Custom(c) => c.text.clone(),
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Definition::Custom(_))
    }

    pub fn issues(&self, outward_id: &str) -> Issues {
        let mut issues = Issues::new();
        if let Definition::Custom(custom) = self {
            if custom.text.is_empty() {
                issues.add_issue(format!("{} does not have a definition.", outward_id));
            }
            if custom.original.as_deref() == Some(custom.text.as_str()) {
                issues.add_issue(format!(
                    "{}'s definition is unmodified after split.",
                    outward_id
                ));
            }
        }
        issues
    }
}
