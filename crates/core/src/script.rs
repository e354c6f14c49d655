//! Conversation script: the fixed, ordered list of entries the persona
//! "says" (and the visitor "replies") during the opening sequence.

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// Who an entry is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The portfolio owner
    Persona,
    /// The simulated visitor
    Visitor,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Persona => "persona",
            Speaker::Visitor => "visitor",
        }
    }
}

/// What an entry renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EntryBody {
    /// Plain message bubble
    Text { text: String },
    /// Row of skill chips; `caption` is the plain-text fallback
    SkillBubble { caption: String, skills: Vec<String> },
}

/// One line of the conversation script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub speaker: Speaker,
    #[serde(flatten)]
    pub body: EntryBody,
    /// Delay after the previous entry's reveal
    pub delay_ms: u64,
}

impl ScriptEntry {
    pub fn text(speaker: Speaker, text: impl Into<String>, delay_ms: u64) -> Self {
        Self { speaker, body: EntryBody::Text { text: text.into() }, delay_ms }
    }

    pub fn skills<I, S>(speaker: Speaker, caption: impl Into<String>, skills: I, delay_ms: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            speaker,
            body: EntryBody::SkillBubble {
                caption: caption.into(),
                skills: skills.into_iter().map(Into::into).collect(),
            },
            delay_ms,
        }
    }

    pub fn is_persona(&self) -> bool {
        self.speaker == Speaker::Persona
    }

    /// Skill tags when this is a skill bubble
    pub fn skill_tags(&self) -> Option<&[String]> {
        match &self.body {
            EntryBody::SkillBubble { skills, .. } => Some(skills),
            EntryBody::Text { .. } => None,
        }
    }

    /// Text for plain-text contexts (logs, the `plan` report)
    pub fn summary(&self) -> String {
        match &self.body {
            EntryBody::Text { text } => text.clone(),
            EntryBody::SkillBubble { caption, skills } => format!("{} [{}]", caption, skills.join(", ")),
        }
    }

    fn check(&self, index: usize) -> Result<(), ScriptError> {
        match &self.body {
            EntryBody::Text { text } if text.trim().is_empty() => Err(ScriptError::EmptyText { index }),
            EntryBody::SkillBubble { skills, .. } if skills.is_empty() || skills.iter().any(|s| s.trim().is_empty()) => {
                Err(ScriptError::EmptySkillTags { index })
            }
            _ => Ok(()),
        }
    }
}

/// A validated, immutable script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Script {
    entries: Vec<ScriptEntry>,
}

impl Script {
    /// Build a script, rejecting malformed entries
    pub fn new(entries: Vec<ScriptEntry>) -> Result<Self, ScriptError> {
        if entries.is_empty() {
            return Err(ScriptError::Empty);
        }

        for (index, entry) in entries.iter().enumerate() {
            entry.check(index)?;
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ScriptEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptEntry> {
        self.entries.iter()
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<ScriptEntry>::deserialize(deserializer)?;
        Script::new(entries).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a ScriptEntry;
    type IntoIter = std::slice::Iter<'a, ScriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
