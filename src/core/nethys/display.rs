//! Display Records
//!
//! The render-ready output handed back to the chat layer. Records are built
//! once per lookup and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::category::{CategoryProfile, NOT_AVAILABLE};
use super::extract::{ExtractedField, ExtractedFields};

/// Appended to the entry name in the title of a successful lookup.
pub const LINK_SUFFIX: &str = " • 🔗";
/// Wraps each trait token.
pub const TRAIT_MARKER: &str = "`";
pub const NETWORK_ERROR_TITLE: &str = "Network Error";
pub const ERROR_TITLE: &str = "Error";
pub const NETWORK_ERROR_DESCRIPTION: &str = "Could not connect to Archives of Nethys.";

// ============================================================================
// Palette
// ============================================================================

/// Fixed record colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum EmbedColor {
    /// Discord blurple, used for successful lookups.
    Accent,
    /// Red, used for not-found and failure records.
    Danger,
}

impl EmbedColor {
    pub const fn rgb(self) -> u32 {
        match self {
            EmbedColor::Accent => 0x5865F2,
            EmbedColor::Danger => 0xFF0000,
        }
    }
}

impl From<EmbedColor> for u32 {
    fn from(color: EmbedColor) -> Self {
        color.rgb()
    }
}

impl TryFrom<u32> for EmbedColor {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, String> {
        match value {
            v if v == EmbedColor::Accent.rgb() => Ok(EmbedColor::Accent),
            v if v == EmbedColor::Danger.rgb() => Ok(EmbedColor::Danger),
            other => Err(format!("color {:#08X} is not in the palette", other)),
        }
    }
}

// ============================================================================
// Record Types
// ============================================================================

/// Which outcome produced a record. Not-found and failure records currently
/// share a color; this keeps them distinguishable for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Found,
    NotFound,
    NetworkError,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// Normalized output of one lookup, independent of any chat UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub kind: RecordKind,
    pub title: String,
    pub url: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
    pub color: EmbedColor,
    pub footer: String,
}

impl DisplayRecord {
    fn sentinel(kind: RecordKind, title: String, description: String) -> Self {
        Self {
            kind,
            title,
            url: String::new(),
            description,
            fields: Vec::new(),
            color: EmbedColor::Danger,
            footer: footer_text(NOT_AVAILABLE),
        }
    }

    /// Both lookup stages came back empty. The query name is echoed verbatim.
    pub fn not_found(profile: &CategoryProfile, name: &str) -> Self {
        Self::sentinel(
            RecordKind::NotFound,
            profile.not_found_title(),
            format!("No {} matching '{}' found.", profile.noun, name),
        )
    }

    pub fn network_error() -> Self {
        Self::sentinel(
            RecordKind::NetworkError,
            NETWORK_ERROR_TITLE.to_string(),
            NETWORK_ERROR_DESCRIPTION.to_string(),
        )
    }

    pub fn unexpected_error(profile: &CategoryProfile) -> Self {
        Self::sentinel(
            RecordKind::Error,
            ERROR_TITLE.to_string(),
            format!(
                "An unexpected error occurred while searching for the {}.",
                profile.noun
            ),
        )
    }

    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ============================================================================
// Formatting Helpers
// ============================================================================

fn footer_text(source: &str) -> String {
    format!("Source: {}", source)
}

/// Upper-cases every letter that follows a non-letter (or starts the text) and
/// lower-cases every other letter, so `two-hand` becomes `Two-Hand`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Joins trait tags as space-separated, individually delimited tokens.
pub fn trait_tokens(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("{TRAIT_MARKER}{t}{TRAIT_MARKER}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles [`DisplayRecord`]s from extracted fields.
#[derive(Debug, Clone)]
pub struct DisplayRecordBuilder {
    site_base_url: String,
}

impl DisplayRecordBuilder {
    pub fn new(site_base_url: impl Into<String>) -> Self {
        Self {
            site_base_url: site_base_url.into(),
        }
    }

    pub fn build(&self, extracted: &ExtractedFields, profile: &CategoryProfile) -> DisplayRecord {
        DisplayRecord {
            kind: RecordKind::Found,
            title: format!("{}{}", extracted.name, LINK_SUFFIX),
            url: profile.page_url(&self.site_base_url, extracted.aon_id.as_deref()),
            description: extracted.description.text.clone(),
            fields: extracted.fields.iter().filter_map(render_field).collect(),
            color: EmbedColor::Accent,
            footer: footer_text(&extracted.source),
        }
    }
}

fn render_field(field: &ExtractedField) -> Option<EmbedField> {
    match field {
        ExtractedField::Group { title, lines } => {
            let value = lines
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect::<Vec<_>>()
                .join("\n");
            Some(EmbedField::new(*title, value, true))
        }
        ExtractedField::List { title, items } => {
            if items.is_empty() {
                return None;
            }
            Some(EmbedField::new(*title, title_case(&items.join(", ")), true))
        }
        ExtractedField::Optional { title, value } => value
            .as_ref()
            .map(|value| EmbedField::new(*title, value.clone(), true)),
        ExtractedField::Traits {
            title,
            tags,
            versatile,
        } => {
            let mut value = String::new();
            if let Some(v) = versatile {
                value.push_str(&format!(
                    "**Versatile {}**: Can be used to deal **{}** damage instead of its normal **{}** damage.\n",
                    v.letter, v.alternate, v.base
                ));
            }
            value.push_str(&trait_tokens(tags));

            if value.is_empty() {
                None
            } else {
                Some(EmbedField::new(*title, value, false))
            }
        }
    }
}
