//! Result Extraction
//!
//! Turns the top hit into display-ready pieces:
//! - description text after the `---` separator, stripped of markup,
//!   entity-decoded and cut to a fixed character budget
//! - category attributes read through the profile's layout, each with its own
//!   declared default
//! - trait tags, including the expanded form of a weapon's `versatile-*` trait

use once_cell::sync::Lazy;
use quick_xml::escape::resolve_html5_entity;
use regex::Regex;

use super::category::{Attribute, CategoryProfile, FieldTemplate, SOURCE};
use super::document::RawDocument;
use super::error::{LookupError, Result};

/// Maximum number of characters of cleaned body text kept in a record.
pub const DESCRIPTION_LIMIT: usize = 400;
/// Appended to descriptions cut at [`DESCRIPTION_LIMIT`].
pub const ELLIPSIS: &str = "...";
/// Separates the metadata header from the prose of an entry's `text`.
pub const METADATA_SEPARATOR: &str = "---";

const LINE_BREAKS: [&str; 3] = ["<br>", "<br/>", "<br />"];
const VERSATILE_PREFIX: &str = "versatile-";

// ============================================================================
// Regex Patterns
// ============================================================================

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile tag regex"));

/// Character references as an HTML parser tokenizes them: decimal, hex, or a
/// name, each with an optional terminating semicolon.
static ENTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]+)(;?)|#[xX]([0-9a-fA-F]+)(;?)|([^\t\n\x0C <&#;]{1,32})(;?))")
        .expect("Failed to compile entity regex")
});

// ============================================================================
// Markup Cleaning
// ============================================================================

/// Converts HTML-ish markup to plain text.
///
/// Line-break tags become newlines, every other tag is dropped, character
/// references are decoded, and the result is trimmed, in that order.
pub fn clean_html(text: &str) -> String {
    let mut cleaned = text.to_string();
    for br in LINE_BREAKS {
        cleaned = cleaned.replace(br, "\n");
    }
    let stripped = TAG_PATTERN.replace_all(&cleaned, "");
    decode_entities(&stripped).trim().to_string()
}

/// Decodes HTML character references against the full HTML5 entity table.
///
/// Numeric references outside the Unicode scalar range (including `&#0;`)
/// become U+FFFD. Legacy names such as `&amp` decode without a semicolon,
/// also when followed by other letters (`&copy2024`). Anything unrecognised is
/// left verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if let Some(dec) = caps.get(1) {
                numeric_reference(dec.as_str().parse::<u32>().ok())
            } else if let Some(hex) = caps.get(3) {
                numeric_reference(u32::from_str_radix(hex.as_str(), 16).ok())
            } else {
                let terminated = caps.get(6).is_some_and(|m| !m.as_str().is_empty());
                named_reference(&caps[5], terminated).unwrap_or_else(|| caps[0].to_string())
            }
        })
        .into_owned()
}

fn numeric_reference(code: Option<u32>) -> String {
    code.and_then(|c| if c == 0 { None } else { char::from_u32(c) })
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

fn named_reference(name: &str, terminated: bool) -> Option<String> {
    if terminated {
        if let Some(decoded) = resolve_html5_entity(name) {
            return Some(decoded.to_string());
        }
    }

    // Longest legacy name that prefixes the reference; the rest stays as text.
    (2..=name.len())
        .rev()
        .filter(|&end| name.is_char_boundary(end))
        .find_map(|end| {
            let decoded = legacy_entity(&name[..end])?;
            let mut out = format!("{}{}", decoded, &name[end..]);
            if terminated {
                out.push(';');
            }
            Some(out)
        })
}

/// Names an HTML parser accepts without a semicolon: the HTML 4 Latin-1 set
/// and the markup-significant characters.
fn legacy_entity(name: &str) -> Option<&'static str> {
    resolve_html5_entity(name).filter(|decoded| {
        let mut chars = decoded.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => matches!(c, '&' | '<' | '>' | '"' | '\u{a0}'..='\u{ff}'),
            _ => false,
        }
    })
}

// ============================================================================
// Description
// ============================================================================

/// Cleaned, length-bounded description text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub truncated: bool,
}

/// Prose following the first separator, or `None` when there is no separator.
pub fn description_source(text: &str) -> Option<&str> {
    text.split_once(METADATA_SEPARATOR).map(|(_, body)| body)
}

/// Hard character cut. May split a word; the ellipsis marks the cut.
pub fn truncate_description(text: String, limit: usize) -> Description {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => Description {
            text: format!("{}{}", &text[..byte_idx], ELLIPSIS),
            truncated: true,
        },
        None => Description {
            text,
            truncated: false,
        },
    }
}

/// Removes every sentence matched by `filter` and trims the remainder.
pub fn drop_matching_sentences(text: &str, filter: &Regex) -> String {
    filter.replace_all(text, "").trim().to_string()
}

// ============================================================================
// Extracted Fields
// ============================================================================

/// Expanded `versatile-*` trait of a weapon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersatileTrait {
    pub letter: String,
    pub alternate: &'static str,
    pub base: &'static str,
}

impl VersatileTrait {
    fn parse(tag: &str, damage: &str) -> Self {
        let letter = tag.split('-').nth(1).unwrap_or_default().to_uppercase();
        let alternate = match letter.as_str() {
            "P" => "piercing",
            "B" => "bludgeoning",
            "S" => "slashing",
            _ => "unknown",
        };

        let damage = damage.to_lowercase();
        let base = if damage.contains("piercing") {
            "piercing"
        } else if damage.contains("bludgeoning") {
            "bludgeoning"
        } else {
            "slashing"
        };

        Self {
            letter,
            alternate,
            base,
        }
    }
}

/// A layout slot resolved against one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedField {
    Group {
        title: &'static str,
        lines: Vec<(&'static str, String)>,
    },
    List {
        title: &'static str,
        items: Vec<String>,
    },
    Optional {
        title: &'static str,
        value: Option<String>,
    },
    Traits {
        title: &'static str,
        tags: Vec<String>,
        versatile: Option<VersatileTrait>,
    },
}

/// Everything the display builder needs from one hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: String,
    pub aon_id: Option<String>,
    pub description: Description,
    pub source: String,
    pub fields: Vec<ExtractedField>,
}

/// Reads an attribute, falling back to its declared default.
pub fn read_attribute(document: &RawDocument, attribute: &Attribute) -> String {
    document
        .text(attribute.key)
        .unwrap_or_else(|| attribute.default.to_string())
}

// ============================================================================
// Extractor
// ============================================================================

/// Extracts description and category attributes from a matched document.
#[derive(Debug, Clone, Copy)]
pub struct ResultExtractor {
    description_limit: usize,
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new(DESCRIPTION_LIMIT)
    }
}

impl ResultExtractor {
    pub fn new(description_limit: usize) -> Self {
        Self { description_limit }
    }

    pub fn description_limit(&self) -> usize {
        self.description_limit
    }

    /// Extracts the display pieces of `document` per `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MalformedDocument`] when the hit has no name.
    pub fn extract(
        &self,
        document: &RawDocument,
        profile: &CategoryProfile,
    ) -> Result<ExtractedFields> {
        let name = document
            .name()
            .ok_or_else(|| {
                LookupError::MalformedDocument(format!(
                    "{} hit without a string name",
                    profile.index_tag
                ))
            })?
            .to_string();

        let fields = profile
            .layout
            .iter()
            .map(|template| self.resolve(document, profile, template))
            .collect();

        Ok(ExtractedFields {
            name,
            aon_id: document.aon_id(),
            description: self.description(document, profile),
            source: read_attribute(document, &SOURCE),
            fields,
        })
    }

    /// Description for `document`, empty when its text has no separator.
    pub fn description(&self, document: &RawDocument, profile: &CategoryProfile) -> Description {
        let Some(body) = description_source(document.body_text()) else {
            return Description::default();
        };

        let mut cleaned = clean_html(body.trim());
        if let Some(filter) = profile.description_filter {
            cleaned = drop_matching_sentences(&cleaned, filter);
        }
        truncate_description(cleaned, self.description_limit)
    }

    fn resolve(
        &self,
        document: &RawDocument,
        profile: &CategoryProfile,
        template: &FieldTemplate,
    ) -> ExtractedField {
        match *template {
            FieldTemplate::Group { title, lines } => ExtractedField::Group {
                title,
                lines: lines
                    .iter()
                    .map(|attr| (attr.label, read_attribute(document, attr)))
                    .collect(),
            },
            FieldTemplate::List { title, key } => ExtractedField::List {
                title,
                items: document.list(key),
            },
            FieldTemplate::Optional { title, key } => ExtractedField::Optional {
                title,
                value: document.text(key),
            },
            FieldTemplate::Traits { title } => {
                let all = document.traits();
                match profile.versatile_damage_key {
                    Some(damage_key) => {
                        let damage = document.text(damage_key).unwrap_or_default();
                        let versatile = all
                            .iter()
                            .find(|t| t.starts_with(VERSATILE_PREFIX))
                            .map(|t| VersatileTrait::parse(t, &damage));
                        let tags = all
                            .into_iter()
                            .filter(|t| !t.starts_with(VERSATILE_PREFIX))
                            .collect();
                        ExtractedField::Traits {
                            title,
                            tags,
                            versatile,
                        }
                    }
                    None => ExtractedField::Traits {
                        title,
                        tags: all,
                        versatile: None,
                    },
                }
            }
        }
    }
}
