//! Category Profiles
//!
//! Each searchable category in the Archives of Nethys index is described by a
//! static [`CategoryProfile`]: the index tag it is filtered by, the page the
//! result links to, and the ordered field layout of the rendered record. The
//! pipeline itself is category-agnostic and only reads these tables.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// A content partition of the remote index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spell,
    Equipment,
    Feat,
    Weapon,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Spell,
        Category::Equipment,
        Category::Feat,
        Category::Weapon,
    ];

    /// Static rendering profile for this category.
    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            Category::Spell => &SPELL_PROFILE,
            Category::Equipment => &EQUIPMENT_PROFILE,
            Category::Feat => &FEAT_PROFILE,
            Category::Weapon => &WEAPON_PROFILE,
        }
    }

    /// Value of the index's `category` term for this category.
    pub fn index_tag(&self) -> &'static str {
        self.profile().index_tag
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.index_tag())
    }
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spell" | "spells" => Ok(Category::Spell),
            "equipment" | "item" | "items" => Ok(Category::Equipment),
            "feat" | "feats" => Ok(Category::Feat),
            "weapon" | "weapons" => Ok(Category::Weapon),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

// ============================================================================
// Attribute Defaults
// ============================================================================

/// Placeholder rendered for any missing attribute without a specific default.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single document attribute together with the label it is shown under and
/// the literal rendered when the document lacks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub label: &'static str,
    pub key: &'static str,
    pub default: &'static str,
}

impl Attribute {
    pub const fn new(label: &'static str, key: &'static str, default: &'static str) -> Self {
        Self {
            label,
            key,
            default,
        }
    }
}

/// Attributes shared by every category.
pub const SOURCE: Attribute = Attribute::new("Source", "source", NOT_AVAILABLE);

// ============================================================================
// Field Layout
// ============================================================================

/// One slot in a category's ordered field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTemplate {
    /// Inline block of `Label: value` lines, always rendered.
    Group {
        title: &'static str,
        lines: &'static [Attribute],
    },
    /// Inline comma-joined, title-cased list; omitted when empty.
    List {
        title: &'static str,
        key: &'static str,
    },
    /// Inline single value; omitted when missing or blank.
    Optional {
        title: &'static str,
        key: &'static str,
    },
    /// Non-inline run of delimited trait tokens; omitted when empty.
    Traits { title: &'static str },
}

/// Names of the index fields the query builder filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFields {
    pub category: &'static str,
    pub exact_name: &'static str,
    pub text_name: &'static str,
}

pub const DEFAULT_INDEX_FIELDS: IndexFields = IndexFields {
    category: "category",
    exact_name: "name.keyword",
    text_name: "name",
};

/// Declarative description of how one category is queried and rendered.
#[derive(Debug, Clone, Copy)]
pub struct CategoryProfile {
    pub category: Category,
    pub index_tag: &'static str,
    pub index_fields: IndexFields,
    /// Lower-case noun used in user-facing messages ("spell", "item").
    pub noun: &'static str,
    /// Page path on the reference site; the external id is appended verbatim.
    pub url_path: &'static str,
    pub layout: &'static [FieldTemplate],
    /// Sentences matched by this pattern are dropped from the description.
    pub description_filter: Option<&'static Lazy<Regex>>,
    /// Attribute holding damage text, used to expand `versatile-*` traits.
    pub versatile_damage_key: Option<&'static str>,
}

impl CategoryProfile {
    /// Title of the record shown when neither lookup stage finds anything.
    pub fn not_found_title(&self) -> String {
        let mut chars = self.noun.chars();
        let capitalized = chars
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
            + chars.as_str();
        format!("{} Not Found", capitalized)
    }

    /// Full link for the given external id; an empty id yields the bare path.
    pub fn page_url(&self, site_base_url: &str, aon_id: Option<&str>) -> String {
        format!(
            "{}/{}{}",
            site_base_url.trim_end_matches('/'),
            self.url_path,
            aon_id.unwrap_or_default()
        )
    }
}

/// A sentence of weapon prose that restates general rules text.
static WEAPON_RULES_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[^.]*(?:critical specialization|favored weapon)[^.]*\.")
        .expect("Failed to compile weapon sentence regex")
});

const TRAITS: FieldTemplate = FieldTemplate::Traits { title: "Traits" };

pub static SPELL_PROFILE: CategoryProfile = CategoryProfile {
    category: Category::Spell,
    index_tag: "spell",
    index_fields: DEFAULT_INDEX_FIELDS,
    noun: "spell",
    url_path: "Spells.aspx?ID=",
    layout: &[
        FieldTemplate::Group {
            title: "Spell Details",
            lines: &[
                Attribute::new("Level", "level", NOT_AVAILABLE),
                Attribute::new("Cast", "cast", NOT_AVAILABLE),
                Attribute::new("Range", "range", NOT_AVAILABLE),
            ],
        },
        FieldTemplate::List {
            title: "Traditions",
            key: "traditions",
        },
        FieldTemplate::List {
            title: "Components",
            key: "components",
        },
        TRAITS,
    ],
    description_filter: None,
    versatile_damage_key: None,
};

pub static EQUIPMENT_PROFILE: CategoryProfile = CategoryProfile {
    category: Category::Equipment,
    index_tag: "equipment",
    index_fields: DEFAULT_INDEX_FIELDS,
    noun: "item",
    url_path: "Equipment.aspx?ID=",
    layout: &[
        FieldTemplate::Group {
            title: "Properties",
            lines: &[
                Attribute::new("Price", "price", NOT_AVAILABLE),
                Attribute::new("Level", "level", "0"),
                Attribute::new("Bulk", "bulk", NOT_AVAILABLE),
            ],
        },
        FieldTemplate::Group {
            title: "Usage",
            lines: &[
                Attribute::new("Worn", "usage", NOT_AVAILABLE),
                Attribute::new("Hands", "hands", NOT_AVAILABLE),
            ],
        },
        TRAITS,
    ],
    description_filter: None,
    versatile_damage_key: None,
};

pub static FEAT_PROFILE: CategoryProfile = CategoryProfile {
    category: Category::Feat,
    index_tag: "feat",
    index_fields: DEFAULT_INDEX_FIELDS,
    noun: "feat",
    url_path: "Feats.aspx?ID=",
    layout: &[
        FieldTemplate::Group {
            title: "Details",
            lines: &[
                Attribute::new("Level", "level", NOT_AVAILABLE),
                Attribute::new("Prerequisites", "prerequisites", "None"),
            ],
        },
        FieldTemplate::Optional {
            title: "Actions",
            key: "actions",
        },
        TRAITS,
    ],
    description_filter: None,
    versatile_damage_key: None,
};

pub static WEAPON_PROFILE: CategoryProfile = CategoryProfile {
    category: Category::Weapon,
    index_tag: "weapon",
    index_fields: DEFAULT_INDEX_FIELDS,
    noun: "weapon",
    url_path: "Weapons.aspx?ID=",
    layout: &[
        FieldTemplate::Group {
            title: "Properties",
            lines: &[
                Attribute::new("Price", "price", NOT_AVAILABLE),
                Attribute::new("Level", "level", "0"),
                Attribute::new("Bulk", "bulk", NOT_AVAILABLE),
            ],
        },
        FieldTemplate::Group {
            title: "Combat",
            lines: &[
                Attribute::new("Damage", "damage", NOT_AVAILABLE),
                Attribute::new("Hands", "hands", NOT_AVAILABLE),
            ],
        },
        FieldTemplate::Group {
            title: "Classification",
            lines: &[
                Attribute::new("Type", "type", NOT_AVAILABLE),
                Attribute::new("Group", "group", NOT_AVAILABLE),
            ],
        },
        TRAITS,
    ],
    description_filter: Some(&WEAPON_RULES_SENTENCE),
    versatile_damage_key: Some("damage"),
};
