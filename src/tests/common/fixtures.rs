//! Test Fixtures
//!
//! Index documents shaped like real Archives of Nethys hits.

use serde_json::{json, Value};

use crate::config::SearchConfig;
use crate::core::nethys::{RawDocument, ResultSet};

pub const SITE: &str = "https://2e.aonprd.com";

/// Search configuration with no deadline and the default site.
pub fn test_config() -> SearchConfig {
    SearchConfig::default().with_site_base_url(SITE)
}

pub fn document(value: Value) -> RawDocument {
    RawDocument::from_value(value).expect("fixture must be a JSON object")
}

pub fn single_hit(value: Value) -> ResultSet {
    ResultSet::from_hits([document(value)])
}

/// Spell with every optional attribute present.
pub fn fireball() -> Value {
    json!({
        "name": "Fireball",
        "aonId": 119,
        "category": "spell",
        "level": 3,
        "cast": "two actions",
        "range": "500 feet",
        "traditions": ["arcane", "primal"],
        "components": ["somatic", "verbal"],
        "traits": {"value": ["concentrate", "fire", "manipulate"]},
        "source": "Player Core",
        "text": "Fireball Spell 3 --- A roaring blast of fire appears at a spot you designate, \
                 dealing 6d6 fire damage.<br/>Heightened (+1) The damage increases by 2d6."
    })
}

/// Spell carrying only its name.
pub fn bare_spell() -> Value {
    json!({"name": "Mystery Cantrip"})
}

pub fn bag_of_holding() -> Value {
    json!({
        "name": "Bag of Holding (Type I)",
        "aonId": "2689",
        "category": "equipment",
        "price": "75 gp",
        "level": 4,
        "bulk": "1",
        "usage": "held in 2 hands",
        "hands": "2",
        "traits": ["extradimensional", "magical"],
        "source": ["GM Core"],
        "text": "Bag of Holding Item 4 --- Though it appears to be a cloth sack decorated \
                 with panels of richly colored silk &amp; stylish embroidery, a <i>bag of holding</i> \
                 opens into an extradimensional space."
    })
}

pub fn power_attack() -> Value {
    json!({
        "name": "Power Attack",
        "aonId": 4788,
        "category": "feat",
        "level": 1,
        "prerequisites": "",
        "actions": "Two Actions",
        "traits": {"value": ["fighter", "flourish"]},
        "source": "Player Core",
        "text": "Power Attack Feat 1 --- You unleash a particularly powerful attack."
    })
}

pub fn longsword() -> Value {
    json!({
        "name": "Longsword",
        "aonId": 373,
        "category": "weapon",
        "price": "1 gp",
        "level": 0,
        "bulk": "1",
        "damage": "1d8 S",
        "hands": "1",
        "type": "Martial",
        "group": "Sword",
        "traits": {"value": ["versatile-p"]},
        "source": "Player Core",
        "text": "Longsword --- Longswords can be one-edged or two-edged swords. \
                 Their blades are heavy and they're between 3 and 4 feet in length. \
                 Certain feats, class features, and weapon runes can apply critical \
                 specialization effects. This is the favored weapon of Iomedae."
    })
}
