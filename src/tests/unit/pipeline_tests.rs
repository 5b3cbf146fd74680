//! End-to-end rendering of one matched document per category

use crate::core::nethys::{Category, EmbedColor, EmbedField, RecordKind, ReferenceService};
use crate::tests::common::*;
use crate::tests::mocks::ScriptedBackend;

fn service_with_hit(value: serde_json::Value) -> ReferenceService<ScriptedBackend> {
    ReferenceService::new(
        ScriptedBackend::new().with_exact(single_hit(value)),
        &test_config(),
    )
}

#[tokio::test]
async fn test_spell_record_layout() {
    let service = service_with_hit(fireball());
    let record = service.search_spell("fireball").await;

    assert_eq!(record.kind, RecordKind::Found);
    assert_eq!(record.title, "Fireball • 🔗");
    assert_eq!(record.url, "https://2e.aonprd.com/Spells.aspx?ID=119");
    assert_eq!(record.color, EmbedColor::Accent);
    assert_eq!(record.footer, "Source: Player Core");
    assert_eq!(
        record.description,
        "A roaring blast of fire appears at a spot you designate, dealing 6d6 fire damage.\n\
         Heightened (+1) The damage increases by 2d6."
    );
    assert_eq!(
        record.fields,
        vec![
            EmbedField::new(
                "Spell Details",
                "Level: 3\nCast: two actions\nRange: 500 feet",
                true
            ),
            EmbedField::new("Traditions", "Arcane, Primal", true),
            EmbedField::new("Components", "Somatic, Verbal", true),
            EmbedField::new("Traits", "`concentrate` `fire` `manipulate`", false),
        ]
    );
}

#[tokio::test]
async fn test_sparse_spell_uses_defaults() {
    let service = service_with_hit(bare_spell());
    let record = service.search_spell("mystery cantrip").await;

    assert_eq!(record.kind, RecordKind::Found);
    assert_eq!(record.url, "https://2e.aonprd.com/Spells.aspx?ID=");
    assert_eq!(record.description, "");
    assert_eq!(record.footer, "Source: N/A");
    assert_eq!(record.field_names(), vec!["Spell Details"]);
    assert_eq!(
        record.field("Spell Details").unwrap().value,
        "Level: N/A\nCast: N/A\nRange: N/A"
    );
}

#[tokio::test]
async fn test_equipment_record_layout() {
    let service = service_with_hit(bag_of_holding());
    let record = service.search_item("bag of holding (type i)").await;

    assert_eq!(record.title, "Bag of Holding (Type I) • 🔗");
    assert_eq!(record.url, "https://2e.aonprd.com/Equipment.aspx?ID=2689");
    assert_eq!(record.footer, "Source: GM Core");
    assert_eq!(
        record.description,
        "Though it appears to be a cloth sack decorated with panels of richly colored silk \
         & stylish embroidery, a bag of holding opens into an extradimensional space."
    );
    assert_eq!(record.field_names(), vec!["Properties", "Usage", "Traits"]);
    assert_eq!(
        record.field("Properties").unwrap().value,
        "Price: 75 gp\nLevel: 4\nBulk: 1"
    );
    assert_eq!(
        record.field("Usage").unwrap().value,
        "Worn: held in 2 hands\nHands: 2"
    );
    assert_eq!(
        record.field("Traits").unwrap().value,
        "`extradimensional` `magical`"
    );
}

#[tokio::test]
async fn test_feat_record_layout() {
    let service = service_with_hit(power_attack());
    let record = service.search_feat("power attack").await;

    assert_eq!(record.url, "https://2e.aonprd.com/Feats.aspx?ID=4788");
    assert_eq!(record.field_names(), vec!["Details", "Actions", "Traits"]);
    assert_eq!(
        record.field("Details").unwrap().value,
        "Level: 1\nPrerequisites: None"
    );
    assert_eq!(
        record.field("Actions").unwrap(),
        &EmbedField::new("Actions", "Two Actions", true)
    );
}

#[tokio::test]
async fn test_weapon_record_layout() {
    let service = service_with_hit(longsword());
    let record = service.search_weapon("longsword").await;

    assert_eq!(record.url, "https://2e.aonprd.com/Weapons.aspx?ID=373");
    assert_eq!(
        record.description,
        "Longswords can be one-edged or two-edged swords. \
         Their blades are heavy and they're between 3 and 4 feet in length."
    );
    assert_eq!(
        record.field_names(),
        vec!["Properties", "Combat", "Classification", "Traits"]
    );
    assert_eq!(
        record.field("Combat").unwrap().value,
        "Damage: 1d8 S\nHands: 1"
    );
    assert_eq!(
        record.field("Classification").unwrap().value,
        "Type: Martial\nGroup: Sword"
    );
    assert_eq!(
        record.field("Traits").unwrap().value,
        "**Versatile P**: Can be used to deal **piercing** damage instead of its normal \
         **slashing** damage.\n"
    );
}

#[tokio::test]
async fn test_long_description_is_truncated() {
    let mut spell = fireball();
    spell["text"] = serde_json::Value::String(format!("Header --- {}", "word ".repeat(120)));

    let service = service_with_hit(spell);
    let record = service.search(Category::Spell, "fireball").await;

    assert_eq!(record.description.chars().count(), 403);
    assert!(record.description.ends_with("..."));
    assert!(record.description.starts_with("word word"));
}

#[tokio::test]
async fn test_every_category_filters_on_its_tag() {
    for category in Category::ALL {
        let service = ReferenceService::new(ScriptedBackend::new(), &test_config());
        let record = service.search(category, "Nothing Here").await;

        assert_eq!(record.kind, RecordKind::NotFound);
        let seen = service.backend().seen_queries();
        assert_eq!(seen.len(), 2);
        for query in seen {
            assert_eq!(
                query["query"]["bool"]["must"][0]["term"]["category"],
                category.index_tag()
            );
        }
    }
}
