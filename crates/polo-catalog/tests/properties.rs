use polo_catalog::{decode, encode, parse_str, CatalogDocument, SerializeOptions};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct EntrySpec {
    message: String,
    context: Option<String>,
    plural: Option<String>,
    translations: Vec<String>,
    located: bool,
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,!?]{0,12}",
        "\\PC{0,12}",
        "[a-z\n\t\"\\\\]{0,12}",
    ]
}

fn entry_spec() -> impl Strategy<Value = EntrySpec> {
    (
        "[a-zA-Z][a-zA-Z0-9 \n]{0,15}",
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::collection::vec(text(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(message, context, plural, translations, located)| EntrySpec {
            message,
            context,
            plural,
            translations,
            located,
        })
}

fn build(specs: &[EntrySpec]) -> CatalogDocument {
    let mut document = CatalogDocument::new();
    for (n, spec) in specs.iter().enumerate() {
        let entry = document.add_entry(&spec.message, spec.plural.as_deref(), spec.context.as_deref());
        if spec.located {
            entry.add_location("src/app.py", n as u32 + 1);
        }
        if entry.plural.is_some() {
            for (index, text) in spec.translations.iter().enumerate() {
                entry.add_plural_translation(index, text.clone());
            }
        } else if let Some(text) = spec.translations.first() {
            entry.add_translation(text.clone());
        }
    }
    document
}

proptest! {
    #[test]
    fn test_escape_inverse(text in "\\PC*") {
        prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn test_escape_inverse_control_characters(text in "[\u{07}\u{08}\u{0b}\u{0c}\n\r\t\"\\\\a-z]*") {
        prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn test_round_trip_preserves_lookup(specs in proptest::collection::vec(entry_spec(), 0..8)) {
        let document = build(&specs);
        let text = document.serialize(&SerializeOptions::default());
        let reparsed = parse_str(&text, None).unwrap();
        prop_assert_eq!(reparsed.to_lookup(), document.to_lookup());
    }

    #[test]
    fn test_serialize_is_deterministic(specs in proptest::collection::vec(entry_spec(), 0..8)) {
        let document = build(&specs);
        let options = SerializeOptions::default();
        prop_assert_eq!(document.serialize(&options), document.clone().serialize(&options));

        let mut reversed = specs.clone();
        reversed.reverse();
        let rebuilt = build(&reversed);
        if rebuilt == document {
            prop_assert_eq!(rebuilt.serialize(&options), document.serialize(&options));
        }
    }

    #[test]
    fn test_merge_is_idempotent(
        base in proptest::collection::vec(entry_spec(), 0..6),
        existing in proptest::collection::vec(entry_spec(), 0..6),
    ) {
        let base = build(&base);
        let existing = build(&existing);
        let mut once = base.clone();
        once.merge(&existing);
        let mut twice = once.clone();
        twice.merge(&existing);
        prop_assert_eq!(once, twice);
    }
}
