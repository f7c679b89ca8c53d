use hiername::escape::{remask, unmask};
use hiername::{Name, NameConfig, StoreKind, DEFAULT_DELIMITER, ESCAPE_CHARACTER};
use proptest::prelude::*;

/// Short plain strings biased toward the characters that need escaping.
fn plain_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c./,#\\\\]{0,6}",
        ".{0,8}",
    ]
}

fn delimiters() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['.', '/', ',', '#', 'a'])
}

fn stores() -> impl Strategy<Value = StoreKind> {
    prop::sample::select(vec![StoreKind::Array, StoreKind::Delimited])
}

/// A name built from plain components, masked for its own delimiter.
fn names() -> impl Strategy<Value = Name> {
    (prop::collection::vec(plain_text(), 0..6), delimiters(), stores()).prop_map(
        |(components, delimiter, store)| {
            let masked: Vec<String> = components.iter().map(|c| remask(c, delimiter)).collect();
            let config = NameConfig::builder()
                .delimiter(delimiter)
                .store(store)
                .build();
            Name::with_config(masked, &config).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn unmask_inverts_remask(
        s in ".*",
        d in any::<char>().prop_filter("escape is not a delimiter", |c| *c != ESCAPE_CHARACTER),
    ) {
        prop_assert_eq!(unmask(&remask(&s, d)), s);
    }

    #[test]
    fn data_string_round_trips(
        components in prop::collection::vec(plain_text(), 1..6),
        store in stores(),
    ) {
        let masked: Vec<String> = components.iter().map(|c| remask(c, DEFAULT_DELIMITER)).collect();
        let config = NameConfig::builder().store(store).build();
        let name = Name::with_config(masked, &config).unwrap();

        let back = Name::parse_data_string(&name.as_data_string()).unwrap();
        prop_assert_eq!(back.components(), name.components());
        prop_assert_eq!(back, name);
    }

    #[test]
    fn append_then_remove_restores(name in names(), extra in plain_text()) {
        let masked = remask(&extra, name.delimiter());
        let grown = name.append(&masked).unwrap();
        prop_assert_eq!(grown.no_components(), name.no_components() + 1);

        let restored = grown.remove(grown.no_components() - 1).unwrap();
        prop_assert_eq!(restored, name);
    }

    #[test]
    fn concat_adds_counts(a in names(), b in names()) {
        let joined = a.concat(&b).unwrap();
        prop_assert_eq!(joined.no_components(), a.no_components() + b.no_components());
        prop_assert_eq!(joined.delimiter(), a.delimiter());
    }

    #[test]
    fn concat_preserves_plain_text(a in names(), b in names()) {
        let joined = a.concat(&b).unwrap();
        let plain: Vec<String> = joined.components().iter().map(|c| unmask(c)).collect();
        let expected: Vec<String> = a
            .components()
            .iter()
            .chain(b.components().iter())
            .map(|c| unmask(c))
            .collect();
        prop_assert_eq!(plain, expected);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in names(), b in names()) {
        prop_assert!(a.is_equal(&a));
        prop_assert_eq!(a.is_equal(&b), b.is_equal(&a));
        if a.is_equal(&b) {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
    }

    #[test]
    fn equality_is_transitive(a in names()) {
        let b = Name::from_components(a.components(), a.delimiter()).unwrap();
        let c = Name::parse_with_config(
            &hiername::escape::join_masked(&a.components(), a.delimiter()),
            &NameConfig::builder().delimiter(a.delimiter()).store(StoreKind::Delimited).build(),
        )
        .unwrap();

        // the empty name has no delimited-string spelling
        prop_assume!(!a.is_empty());
        prop_assert!(a.is_equal(&b));
        prop_assert!(b.is_equal(&c));
        prop_assert!(a.is_equal(&c));
    }

    #[test]
    fn stores_agree_under_the_same_edits(
        components in prop::collection::vec(plain_text(), 0..5),
        edits in prop::collection::vec((0usize..4, 0usize..8, plain_text()), 0..10),
        delimiter in delimiters(),
    ) {
        let masked: Vec<String> = components.iter().map(|c| remask(c, delimiter)).collect();
        let array = NameConfig::builder().delimiter(delimiter).store(StoreKind::Array).build();
        let delimited = NameConfig::builder().delimiter(delimiter).store(StoreKind::Delimited).build();

        let mut left = Name::with_config(masked.clone(), &array).unwrap();
        let mut right = Name::with_config(masked, &delimited).unwrap();

        for (op, index, text) in edits {
            let text = remask(&text, delimiter);
            let (l, r) = match op {
                0 => (left.append(&text), right.append(&text)),
                1 => (left.insert(index, &text), right.insert(index, &text)),
                2 => (left.set_component(index, &text), right.set_component(index, &text)),
                _ => (left.remove(index), right.remove(index)),
            };
            match (l, r) {
                (Ok(l), Ok(r)) => {
                    left = l;
                    right = r;
                }
                (Err(l), Err(r)) => prop_assert_eq!(l.kind(), r.kind()),
                (l, r) => prop_assert!(false, "stores diverged: {:?} vs {:?}", l, r),
            }
            prop_assert_eq!(left.components(), right.components());
        }
        prop_assert_eq!(left.as_string(), right.as_string());
    }
}
