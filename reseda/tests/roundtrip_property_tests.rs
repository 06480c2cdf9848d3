use proptest::prelude::*;
use reseda::{
    Config, Flags, ResourceRecord, ResourceSet, TreeReadOptions, TreeWriteOptions, convert,
    read_tree, write_tree,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 _\\-\\.,!\\?\"]{0,29}")
        .expect("valid value regex")
}

// Raw inner XML: plain text, escaped ampersands and nested markup.
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        text_strategy(),
        (text_strategy(), text_strategy()).prop_map(|(a, b)| format!("{a} &amp; {b}")),
        (text_strategy(), text_strategy()).prop_map(|(a, b)| format!("{a} <b>{b}</b>")),
        (text_strategy(), text_strategy())
            .prop_map(|(a, b)| format!("<xliff:g id=\"n\">%1$s</xliff:g> {a} &lt;{b}&gt;")),
    ]
}

#[derive(Debug, Clone)]
struct Row {
    default: String,
    fr: String,
    formatted: bool,
    translatable: bool,
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, Row>> {
    let row = (value_strategy(), value_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(default, fr, formatted, translatable)| Row {
            default,
            fr,
            formatted,
            translatable,
        },
    );
    prop::collection::btree_map(key_strategy(), row, 1..8)
}

fn array_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((value_strategy(), value_strategy()), 1..5)
}

fn build_sets(strings: &BTreeMap<String, Row>, planets: &[(String, String)]) -> Vec<ResourceSet> {
    let mut default = vec![ResourceRecord::comment("Generated")];
    let mut fr = default.clone();
    for (key, row) in strings {
        let flags = Flags::default()
            .with_formatted(row.formatted)
            .with_translatable(row.translatable);
        default.push(ResourceRecord::string(key, row.default.as_str()).with_flags(flags));
        fr.push(ResourceRecord::string(key, row.fr.as_str()).with_flags(flags));
    }
    for (en, fr_item) in planets {
        default.push(ResourceRecord::array_item("planets", en.as_str()));
        fr.push(ResourceRecord::array_item("planets", fr_item.as_str()));
    }
    vec![
        ResourceSet::with_records("", default),
        ResourceSet::with_records("fr", fr),
    ]
}

proptest! {
    #[test]
    fn prop_tree_table_tree_preserves_resources(
        strings in dataset_strategy(),
        planets in array_strategy(),
    ) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let table = dir.path().join("strings.csv");
        let output = dir.path().join("output");

        write_tree(&source, &build_sets(&strings, &planets), &TreeWriteOptions::new()).unwrap();
        let read_options = TreeReadOptions::new().with_locales(vec!["fr".to_string()]);
        let expected = read_tree(&source, &read_options).unwrap();

        let locales = vec!["fr".to_string()];
        convert(&Config::tree_to_csv(&source, &table).with_locales(locales.clone())).unwrap();
        convert(&Config::csv_to_tree(&table, &output).with_locales(locales)).unwrap();

        let actual = read_tree(&output, &read_options).unwrap();
        prop_assert_eq!(actual, expected);
    }
}
