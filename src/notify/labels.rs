use std::collections::HashMap;

lazy_static::lazy_static! {
    /// Item identifiers used by earlier revisions of the booking form
    static ref LEGACY_ITEM_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("ski_set", "Ski set (skis + boots)"),
        ("snowboard_set", "Snowboard set (board + boots)"),
        ("kids_ski_set", "Kids ski set"),
        ("kids_snowboard_set", "Kids snowboard set"),
        ("clothing", "Clothing item"),
        ("accessory", "Accessory"),
    ]);
}

/// Resolve a human label for an item: explicit label, legacy map, then a
/// title-cased rendering of the identifier itself.
pub(crate) fn resolve_item_label(item_type: &str, item_label: Option<&str>) -> String {
    if let Some(label) = item_label {
        if !label.trim().is_empty() {
            return label.to_string();
        }
    }

    if let Some(label) = LEGACY_ITEM_LABELS.get(item_type) {
        return (*label).to_string();
    }

    title_case(item_type)
}

fn title_case(identifier: &str) -> String {
    identifier
        .split(|c: char| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
