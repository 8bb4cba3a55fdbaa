// src/normalize.rs
//! Property normalization: the typed property union flattened to scalars.
//!
//! This is the one layer with real decisions in it. Every property kind,
//! including ones Notion has not shipped yet, resolves to a defined
//! scalar; a record never fails to normalize because of a single
//! property. The match below is closed: adding a variant to
//! [`PropertyValue`] without a decode rule here is a compile error.

use crate::model::{DatabaseRow, DateRange, PropertyValue, Record, RichTextFragment, Scalar, SelectOption};

/// Flattens one raw database row into a scalar record.
///
/// The output's field set equals the row's property-name set, in the
/// order the API sent them. Pure and idempotent: the same row always
/// yields the same record.
pub fn normalize(row: &DatabaseRow) -> Record {
    let mut record = Record::new();

    for (name, raw) in &row.properties {
        let property = PropertyValue::from_json(raw.clone());
        log::trace!("decoding property '{}' ({})", name, property.type_name());
        record.insert(name.clone(), decode_property(&property));
    }

    record
}

/// Decodes a single typed property to its scalar rendering.
pub fn decode_property(property: &PropertyValue) -> Scalar {
    use PropertyValue::*;

    match property {
        Title { title } => Scalar::Text(decode_title(title)),
        RichText { rich_text } => Scalar::Text(decode_rich_text(rich_text)),
        Number { number } => number.map_or(Scalar::Null, Scalar::Number),
        Select { select } => Scalar::Text(decode_select(select.as_ref())),
        MultiSelect { multi_select } => Scalar::Text(decode_multi_select(multi_select)),
        Date { date } => Scalar::Text(decode_date(date.as_ref())),
        Url { url } => Scalar::Text(url.clone().unwrap_or_default()),
        Unsupported => Scalar::Null,
    }
}

/// A title renders as its first fragment's plain text. Empty or missing
/// title arrays render as the empty string.
fn decode_title(title: &[RichTextFragment]) -> String {
    title
        .first()
        .map(|fragment| fragment.plain_text.clone())
        .unwrap_or_default()
}

/// Rich text renders as the concatenation of all fragments, no separator.
fn decode_rich_text(rich_text: &[RichTextFragment]) -> String {
    rich_text
        .iter()
        .map(|fragment| fragment.plain_text.as_str())
        .collect()
}

fn decode_select(select: Option<&SelectOption>) -> String {
    select.map(|option| option.name.clone()).unwrap_or_default()
}

fn decode_multi_select(multi_select: &[SelectOption]) -> String {
    multi_select
        .iter()
        .map(|option| option.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A date renders as the range's start string verbatim; the end of the
/// range and any timezone hint are dropped.
fn decode_date(date: Option<&DateRange>) -> String {
    date.and_then(|range| range.start.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row_with(name: &str, property: serde_json::Value) -> DatabaseRow {
        serde_json::from_value(json!({
            "id": "row-1",
            "properties": { name: property }
        }))
        .unwrap()
    }

    #[test]
    fn title_takes_first_fragment_plain_text() {
        let row = row_with(
            "Name",
            json!({
                "type": "title",
                "title": [
                    {"plain_text": "Fix bug", "href": null},
                    {"plain_text": " (ignored)"}
                ]
            }),
        );
        assert_eq!(normalize(&row)["Name"], Scalar::Text("Fix bug".to_string()));
    }

    #[test]
    fn empty_title_renders_empty_string() {
        let row = row_with("Name", json!({"type": "title", "title": []}));
        assert_eq!(normalize(&row)["Name"], Scalar::Text(String::new()));
    }

    #[test]
    fn rich_text_concatenates_without_separator() {
        let row = row_with(
            "Notes",
            json!({
                "type": "rich_text",
                "rich_text": [{"plain_text": "part one"}, {"plain_text": " and two"}]
            }),
        );
        assert_eq!(
            normalize(&row)["Notes"],
            Scalar::Text("part one and two".to_string())
        );
    }

    #[test]
    fn number_passes_through_or_nulls() {
        let row = row_with("Priority", json!({"type": "number", "number": 5}));
        assert_eq!(normalize(&row)["Priority"], Scalar::Number(5.0));

        let row = row_with("Priority", json!({"type": "number", "number": null}));
        assert_eq!(normalize(&row)["Priority"], Scalar::Null);
    }

    #[test]
    fn select_renders_option_name_or_empty() {
        let row = row_with(
            "State",
            json!({"type": "select", "select": {"name": "Bug", "color": "red"}}),
        );
        assert_eq!(normalize(&row)["State"], Scalar::Text("Bug".to_string()));

        let row = row_with("State", json!({"type": "select", "select": null}));
        assert_eq!(normalize(&row)["State"], Scalar::Text(String::new()));
    }

    #[test]
    fn multi_select_joins_names_with_comma_space() {
        let row = row_with(
            "Tags",
            json!({
                "type": "multi_select",
                "multi_select": [{"name": "P1"}, {"name": "P2"}]
            }),
        );
        assert_eq!(normalize(&row)["Tags"], Scalar::Text("P1, P2".to_string()));
    }

    #[test]
    fn date_renders_range_start_verbatim() {
        let row = row_with(
            "Due",
            json!({
                "type": "date",
                "date": {"start": "2023-04-01T09:00:00.000+02:00", "end": null}
            }),
        );
        assert_eq!(
            normalize(&row)["Due"],
            Scalar::Text("2023-04-01T09:00:00.000+02:00".to_string())
        );

        let row = row_with("Due", json!({"type": "date", "date": null}));
        assert_eq!(normalize(&row)["Due"], Scalar::Text(String::new()));
    }

    #[test]
    fn url_renders_string_or_empty() {
        let row = row_with(
            "Link",
            json!({"type": "url", "url": "https://example.com/a"}),
        );
        assert_eq!(
            normalize(&row)["Link"],
            Scalar::Text("https://example.com/a".to_string())
        );

        let row = row_with("Link", json!({"type": "url", "url": null}));
        assert_eq!(normalize(&row)["Link"], Scalar::Text(String::new()));
    }

    #[test]
    fn unsupported_kinds_normalize_to_null() {
        for property in [
            json!({"type": "checkbox", "checkbox": true}),
            json!({"type": "people", "people": [{"name": "ada"}]}),
            json!({"type": "status", "status": {"name": "Done"}}),
            json!({"type": "formula", "formula": {"type": "number", "number": 3}}),
            json!({"type": "created_time", "created_time": "2023-01-01T00:00:00.000Z"}),
            json!({"type": "never_seen_before", "never_seen_before": {}}),
        ] {
            let row = row_with("Field", property);
            assert_eq!(normalize(&row)["Field"], Scalar::Null);
        }
    }

    #[test]
    fn field_set_matches_property_name_set_in_order() {
        let row: DatabaseRow = serde_json::from_value(json!({
            "id": "row-2",
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": "A"}]},
                "Weird": {"type": "rollup", "rollup": {}},
                "Score": {"type": "number", "number": 1.5}
            }
        }))
        .unwrap();

        let record = normalize(&row);
        let fields: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["Name", "Weird", "Score"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let row = row_with(
            "Tags",
            json!({
                "type": "multi_select",
                "multi_select": [{"name": "P1"}, {"name": "P2"}]
            }),
        );
        assert_eq!(normalize(&row), normalize(&row));
    }
}
