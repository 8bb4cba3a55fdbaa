// src/model/property.rs
use serde::{Deserialize, Deserializer, Serialize};

/// The typed union of Notion database properties this gateway flattens.
///
/// The wire format carries a `type` discriminator next to a payload field
/// of the same name, so the enum is internally tagged. The `Unsupported`
/// arm matches every discriminator not listed here (people, files,
/// checkbox, email, phone, formula, relation, rollup, timestamps, status,
/// and any type Notion ships in the future), which keeps decoding total:
/// an unrecognized property degrades to an undefined value instead of
/// failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default, deserialize_with = "lenient")]
        title: Vec<RichTextFragment>,
    },
    RichText {
        #[serde(default, deserialize_with = "lenient")]
        rich_text: Vec<RichTextFragment>,
    },
    Number {
        #[serde(default, deserialize_with = "lenient")]
        number: Option<f64>,
    },
    Select {
        #[serde(default, deserialize_with = "lenient")]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default, deserialize_with = "lenient")]
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(default, deserialize_with = "lenient")]
        date: Option<DateRange>,
    },
    Url {
        #[serde(default, deserialize_with = "lenient")]
        url: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Parses one property out of its raw wire value.
    ///
    /// Never fails: a payload that doesn't deserialize (missing `type`
    /// discriminator, or not an object at all) lands on `Unsupported`.
    pub fn from_json(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or(PropertyValue::Unsupported)
    }

    /// Returns the wire type name for this property value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Number { .. } => "number",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Unsupported => "unsupported",
        }
    }
}

/// One block of rich text. Annotations, links, and mention payloads are
/// ignored; `plain_text` is the flattened rendering the export needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextFragment {
    #[serde(default)]
    pub plain_text: String,
}

/// A select or multi-select option. Only the display name survives
/// flattening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

/// A date property's range. Start and end stay as the ISO-8601 strings
/// the API sent; no timezone re-parsing happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Deserializes a payload field best-effort: a value of the wrong shape
/// falls back to the field's default instead of rejecting the property.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tagged_payloads_deserialize_by_discriminator() {
        let prop = PropertyValue::from_json(json!({
            "id": "abc",
            "type": "select",
            "select": {"id": "opt1", "name": "Bug", "color": "red"}
        }));
        assert_eq!(
            prop,
            PropertyValue::Select {
                select: Some(SelectOption {
                    name: "Bug".to_string()
                })
            }
        );
    }

    #[test]
    fn unknown_discriminator_falls_to_unsupported() {
        let prop = PropertyValue::from_json(json!({
            "type": "super_widget",
            "super_widget": {"anything": true}
        }));
        assert_eq!(prop, PropertyValue::Unsupported);
        assert_eq!(prop.type_name(), "unsupported");
    }

    #[test]
    fn missing_discriminator_falls_to_unsupported() {
        assert_eq!(
            PropertyValue::from_json(json!({"title": []})),
            PropertyValue::Unsupported
        );
        assert_eq!(PropertyValue::from_json(json!(42)), PropertyValue::Unsupported);
    }

    #[test]
    fn wrong_shaped_payload_degrades_to_default() {
        // A title payload that isn't a list decodes as an empty title,
        // not a failed property.
        let prop = PropertyValue::from_json(json!({
            "type": "title",
            "title": {"not": "a list"}
        }));
        assert_eq!(prop, PropertyValue::Title { title: Vec::new() });
    }
}
