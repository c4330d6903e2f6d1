//! Order line-item normalization
//!
//! Historical orders store `items` in more than one shape: a JSON-encoded
//! string or an already structured value, keyed by line id (object) or as a
//! plain list. Field names drifted as well. Everything is funnelled through
//! [`parse_order_items`], which produces the canonical [`OrderLineItem`]
//! list; nothing downstream looks at the raw payload.
//!
//! Compatibility rules kept here and nowhere else:
//! - ordered quantity: `quantity`, else the legacy misspelled `quantit`,
//!   else 1. Zero, negative or non-numeric values fall through.
//! - display name: explicit item name (`menu_item_name`, `item_name`,
//!   `combo_name`), then `name`, `title`, `description`, then a placeholder
//!   built from the identifier (`Item 12`), or [`UNKNOWN_ITEM_NAME`] when no
//!   identifier exists either. Surrounding quotes and whitespace are removed.

use crate::error::{AppError, AppResult, ErrorCode};
use serde_json::{Map, Value};

/// Placeholder for a line whose name and identifier are both missing
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

const NAME_KEYS: [&str; 6] = [
    "menu_item_name",
    "item_name",
    "combo_name",
    "name",
    "title",
    "description",
];

const ID_KEYS: [&str; 4] = ["menu_item_id", "combo_id", "item_id", "id"];

/// How deep a string-encoded payload may be nested (`"\"[...]\""`)
const MAX_ENCODING_DEPTH: u8 = 2;

/// One constituent of a combo line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboComponent {
    pub name: String,
    /// Portions of this constituent in one combo
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Simple,
    /// Combo with at least one listed constituent
    Combo(Vec<ComboComponent>),
}

/// Canonical order line item
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    pub kind: LineKind,
}

impl OrderLineItem {
    pub fn is_combo(&self) -> bool {
        matches!(self.kind, LineKind::Combo(_))
    }

    /// `(name, portions)` pairs this line contributes to a kitchen count
    ///
    /// Combo lines expand into their constituents multiplied by the ordered
    /// quantity; simple lines contribute themselves. Counts saturate at
    /// `i64::MAX`.
    pub fn portions(&self) -> Vec<(&str, i64)> {
        match &self.kind {
            LineKind::Simple => vec![(self.name.as_str(), self.quantity)],
            LineKind::Combo(components) => components
                .iter()
                .map(|c| (c.name.as_str(), c.quantity.saturating_mul(self.quantity)))
                .collect(),
        }
    }
}

/// True when a cleaned name is the unresolved placeholder
pub fn is_unknown_name(name: &str) -> bool {
    name.is_empty() || name.eq_ignore_ascii_case(UNKNOWN_ITEM_NAME)
}

/// Strip surrounding quote characters and whitespace
pub fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

/// Normalize an order's `items` payload
///
/// Returns [`ErrorCode::OrderItemsMalformed`] when the payload as a whole
/// cannot be decoded. Individual entries that are not objects are skipped.
pub fn parse_order_items(raw: &Value) -> AppResult<Vec<OrderLineItem>> {
    let entries = decode_container(raw, MAX_ENCODING_DEPTH).map_err(|reason| {
        AppError::with_message(ErrorCode::OrderItemsMalformed, reason)
    })?;

    let mut items = Vec::with_capacity(entries.len());
    for entry in &entries {
        match entry.as_object() {
            Some(obj) => items.push(parse_line(obj)),
            None => tracing::debug!(entry = %entry, "Skipping non-object order line"),
        }
    }
    Ok(items)
}

fn parse_line(obj: &Map<String, Value>) -> OrderLineItem {
    let quantity = ordered_quantity(obj);
    let unit_price = obj
        .get("price")
        .or_else(|| obj.get("unit_price"))
        .and_then(number_value);

    let components = if is_combo(obj) {
        combo_components(obj)
    } else {
        Vec::new()
    };

    let kind = if components.is_empty() {
        LineKind::Simple
    } else {
        LineKind::Combo(components)
    };

    OrderLineItem {
        name: resolve_name(obj),
        quantity,
        unit_price,
        kind,
    }
}

fn combo_components(obj: &Map<String, Value>) -> Vec<ComboComponent> {
    let Some(raw) = obj.get("combo_items") else {
        return Vec::new();
    };
    match decode_container(raw, MAX_ENCODING_DEPTH) {
        Ok(entries) => entries
            .iter()
            .filter_map(Value::as_object)
            .map(|c| ComboComponent {
                name: resolve_name(c),
                quantity: ordered_quantity(c),
            })
            .collect(),
        Err(reason) => {
            tracing::debug!(%reason, "Ignoring unreadable combo_items");
            Vec::new()
        }
    }
}

fn is_combo(obj: &Map<String, Value>) -> bool {
    let flagged = obj
        .get("is_combo")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let typed = obj
        .get("type")
        .or_else(|| obj.get("item_type"))
        .and_then(Value::as_str)
        .is_some_and(|t| t.eq_ignore_ascii_case("combo"));
    let has_combo_id = obj.get("combo_id").is_some_and(|v| !v.is_null());
    flagged || typed || has_combo_id
}

/// `quantity`, else legacy `quantit`, else 1
fn ordered_quantity(obj: &Map<String, Value>) -> i64 {
    positive_quantity(obj.get("quantity"))
        .or_else(|| positive_quantity(obj.get("quantit")))
        .unwrap_or(1)
}

fn positive_quantity(value: Option<&Value>) -> Option<i64> {
    let quantity = number_value(value?)?.round() as i64;
    (quantity > 0).then_some(quantity)
}

fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

fn resolve_name(obj: &Map<String, Value>) -> String {
    NAME_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(text_value)
        .map(|raw| clean_name(&raw))
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| placeholder_name(obj))
}

fn placeholder_name(obj: &Map<String, Value>) -> String {
    ID_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(text_value)
        .map(|raw| clean_name(&raw))
        .find(|id| !id.is_empty())
        .map(|id| format!("Item {id}"))
        .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string())
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode_container(value: &Value, depth: u8) -> Result<Vec<Value>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.clone()),
        Value::Object(map) => Ok(map.values().cloned().collect()),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Vec::new());
            }
            if depth == 0 {
                return Err("items payload is encoded too many times".to_string());
            }
            let decoded: Value = serde_json::from_str(text)
                .map_err(|e| format!("items payload is not valid JSON: {e}"))?;
            decode_container(&decoded, depth - 1)
        }
        Value::Bool(_) | Value::Number(_) => {
            Err(format!("items payload has unexpected scalar value {value}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_fallback_chain() {
        let items = parse_order_items(&json!([
            {"name": "Rice", "quantity": 3},
            {"name": "Dal", "quantit": 2},
            {"name": "Naan"},
            {"name": "Raita", "quantity": 0, "quantit": 5},
            {"name": "Chutney", "quantity": "4"},
        ]))
        .unwrap();
        let quantities: Vec<i64> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![3, 2, 1, 5, 4]);
    }

    #[test]
    fn test_name_fallback_chain() {
        let items = parse_order_items(&json!([
            {"menu_item_name": "  \"Paneer Tikka\" ", "name": "ignored"},
            {"title": "Samosa"},
            {"description": "'Lassi'"},
            {"menu_item_id": 17},
            {"quantity": 2},
        ]))
        .unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Paneer Tikka", "Samosa", "Lassi", "Item 17", UNKNOWN_ITEM_NAME]
        );
    }

    #[test]
    fn test_empty_name_falls_through() {
        let items = parse_order_items(&json!([{"name": "\"\"", "title": "Kheer"}])).unwrap();
        assert_eq!(items[0].name, "Kheer");
    }

    #[test]
    fn test_combo_detection_and_components() {
        let items = parse_order_items(&json!({
            "line-1": {
                "combo_id": 4,
                "combo_name": "Thali",
                "quantity": 2,
                "combo_items": [
                    {"menu_item_name": "A", "quantity": 1},
                    {"menu_item_name": "B", "quantity": 3}
                ]
            }
        }))
        .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_combo());
        assert_eq!(items[0].portions(), vec![("A", 2), ("B", 6)]);
    }

    #[test]
    fn test_combo_without_components_is_simple() {
        let items = parse_order_items(&json!([
            {"is_combo": true, "name": "Party Box", "quantity": 3, "combo_items": []}
        ]))
        .unwrap();
        assert_eq!(items[0].kind, LineKind::Simple);
        assert_eq!(items[0].portions(), vec![("Party Box", 3)]);
    }

    #[test]
    fn test_string_and_structured_shapes_match() {
        let structured = json!({
            "x": {"name": "C", "quantity": 4, "price": 2.5},
            "y": {"type": "combo", "name": "Box", "quantity": 2,
                  "combo_items": [{"name": "A", "quantity": 1}]}
        });
        let encoded = Value::String(structured.to_string());
        assert_eq!(
            parse_order_items(&structured).unwrap(),
            parse_order_items(&encoded).unwrap()
        );
    }

    #[test]
    fn test_double_encoded_payload() {
        let inner = json!([{"name": "Soup"}]).to_string();
        let twice = Value::String(Value::String(inner).to_string());
        let items = parse_order_items(&twice).unwrap();
        assert_eq!(items[0].name, "Soup");
    }

    #[test]
    fn test_malformed_payloads() {
        let err = parse_order_items(&json!("{not json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemsMalformed);
        assert!(parse_order_items(&json!(42)).is_err());
        assert!(parse_order_items(&Value::Null).unwrap().is_empty());
        assert!(parse_order_items(&json!("")).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_entries_skipped() {
        let items = parse_order_items(&json!([1, "x", {"name": "Tea"}])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tea");
    }

    #[test]
    fn test_is_unknown_name() {
        assert!(is_unknown_name(UNKNOWN_ITEM_NAME));
        assert!(is_unknown_name("unknown item"));
        assert!(is_unknown_name(""));
        assert!(!is_unknown_name("Item 3"));
    }
}
