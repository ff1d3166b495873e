//! Caller-owned grid items.

use super::identifiers::ItemId;
use serde::{Deserialize, Serialize};

/// A unit of content to be placed in the grid.
///
/// Items are owned by the caller and handed to the layout pipeline wholesale on
/// every pass. The pipeline never mutates them; the config deriver produces a
/// normalized copy with resolved `width`/`height`.
///
/// # Column span
/// `column_span <= 0` means "span the full row width". Positive values are
/// taken literally and clipped by the packer if they overflow the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier.
    pub id: ItemId,
    /// Natural width. When absent, `height` is used as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Natural height, or the literal pixel height when `width` is absent.
    #[serde(default)]
    pub height: f64,
    /// Number of columns occupied.
    #[serde(default = "default_column_span", alias = "column_span")]
    pub column_span: i32,
    /// Force this item to start a fresh row.
    #[serde(default, alias = "new_row")]
    pub new_row: bool,
    /// Opaque rendering payload, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

fn default_column_span() -> i32 {
    1
}

impl Item {
    /// Create a single-column item with a literal pixel height.
    pub fn new(id: ItemId, height: f64) -> Self {
        Self {
            id,
            width: None,
            height,
            column_span: 1,
            new_row: false,
            payload: serde_json::Value::Null,
        }
    }

    /// Set the natural size; height will be recomputed from the aspect ratio.
    pub fn with_natural_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = height;
        self
    }

    /// Set the column span.
    pub fn with_column_span(mut self, column_span: i32) -> Self {
        self.column_span = column_span;
        self
    }

    /// Force the item onto a new row.
    pub fn with_new_row(mut self) -> Self {
        self.new_row = true;
        self
    }

    /// Attach a rendering payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Column span with the "full row" convention applied.
    pub fn resolved_span(&self, column_count: usize) -> usize {
        if self.column_span <= 0 {
            column_count
        } else {
            self.column_span as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).expect("valid item id")
    }

    mod deserialization {
        use super::*;

        #[test]
        fn minimal_item_gets_defaults() {
            let item: Item = serde_json::from_str(r#"{"id":"a","height":120}"#).unwrap();
            assert_eq!(item, Item::new(id("a"), 120.0));
        }

        #[test]
        fn accepts_camel_case_and_snake_case_fields() {
            let camel: Item =
                serde_json::from_str(r#"{"id":"a","columnSpan":2,"newRow":true}"#).unwrap();
            let snake: Item =
                serde_json::from_str(r#"{"id":"a","column_span":2,"new_row":true}"#).unwrap();
            assert_eq!(camel, snake);
            assert_eq!(camel.column_span, 2);
            assert!(camel.new_row);
        }

        #[test]
        fn payload_is_preserved() {
            let item: Item =
                serde_json::from_str(r#"{"id":"a","payload":{"src":"x.png"}}"#).unwrap();
            assert_eq!(item.payload["src"], "x.png");
        }
    }

    mod resolved_span {
        use super::*;

        #[test]
        fn non_positive_span_means_full_row() {
            let item = Item::new(id("a"), 10.0).with_column_span(0);
            assert_eq!(item.resolved_span(4), 4);
            let item = Item::new(id("a"), 10.0).with_column_span(-3);
            assert_eq!(item.resolved_span(3), 3);
        }

        #[test]
        fn positive_span_is_literal_even_when_too_wide() {
            let item = Item::new(id("a"), 10.0).with_column_span(6);
            assert_eq!(item.resolved_span(4), 6);
        }
    }
}
