use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute names captured into a snapshot, in the order strategies use them.
pub static RECOGNIZED_ATTRIBUTES: [&str; 5] = ["id", "class", "name", "type", "href"];

/// Viewport-relative geometry of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when every dimension differs from `other` by strictly less than
    /// `tolerance`.
    pub fn within(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.width - other.width).abs() < tolerance
            && (self.height - other.height).abs() < tolerance
    }
}

/// The recognized attribute set of a captured element. Absent attributes are
/// omitted on write and `null` values read back as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl SnapshotAttributes {
    /// Builds the recognized set from an arbitrary attribute lookup.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self {
            id: lookup("id"),
            class: lookup("class"),
            name: lookup("name"),
            kind: lookup("type"),
            href: lookup("href"),
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        let value = match attribute {
            "id" => &self.id,
            "class" => &self.class,
            "name" => &self.name,
            "type" => &self.kind,
            "href" => &self.href,
            _ => return None,
        };
        value.as_deref()
    }

    /// Present attributes in [`RECOGNIZED_ATTRIBUTES`] order. Empty values are
    /// treated as absent.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        RECOGNIZED_ATTRIBUTES.iter().filter_map(move |attr| {
            self.get(attr)
                .filter(|value| !value.is_empty())
                .map(|value| (*attr, value))
        })
    }

    /// Whitespace separated class tokens, empty when no class was recorded.
    pub fn class_tokens(&self) -> Vec<&str> {
        self.class
            .as_deref()
            .map(|class| class.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Durable record of a previously found element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub selector: String,
    pub tag_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: SnapshotAttributes,
    #[serde(alias = "position")]
    pub bounding_box: BoundingBox,
    #[serde(alias = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

impl ElementSnapshot {
    /// Compares everything but the capture timestamp.
    pub fn same_state(&self, other: &ElementSnapshot) -> bool {
        self.selector == other.selector
            && self.tag_name == other.tag_name
            && self.text == other.text
            && self.attributes == other.attributes
            && self.bounding_box == other.bounding_box
    }
}
