//! Catalog entries and the identifiers used to link to them.
//!
//! The source JSON is hand-maintained, so parsing is lenient: every array
//! element becomes exactly one [`Entry`] regardless of its shape. Positional
//! identifiers depend on that.

use serde_json::Value;

use crate::loader::LoadError;

/// Stable identifier carried by an entry in the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryId {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryId::Text(s) => f.write_str(s),
            EntryId::Number(n) => f.write_str(&number_text(n)),
        }
    }
}

/// Render a JSON number the way a browser stringifies it: whole-valued
/// floats drop the fraction, so `7.0` and `7` both read `"7"`.
pub fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// One catalog item. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub id: Option<EntryId>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl Entry {
    /// Build an entry from one element of the source array.
    /// Fields of the wrong type are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        let id = match obj.get("id") {
            Some(Value::String(s)) => Some(EntryId::Text(s.clone())),
            Some(Value::Number(n)) => Some(EntryId::Number(n.clone())),
            _ => None,
        };

        // Years are often written as bare numbers
        let year = match obj.get("year") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(number_text(n)),
            _ => None,
        };

        Self {
            id,
            title: text("title"),
            year,
            genre: text("genre"),
            image: text("image"),
            url: text("url"),
        }
    }

    /// Identifier used in links: the `id` when present, otherwise the
    /// entry's position in the unfiltered list.
    pub fn identifier(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }

    /// Title for display; empty when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// `title • year • genre`, skipping absent parts.
    pub fn meta_line(&self) -> String {
        let mut parts = vec![self.display_title().to_string()];
        parts.extend(
            [&self.year, &self.genre]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .cloned(),
        );
        parts.join(" • ")
    }
}

/// Parse the catalog file contents.
///
/// Invalid JSON is an error. Valid JSON that is not an array is an empty
/// catalog.
pub fn parse_catalog_str(content: &str) -> Result<Vec<Entry>, LoadError> {
    let value: Value = serde_json::from_str(content)?;
    Ok(parse_catalog_value(&value))
}

pub fn parse_catalog_value(value: &Value) -> Vec<Entry> {
    match value {
        Value::Array(items) => items.iter().map(Entry::from_value).collect(),
        other => {
            tracing::warn!(
                "catalog root is not an array ({}), treating as empty",
                json_kind(other)
            );
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Identifier encoding ───────────────────────────────────────────────────────

/// Percent-encode an identifier for use as a URL query value.
pub fn encode_identifier(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// `base?id=<encoded>`
pub fn share_link(base: &str, id: &str) -> String {
    format!("{}?id={}", base, encode_identifier(id))
}

/// Extract an identifier from either a bare identifier or a link carrying
/// an `id=` query parameter. Returns `None` when there is nothing to look up.
///
/// Only the `id=` value is URL-decoded; bare text is taken literally.
pub fn identifier_from_link(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Some((_, query)) = text.split_once('?') else {
        return Some(text.to_string());
    };
    let query = query.split('#').next().unwrap_or("");

    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| decode_component(value))
        .filter(|id| !id.is_empty())
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Lenient integer parse: optional leading whitespace, optional sign, then
/// the leading run of ASCII digits. `"7abc"` is 7, `"abc"` is `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Digit runs too long for i64 cannot index anything anyway
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
