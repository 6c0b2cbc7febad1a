//! Raw PubMed records and explicit field access.
//!
//! A [`RawRecord`] is one `PubmedArticle` decoded into a [`Value`] tree by
//! [`convert_to_json`](crate::retriever::xml::convert_to_json). The tree follows a
//! few conventions:
//!
//! - elements become objects keyed by child element name
//! - attributes are stored under `"@name"` keys
//! - text content is stored under `"$text"`, or as a bare string when the element has
//!   nothing but text
//! - repeated child elements are collected into an array
//!
//! Because a child element may decode as a string, an object or an array depending
//! on what a particular record contains, lookups go through [`Field`], which makes
//! each of those shapes (and absence) an explicit case.

use serde_json::Map;

use super::*;

/// One undecoded bibliographic record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(Value);

impl RawRecord {
  /// Wraps a decoded value tree.
  pub fn new(value: Value) -> Self { Self(value) }

  /// Entry point for field access.
  pub fn root(&self) -> Field<'_> { Field::from(&self.0) }
}

/// The shape of a value found (or not found) at some point in a [`RawRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
  /// The key was absent or explicitly null.
  Missing,
  /// A text value.
  Text(&'a str),
  /// A number or boolean, kept as-is.
  Scalar(&'a Value),
  /// A repeated element.
  List(&'a [Value]),
  /// An element with children and/or attributes.
  Node(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for Field<'a> {
  fn from(value: &'a Value) -> Self {
    match value {
      Value::Null => Field::Missing,
      Value::String(s) => Field::Text(s),
      Value::Array(items) => Field::List(items),
      Value::Object(map) => Field::Node(map),
      scalar => Field::Scalar(scalar),
    }
  }
}

impl<'a> Field<'a> {
  /// Whether nothing was found.
  pub fn is_missing(self) -> bool { matches!(self, Field::Missing) }

  /// Looks up a child element. Anything other than a [`Field::Node`] has no children,
  /// so the lookup yields [`Field::Missing`].
  pub fn get(self, key: &str) -> Field<'a> {
    match self {
      Field::Node(map) => map.get(key).map_or(Field::Missing, Field::from),
      _ => Field::Missing,
    }
  }

  /// Looks up a child element that must exist and must be an element with children.
  ///
  /// `path` names the child for error reporting, e.g. `"MedlineCitation.Article"`.
  pub fn node(self, key: &str, path: &str) -> Result<Field<'a>> {
    match self.get(key) {
      node @ Field::Node(_) => Ok(node),
      Field::Missing => Err(QueryError::MalformedRecord(format!("missing `{path}`"))),
      _ => Err(QueryError::MalformedRecord(format!("`{path}` is not an element"))),
    }
  }

  /// Reads an attribute stored under `"@name"`.
  pub fn attribute(self, name: &str) -> Option<String> { self.get(&format!("@{name}")).text() }

  /// Text content of this field, if it has any. Elements report their `"$text"`;
  /// lists have no text of their own.
  pub fn text(self) -> Option<String> {
    match self {
      Field::Text(s) => Some(s.to_string()),
      Field::Scalar(value) => Some(value.to_string()),
      Field::Node(map) => map.get("$text").and_then(|text| Field::from(text).text()),
      Field::List(_) | Field::Missing => None,
    }
  }

  /// Text of the first element when this is a list, otherwise the field's own text.
  pub fn first_text(self) -> Option<String> {
    match self {
      Field::List(items) => items.first().and_then(|first| Field::from(first).text()),
      other => other.text(),
    }
  }

  /// Treats this field as a sequence of elements.
  ///
  /// A single element decodes as a node rather than a one-item list, so a node is
  /// returned as a sequence of one. Absence is an empty sequence. Bare text or
  /// scalars cannot hold elements and are reported as malformed at `path`.
  pub fn items(self, path: &str) -> Result<Vec<Field<'a>>> {
    match self {
      Field::Missing => Ok(Vec::new()),
      Field::List(items) => Ok(items.iter().map(Field::from).collect()),
      node @ Field::Node(_) => Ok(vec![node]),
      Field::Text(_) | Field::Scalar(_) =>
        Err(QueryError::MalformedRecord(format!("`{path}` does not contain elements"))),
    }
  }
}
