//! XML decoding for Entrez `efetch` responses.
//!
//! PubMed returns a `PubmedArticleSet` document. Rather than binding it to a fixed
//! schema, the document is converted into a generic [`Value`] tree (see
//! [`record`](crate::record) for the conventions) so that records with unusual or
//! partial structure still decode and can be judged field by field.

use quick_xml::{events::Event, Reader};
use serde_json::Map;

use super::*;

/// Key holding an element's text content when it also has attributes or children.
pub const TEXT_KEY: &str = "$text";

/// Inline markup PubMed allows inside titles, abstracts and affiliations. Their text
/// belongs to the enclosing element.
pub const INLINE_TAGS: &[&str] = &["i", "b", "u", "sup", "sub"];

/// An element still being read.
#[derive(Default)]
struct Frame {
  /// Element name
  tag:       String,
  /// Attributes and completed children
  map:       Map<String, Value>,
  /// Own text plus the text of inline children, in document order
  full_text: String,
  /// Whether `full_text` holds anything besides whitespace
  has_text:  bool,
}

impl Frame {
  fn push_text(&mut self, text: &str) {
    if !text.trim().is_empty() {
      self.has_text = true;
    }
    self.full_text.push_str(text);
  }

  fn into_value(mut self) -> Value {
    if !self.has_text {
      return Value::Object(self.map);
    }
    let text = Value::String(self.full_text.trim().to_string());
    if self.map.is_empty() {
      text
    } else {
      self.map.insert(TEXT_KEY.to_string(), text);
      Value::Object(self.map)
    }
  }
}

/// Adds a completed child to its parent, turning repeated elements into arrays.
///
/// Inline markup also contributes its text to the parent. Structural children keep
/// their text to themselves.
fn attach(parent: &mut Frame, child: Frame) {
  if INLINE_TAGS.contains(&child.tag.as_str()) {
    parent.push_text(&child.full_text);
  }
  let tag = child.tag.clone();
  let value = child.into_value();

  match parent.map.get_mut(&tag) {
    Some(Value::Array(items)) => items.push(value),
    Some(existing) => {
      let first = existing.take();
      *existing = Value::Array(vec![first, value]);
    },
    None => {
      parent.map.insert(tag, value);
    },
  }
}

/// Starts a frame for an element, recording its attributes under `"@name"` keys.
fn open(e: &quick_xml::events::BytesStart) -> Result<Frame> {
  let mut frame =
    Frame { tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(), ..Default::default() };
  for attr in e.attributes().flatten() {
    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
    let value = attr.unescape_value()?;
    frame.map.insert(format!("@{key}"), Value::String(value.into_owned()));
  }
  Ok(frame)
}

/// Converts an XML document into a [`Value`] tree.
///
/// # Examples
///
/// ```
/// use pubmed_query::retriever::xml::convert_to_json;
/// use serde_json::json;
///
/// let value = convert_to_json(r#"<PMID Version="1">31452104</PMID>"#).unwrap();
/// assert_eq!(value, json!({ "PMID": { "@Version": "1", "$text": "31452104" } }));
/// ```
pub fn convert_to_json(xml: &str) -> Result<Value> {
  let mut reader = Reader::from_str(xml);
  let mut stack = vec![Frame::default()];

  loop {
    match reader.read_event()? {
      Event::Start(e) => stack.push(open(&e)?),
      Event::Empty(e) => {
        let frame = open(&e)?;
        if let Some(parent) = stack.last_mut() {
          attach(parent, frame);
        }
      },
      Event::Text(e) =>
        if let Some(frame) = stack.last_mut() {
          frame.push_text(&e.unescape()?);
        },
      Event::CData(e) =>
        if let Some(frame) = stack.last_mut() {
          frame.push_text(&String::from_utf8_lossy(&e.into_inner()));
        },
      Event::End(_) =>
        if stack.len() > 1 {
          if let (Some(child), Some(parent)) = (stack.pop(), stack.last_mut()) {
            attach(parent, child);
          }
        },
      Event::Eof => break,
      _ => (),
    }
  }

  // Unclosed elements are folded into their parents.
  while stack.len() > 1 {
    if let (Some(child), Some(parent)) = (stack.pop(), stack.last_mut()) {
      attach(parent, child);
    }
  }

  Ok(stack.pop().map_or(Value::Null, |root| Value::Object(root.map)))
}

/// Decodes an `efetch` response into one [`RawRecord`] per `PubmedArticle`.
///
/// Returns [`QueryError::ApiError`] when the document is not a `PubmedArticleSet`,
/// which is how Entrez reports failures such as unknown identifiers.
pub fn parse_article_set(xml: &str) -> Result<Vec<RawRecord>> {
  let mut document = convert_to_json(xml)?;

  if document.get("PubmedArticleSet").is_none() {
    let reason = Field::from(&document)
      .get("eFetchResult")
      .get("ERROR")
      .first_text()
      .unwrap_or_else(|| "response is not a PubmedArticleSet".to_string());
    return Err(QueryError::ApiError(reason));
  }

  let articles = match document["PubmedArticleSet"].get_mut("PubmedArticle").map(Value::take) {
    None | Some(Value::Null) => Vec::new(),
    Some(Value::Array(items)) => items,
    Some(single) => vec![single],
  };
  trace!("Decoded {} PubmedArticle elements", articles.len());

  Ok(articles.into_iter().map(RawRecord::new).collect())
}
