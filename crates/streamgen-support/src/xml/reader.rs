use std::{borrow::Cow, sync::Arc};

use quick_xml::{Reader, escape::unescape, events::Event};

use super::{QName, XmlToken};
use crate::StreamError;

#[derive(Debug, Clone, PartialEq)]
enum XmlEvent {
  Start { name: QName, attributes: Vec<(QName, String)> },
  End,
  Text(String),
}

type NamespaceScope = Vec<(Option<String>, String)>;

fn split_prefix(raw: &str) -> (Option<&str>, &str) {
  match raw.split_once(':') {
    Some((prefix, local)) => (Some(prefix), local),
    None => (None, raw),
  }
}

fn resolve(scopes: &[NamespaceScope], prefix: Option<&str>) -> Option<String> {
  scopes
    .iter()
    .rev()
    .flat_map(|scope| scope.iter())
    .find(|(declared, _)| declared.as_deref() == prefix)
    .map(|(_, uri)| uri.clone())
    .filter(|uri| !uri.is_empty())
}

fn unescape_text(raw: &[u8]) -> Result<String, StreamError> {
  let text = String::from_utf8_lossy(raw);
  unescape(&text).map(Cow::into_owned).map_err(StreamError::xml)
}

fn resolve_reference(name: &str) -> Result<char, StreamError> {
  let resolved = match name {
    "amp" => Some('&'),
    "lt" => Some('<'),
    "gt" => Some('>'),
    "quot" => Some('"'),
    "apos" => Some('\''),
    _ => name.strip_prefix('#').and_then(|code| {
      let value = match code.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => code.parse().ok(),
      };
      value.and_then(char::from_u32)
    }),
  };
  resolved.ok_or_else(|| StreamError::Xml(format!("unknown entity reference '&{name};'")))
}

fn push_text(events: &mut Vec<XmlEvent>, text: &str) {
  if let Some(XmlEvent::Text(existing)) = events.last_mut() {
    existing.push_str(text);
  } else {
    events.push(XmlEvent::Text(text.to_string()));
  }
}

fn start_event(
  raw_name: &[u8],
  raw_attributes: Vec<(String, String)>,
  scopes: &mut Vec<NamespaceScope>,
) -> XmlEvent {
  let mut scope = NamespaceScope::new();
  let mut attributes = Vec::new();
  for (key, value) in raw_attributes {
    if key == "xmlns" {
      scope.push((None, value));
    } else if let Some(prefix) = key.strip_prefix("xmlns:") {
      scope.push((Some(prefix.to_string()), value));
    } else {
      attributes.push((key, value));
    }
  }
  scopes.push(scope);

  let raw_name = String::from_utf8_lossy(raw_name);
  let (prefix, local) = split_prefix(&raw_name);
  let name = QName {
    namespace: resolve(scopes, prefix),
    local: local.to_string(),
  };
  let attributes = attributes
    .into_iter()
    .map(|(key, value)| {
      let (prefix, local) = split_prefix(&key);
      let namespace = prefix.and_then(|prefix| resolve(scopes, Some(prefix)));
      (
        QName {
          namespace,
          local: local.to_string(),
        },
        value,
      )
    })
    .collect();
  XmlEvent::Start { name, attributes }
}

fn tokenize(xml: &str) -> Result<Vec<XmlEvent>, StreamError> {
  let mut reader = Reader::from_str(xml);
  let mut events = Vec::new();
  let mut scopes: Vec<NamespaceScope> = Vec::new();

  loop {
    match reader.read_event().map_err(StreamError::xml)? {
      Event::Start(start) => {
        let attributes = read_attributes(&start)?;
        events.push(start_event(start.name().as_ref(), attributes, &mut scopes));
      }
      Event::Empty(start) => {
        let attributes = read_attributes(&start)?;
        events.push(start_event(start.name().as_ref(), attributes, &mut scopes));
        events.push(XmlEvent::End);
        scopes.pop();
      }
      Event::End(_) => {
        events.push(XmlEvent::End);
        scopes.pop();
      }
      Event::Text(text) => push_text(&mut events, &unescape_text(&text)?),
      Event::CData(data) => push_text(&mut events, &String::from_utf8_lossy(&data)),
      Event::GeneralRef(reference) => {
        let name = String::from_utf8_lossy(&reference);
        push_text(&mut events, resolve_reference(&name)?.encode_utf8(&mut [0; 4]));
      }
      Event::Eof => break,
      _ => {}
    }
  }
  Ok(events)
}

fn read_attributes(start: &quick_xml::events::BytesStart<'_>) -> Result<Vec<(String, String)>, StreamError> {
  start
    .attributes()
    .map(|attribute| {
      let attribute = attribute.map_err(StreamError::xml)?;
      let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
      Ok((key, unescape_text(&attribute.value)?))
    })
    .collect()
}

/// A pull reader over a parsed XML document, navigating element by element.
///
/// Like the JSON reader, the document is tokenized up front so that
/// [`XmlReader::buffer_element`] and [`XmlReader::reset`] can replay an element.
/// Text is never surfaced as a token; it is read through [`XmlReader::get_string_element`].
#[derive(Debug, Clone)]
pub struct XmlReader {
  events: Arc<[XmlEvent]>,
  start: usize,
  end: usize,
  position: Option<usize>,
}

impl XmlReader {
  pub fn parse(xml: &str) -> Result<Self, StreamError> {
    let events = tokenize(xml)?;
    let end = events.len();
    Ok(Self {
      events: events.into(),
      start: 0,
      end,
      position: None,
    })
  }

  fn seek_structural(&mut self, from: usize) -> XmlToken {
    let next = (from..self.end)
      .find(|index| !matches!(self.events[*index], XmlEvent::Text(_)))
      .unwrap_or(self.end);
    self.position = Some(next);
    self.current_token().unwrap_or(XmlToken::EndDocument)
  }

  /// Advances to the next start or end tag, skipping text.
  pub fn next_element(&mut self) -> XmlToken {
    let from = self.position.map_or(self.start, |position| (position + 1).min(self.end));
    self.seek_structural(from)
  }

  #[must_use]
  pub fn current_token(&self) -> Option<XmlToken> {
    self.position.map(|position| match self.events.get(position) {
      Some(XmlEvent::Start { .. }) if position < self.end => XmlToken::StartElement,
      Some(XmlEvent::End) if position < self.end => XmlToken::EndElement,
      _ => XmlToken::EndDocument,
    })
  }

  fn ensure_started(&mut self) {
    if self.position.is_none() {
      self.next_element();
    }
  }

  fn current_start(&self) -> Option<(&QName, &[(QName, String)])> {
    match self.position.filter(|position| *position < self.end).map(|position| &self.events[position]) {
      Some(XmlEvent::Start { name, attributes }) => Some((name, attributes.as_slice())),
      _ => None,
    }
  }

  pub fn element_name(&self) -> Result<QName, StreamError> {
    self
      .current_start()
      .map(|(name, _)| name.clone())
      .ok_or_else(|| StreamError::Xml("reader is not positioned on a start element".to_string()))
  }

  #[must_use]
  pub fn get_string_attribute(&self, namespace: Option<&str>, local: &str) -> Option<String> {
    let (_, attributes) = self.current_start()?;
    attributes
      .iter()
      .find(|(name, _)| name.is(namespace, local))
      .map(|(_, value)| value.clone())
  }

  fn matching_end(&self, start: usize) -> usize {
    let mut depth = 0usize;
    for index in start..self.end {
      match self.events[index] {
        XmlEvent::Start { .. } => depth += 1,
        XmlEvent::End => {
          depth -= 1;
          if depth == 0 {
            return index;
          }
        }
        XmlEvent::Text(_) => {}
      }
    }
    self.end
  }

  /// Reads the text content of the current element and leaves the reader on its end tag.
  pub fn get_string_element(&mut self) -> Result<String, StreamError> {
    self.ensure_started();
    let Some(start) = self.position.filter(|_| self.current_start().is_some()) else {
      return Err(StreamError::Xml("reader is not positioned on a start element".to_string()));
    };
    let end = self.matching_end(start);
    let text = self.events[start..end]
      .iter()
      .filter_map(|event| match event {
        XmlEvent::Text(text) => Some(text.as_str()),
        _ => None,
      })
      .collect();
    self.position = Some(end);
    Ok(text)
  }

  /// Moves past the current element's children, leaving the reader on its end tag.
  pub fn skip_element(&mut self) {
    if let Some(position) = self.position
      && self.current_start().is_some()
    {
      self.position = Some(self.matching_end(position));
    }
  }

  /// Verifies the current element's name before handing the reader to `read`.
  ///
  /// `local` may carry a `prefix:`; only the part after it is compared.
  pub fn read_object<T>(
    &mut self,
    namespace: Option<&str>,
    local: &str,
    read: impl FnOnce(&mut Self) -> Result<T, StreamError>,
  ) -> Result<T, StreamError> {
    self.ensure_started();
    let local = local.rsplit_once(':').map_or(local, |(_, local)| local);
    let name = self.element_name()?;
    if !name.is(namespace, local) {
      return Err(StreamError::UnexpectedElement {
        expected: local.to_string(),
        found: name.local,
      });
    }
    read(self)
  }

  /// Captures the current element as an independent reader and moves this reader to its end tag.
  pub fn buffer_element(&mut self) -> Result<XmlReader, StreamError> {
    self.ensure_started();
    let Some(start) = self.position.filter(|_| self.current_start().is_some()) else {
      return Err(StreamError::Xml("reader is not positioned on a start element".to_string()));
    };
    let end = self.matching_end(start);
    self.position = Some(end);
    Ok(Self {
      events: Arc::clone(&self.events),
      start,
      end: (end + 1).min(self.end),
      position: None,
    })
  }

  #[must_use]
  pub fn reset(&self) -> XmlReader {
    Self {
      events: Arc::clone(&self.events),
      start: self.start,
      end: self.end,
      position: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_navigates_children_and_text() {
    let mut reader = XmlReader::parse(r#"<?xml version="1.0"?><pet id="7"><name>Rex &amp; co</name><tag/></pet>"#).unwrap();
    assert_eq!(reader.next_element(), XmlToken::StartElement);
    assert_eq!(reader.element_name().unwrap().local, "pet");
    assert_eq!(reader.get_string_attribute(None, "id").as_deref(), Some("7"));

    assert_eq!(reader.next_element(), XmlToken::StartElement);
    assert_eq!(reader.get_string_element().unwrap(), "Rex & co");
    assert_eq!(reader.current_token(), Some(XmlToken::EndElement));

    assert_eq!(reader.next_element(), XmlToken::StartElement);
    assert_eq!(reader.element_name().unwrap().local, "tag");
    assert_eq!(reader.get_string_element().unwrap(), "");
    assert_eq!(reader.next_element(), XmlToken::EndElement);
    assert_eq!(reader.next_element(), XmlToken::EndDocument);
  }

  #[test]
  fn test_resolves_namespaces() {
    let mut reader =
      XmlReader::parse(r#"<p:pet xmlns:p="urn:pets" xmlns="urn:default"><name p:lang="en">x</name></p:pet>"#).unwrap();
    reader.next_element();
    assert_eq!(reader.element_name().unwrap().namespace.as_deref(), Some("urn:pets"));
    reader.next_element();
    let name = reader.element_name().unwrap();
    assert!(name.is(Some("urn:default"), "name"));
    assert_eq!(reader.get_string_attribute(Some("urn:pets"), "lang").as_deref(), Some("en"));
  }

  #[test]
  fn test_buffer_element_replays() {
    let mut reader = XmlReader::parse(r#"<list><shape kind="circle"><radius>2</radius></shape><after/></list>"#).unwrap();
    reader.next_element();
    reader.next_element();
    let buffered = reader.buffer_element().unwrap();
    assert_eq!(reader.next_element(), XmlToken::StartElement);
    assert_eq!(reader.element_name().unwrap().local, "after");

    let mut replay = buffered.reset();
    assert_eq!(replay.next_element(), XmlToken::StartElement);
    assert_eq!(replay.get_string_attribute(None, "kind").as_deref(), Some("circle"));
    replay.skip_element();
    assert_eq!(replay.next_element(), XmlToken::EndDocument);
  }

  #[test]
  fn test_read_object_checks_name() {
    let mut reader = XmlReader::parse("<cat/>").unwrap();
    let error = reader.read_object(None, "dog", |_| Ok(())).unwrap_err();
    assert_eq!(error.to_string(), "expected XML element 'dog' but found 'cat'");

    let mut reader = XmlReader::parse(r#"<p:pet xmlns:p="urn:pets"/>"#).unwrap();
    assert!(reader.read_object(None, "p:pet", |_| Ok(())).is_ok());
  }

  #[test]
  fn test_character_references() {
    assert_eq!(resolve_reference("#x41").unwrap(), 'A');
    assert_eq!(resolve_reference("#66").unwrap(), 'B');
    assert!(resolve_reference("nbsp").is_err());
  }
}
