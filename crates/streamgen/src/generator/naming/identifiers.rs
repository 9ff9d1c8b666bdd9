use std::{collections::HashSet, iter::Peekable, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen",
  ]
  .into_iter()
  .collect()
});

/// Type names the emitted file already uses, either from the prelude or from its `use` list.
static RESERVED_TYPE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Box",
    "Clone",
    "Copy",
    "Default",
    "IndexMap",
    "JsonReader",
    "JsonSerializable",
    "JsonToken",
    "JsonWriter",
    "MergePatchState",
    "Option",
    "Result",
    "Self",
    "StreamError",
    "String",
    "Vec",
    "XmlReader",
    "XmlSerializable",
    "XmlToken",
    "XmlWriter",
  ]
  .into_iter()
  .collect()
});

/// Locals the emitted read loops bind themselves; a property local with one of these names is renamed.
static RESERVED_LOCALS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "buffered",
    "discriminator_value",
    "element",
    "key",
    "reader",
    "text",
    "value",
    "writer",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static NUMBERED_LOCAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(reader|writer|element)\d+$").unwrap());

/// Transliterates to ASCII, replaces runs of invalid characters with one underscore and trims
/// leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a property name into a Rust field name (`snake_case`).
///
/// Keywords get a raw identifier prefix, `self` becomes `self_`, a leading digit gets an
/// underscore and an empty result becomes `_`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let mut ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  if ident == "self" {
    return "self_".to_string();
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts a model name into a Rust type name (`PascalCase`).
///
/// Names that are already mixed case without separators keep their capitalization. Names that
/// collide with types the emitted file relies on get a `Model` suffix.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let has_separators = name.contains(['-', '_', '.', ' ']);
  let has_upper = name.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = name.chars().any(|c| c.is_ascii_lowercase());

  let ascii = any_ascii(name);
  let mut ident: String = if !has_separators && has_upper && has_lower {
    let cleaned: String = ascii.chars().filter(char::is_ascii_alphanumeric).collect();
    let mut chars = cleaned.chars();
    chars
      .next()
      .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
      .unwrap_or_default()
  } else {
    ascii
      .chars()
      .capitalize_words_with_boundaries()
      .filter(char::is_ascii_alphanumeric)
      .collect()
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if RESERVED_TYPE_NAMES.contains(ident.as_str()) {
    ident.push_str("Model");
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  ident
}

/// The identifier text without a raw `r#` prefix.
pub(crate) fn unraw(ident: &str) -> &str {
  ident.strip_prefix("r#").unwrap_or(ident)
}

pub(crate) fn setter_name(field: &str) -> String {
  format!("set_{}", unraw(field))
}

/// The dispatch enum generated for a polymorphic root.
pub(crate) fn variant_enum_name(type_name: &str) -> String {
  format!("{type_name}Variant")
}

/// The read-loop local holding a property before construction. A renamed local skips every name
/// in `taken`.
pub(crate) fn local_name(field: &str, taken: &HashSet<String>) -> String {
  let bare = unraw(field);
  if RESERVED_LOCALS.contains(bare) || NUMBERED_LOCAL_RE.is_match(bare) {
    unique_name(&format!("{bare}_value"), taken)
  } else {
    field.to_string()
  }
}

/// `base`, or `base` followed by the first number from 2 that `taken` does not hold.
pub(crate) fn unique_name(base: &str, taken: &HashSet<String>) -> String {
  std::iter::once(base.to_string())
    .chain((2_usize..).map(|n| format!("{base}{n}")))
    .find(|candidate| !taken.contains(candidate))
    .unwrap_or_default()
}

/// An extension trait for char iterators that upper-cases the first letter of every word.
///
/// Word boundaries are non-alphanumeric characters, a lower-to-upper transition and the last
/// capital of an acronym that is followed by a lowercase letter (`XMLParser` -> `XmlParser`).
pub trait CapitalizeWordsExt: Iterator<Item = char> {
  fn capitalize_words_with_boundaries(self) -> CapitalizeWords<Self>
  where
    Self: Sized;
}

impl<I> CapitalizeWordsExt for I
where
  I: Iterator<Item = char>,
{
  fn capitalize_words_with_boundaries(self) -> CapitalizeWords<Self>
  where
    Self: Sized,
  {
    CapitalizeWords {
      iter: self.peekable(),
      capitalize_next: true,
      prev_was_lower: false,
    }
  }
}

pub struct CapitalizeWords<I>
where
  I: Iterator<Item = char>,
{
  iter: Peekable<I>,
  capitalize_next: bool,
  prev_was_lower: bool,
}

impl<I> Iterator for CapitalizeWords<I>
where
  I: Iterator<Item = char>,
{
  type Item = char;

  fn next(&mut self) -> Option<Self::Item> {
    let c = self.iter.next()?;

    if !c.is_ascii_alphanumeric() {
      self.capitalize_next = self.iter.peek().is_some_and(char::is_ascii_alphanumeric);
      self.prev_was_lower = false;
      return Some(c);
    }

    let is_upper = c.is_ascii_uppercase();
    let starts_word = self.capitalize_next
      || (self.prev_was_lower && is_upper)
      || (is_upper && self.iter.peek().is_some_and(char::is_ascii_lowercase));

    self.prev_was_lower = c.is_ascii_lowercase();
    self.capitalize_next = false;

    Some(if starts_word {
      c.to_ascii_uppercase()
    } else {
      c.to_ascii_lowercase()
    })
  }
}
