use std::collections::HashSet;

use super::ClassifiedProperty;
use crate::generator::errors::GenerationError;

/// Splits a serialized name on unescaped `.`; `\.` stays a literal dot inside a segment.
pub(crate) fn split_flatten_path(serialized_name: &str) -> Vec<String> {
  let mut segments = vec![];
  let mut current = String::new();
  let mut chars = serialized_name.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' if chars.peek() == Some(&'.') => {
        chars.next();
        current.push('.');
      }
      '.' => segments.push(std::mem::take(&mut current)),
      _ => current.push(c),
    }
  }
  segments.push(current);
  segments
}

/// One segment of a flattened wire path.
///
/// A terminal node holds the property stored at that path; an intermediate node only groups
/// the nodes beneath it.
#[derive(Debug, Clone)]
pub(crate) struct FlattenNode {
  pub(crate) segment: String,
  pub(crate) property: Option<ClassifiedProperty>,
  pub(crate) children: Vec<FlattenNode>,
}

impl FlattenNode {
  fn new(segment: &str) -> Self {
    Self {
      segment: segment.to_string(),
      property: None,
      children: vec![],
    }
  }

  #[must_use]
  pub(crate) fn is_terminal(&self) -> bool {
    self.property.is_some()
  }

  /// Every property stored beneath this node, depth-first.
  pub(crate) fn leaves(&self) -> Vec<&ClassifiedProperty> {
    let mut leaves = vec![];
    self.collect_leaves(&mut leaves);
    leaves
  }

  fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a ClassifiedProperty>) {
    if let Some(property) = &self.property {
      leaves.push(property);
    }
    for child in &self.children {
      child.collect_leaves(leaves);
    }
  }

  fn child_mut(&mut self, segment: &str) -> &mut FlattenNode {
    let index = match self.children.iter().position(|child| child.segment == segment) {
      Some(index) => index,
      None => {
        self.children.push(FlattenNode::new(segment));
        self.children.len() - 1
      }
    };
    &mut self.children[index]
  }
}

/// The flattened properties of one model, merged by shared path prefix.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlattenTree {
  pub(crate) roots: Vec<FlattenNode>,
}

impl FlattenTree {
  /// Inserts every flattened property, in order, rejecting paths that terminate at or pass through
  /// another property, and first segments that reuse a plain property's serialized name.
  pub(crate) fn build<'a>(
    properties: impl IntoIterator<Item = &'a ClassifiedProperty>,
    plain_names: &HashSet<String>,
  ) -> Result<Self, Vec<GenerationError>> {
    let mut tree = FlattenNode::new("");
    let mut errors = vec![];

    for property in properties {
      let Some(path) = &property.flatten_path else {
        continue;
      };
      let duplicate = || GenerationError::DuplicateFlattenPath {
        model: property.declared_by.clone(),
        property: property.name.clone(),
        path: path.join("."),
      };

      if plain_names.contains(&path[0]) {
        errors.push(duplicate());
        continue;
      }

      let mut node = &mut tree;
      let mut blocked = false;
      for segment in path {
        node = node.child_mut(segment);
        if node.is_terminal() {
          blocked = true;
          break;
        }
      }

      if blocked || !node.children.is_empty() {
        errors.push(duplicate());
      } else {
        node.property = Some(property.clone());
      }
    }

    if errors.is_empty() {
      Ok(Self { roots: tree.children })
    } else {
      Err(errors)
    }
  }
}
