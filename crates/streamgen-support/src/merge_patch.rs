use std::collections::BTreeSet;

/// Tracks which properties a model's setters have touched, and whether the model
/// currently serializes as a JSON merge patch.
///
/// The state is bookkeeping only: two models that differ only in their patch state
/// compare equal.
#[derive(Debug, Clone, Default)]
pub struct MergePatchState {
  enabled: bool,
  updated: BTreeSet<&'static str>,
}

impl MergePatchState {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mark(&mut self, property: &'static str) {
    self.updated.insert(property);
  }

  #[must_use]
  pub fn contains(&self, property: &str) -> bool {
    self.updated.contains(property)
  }

  #[must_use]
  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
  }

  pub fn clear(&mut self) {
    self.updated.clear();
  }
}

impl PartialEq for MergePatchState {
  fn eq(&self, _other: &Self) -> bool {
    true
  }
}
