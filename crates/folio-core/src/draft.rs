use std::collections::BTreeMap;

use tracing::debug;

use crate::validate::FieldName;

pub const DEFAULT_DRAFT_PREFIX: &str =
  "contact_";

/// Key/value storage the draft cache
/// writes through. Writes are best
/// effort; a full or unavailable store
/// simply drops the draft.
pub trait DraftStore {
  fn load(
    &self,
    key: &str
  ) -> Option<String>;

  fn save(
    &mut self,
    key: &str,
    value: &str
  );

  fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl DraftStore for MemoryStore {
  fn load(
    &self,
    key: &str
  ) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn save(
    &mut self,
    key: &str,
    value: &str
  ) {
    self.entries.insert(
      key.to_string(),
      value.to_string()
    );
  }

  fn remove(&mut self, key: &str) {
    self.entries.remove(key);
  }
}

/// Per-field draft cache for the contact
/// form. Only the five tracked fields are
/// ever written.
#[derive(Debug, Clone)]
pub struct Drafts<S> {
  store:  S,
  prefix: String
}

impl<S: DraftStore> Drafts<S> {
  pub fn new(store: S) -> Self {
    Self::with_prefix(
      store,
      DEFAULT_DRAFT_PREFIX
    )
  }

  pub fn with_prefix(
    store: S,
    prefix: &str
  ) -> Self {
    Self {
      store,
      prefix: prefix.to_string()
    }
  }

  pub fn key(
    &self,
    field: FieldName
  ) -> String {
    format!(
      "{}{}",
      self.prefix,
      field.as_str()
    )
  }

  /// Stored non-empty drafts, in field
  /// order.
  pub fn restore(
    &self
  ) -> Vec<(FieldName, String)> {
    let restored: Vec<_> = FieldName::ALL
      .into_iter()
      .filter_map(|field| {
        self
          .store
          .load(&self.key(field))
          .filter(|value| !value.is_empty())
          .map(|value| (field, value))
      })
      .collect();
    debug!(
      restored = restored.len(),
      "restored contact drafts"
    );
    restored
  }

  pub fn record(
    &mut self,
    field: FieldName,
    value: &str
  ) {
    let key = self.key(field);
    self.store.save(&key, value);
  }

  pub fn clear(&mut self) {
    for field in FieldName::ALL {
      let key = self.key(field);
      self.store.remove(&key);
    }
    debug!("cleared contact drafts");
  }

  pub fn store(&self) -> &S {
    &self.store
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keys_use_prefix_and_field_name() {
    let drafts =
      Drafts::new(MemoryStore::new());
    assert_eq!(
      drafts.key(FieldName::FirstName),
      "contact_firstName"
    );
    assert_eq!(
      drafts.key(FieldName::Message),
      "contact_message"
    );
  }

  #[test]
  fn restore_skips_empty_and_missing() {
    let mut store = MemoryStore::new();
    store.save("contact_email", "a@b.io");
    store.save("contact_subject", "");
    store.save("unrelated", "x");
    let drafts = Drafts::new(store);

    assert_eq!(
      drafts.restore(),
      vec![(
        FieldName::Email,
        "a@b.io".to_string()
      )]
    );
  }

  #[test]
  fn clear_removes_only_tracked_keys() {
    let mut drafts =
      Drafts::new(MemoryStore::new());
    for field in FieldName::ALL {
      drafts.record(field, "draft");
    }
    drafts.store.save("theme", "night");

    drafts.clear();

    assert_eq!(drafts.store().len(), 1);
    assert_eq!(
      drafts.store().load("theme").as_deref(),
      Some("night")
    );
  }

  #[test]
  fn custom_prefix() {
    let mut drafts = Drafts::with_prefix(
      MemoryStore::new(),
      "folio."
    );
    drafts.record(FieldName::Subject, "Hi");
    assert_eq!(
      drafts.store().load("folio.subject"),
      Some("Hi".to_string())
    );
  }
}
