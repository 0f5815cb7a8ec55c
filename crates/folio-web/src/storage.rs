use folio_core::draft::DraftStore;
use web_sys::Storage;

/// Drafts kept in `window.localStorage`.
/// Without storage (private mode, disabled
/// cookies) every call is a no-op.
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
  storage: Option<Storage>
}

impl LocalDraftStore {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });
    if storage.is_none() {
      tracing::warn!(
        "local storage unavailable; \
         contact drafts will not persist"
      );
    }
    Self {
      storage
    }
  }
}

impl DraftStore for LocalDraftStore {
  fn load(
    &self,
    key: &str
  ) -> Option<String> {
    self.storage.as_ref().and_then(|storage| {
      storage.get_item(key).ok().flatten()
    })
  }

  fn save(
    &mut self,
    key: &str,
    value: &str
  ) {
    if let Some(storage) = &self.storage
      && storage.set_item(key, value).is_err()
    {
      tracing::warn!(
        key,
        "failed writing contact draft"
      );
    }
  }

  fn remove(&mut self, key: &str) {
    if let Some(storage) = &self.storage {
      let _ = storage.remove_item(key);
    }
  }
}
