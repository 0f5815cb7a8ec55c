use tracing::debug;

/// What a detail overlay shows.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct OverlayContent {
  pub title:       String,
  pub description: String,
  pub tags:        Vec<String>
}

/// A mounted overlay. Dismissing it must
/// remove everything it attached to the
/// page, listeners included.
pub trait OverlayView {
  fn dismiss(self);
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct OverlayId(u64);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CloseTrigger {
  CloseControl,
  Backdrop,
  Escape
}

/// Where a click inside the overlay
/// landed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ClickTarget {
  CloseControl,
  Backdrop,
  Panel
}

impl CloseTrigger {
  pub fn from_click(
    target: ClickTarget
  ) -> Option<CloseTrigger> {
    match target {
      | ClickTarget::CloseControl => {
        Some(CloseTrigger::CloseControl)
      }
      | ClickTarget::Backdrop => {
        Some(CloseTrigger::Backdrop)
      }
      | ClickTarget::Panel => None
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<CloseTrigger> {
    (key == "Escape")
      .then_some(CloseTrigger::Escape)
  }
}

/// Holds at most one open overlay.
#[derive(Debug)]
pub struct OverlaySlot<V> {
  current: Option<(OverlayId, V)>,
  next_id: u64
}

impl<V> Default for OverlaySlot<V> {
  fn default() -> Self {
    Self {
      current: None,
      next_id: 0
    }
  }
}

impl<V: OverlayView> OverlaySlot<V> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Dismisses the open overlay, if any,
  /// then mounts a new one.
  pub fn open<F>(
    &mut self,
    mount: F
  ) -> OverlayId
  where
    F: FnOnce(OverlayId) -> V
  {
    self.close();
    self.next_id += 1;
    let id = OverlayId(self.next_id);
    let view = mount(id);
    self.current = Some((id, view));
    debug!(?id, "opened overlay");
    id
  }

  pub fn close(&mut self) -> bool {
    match self.current.take() {
      | Some((id, view)) => {
        view.dismiss();
        debug!(?id, "closed overlay");
        true
      }
      | None => false
    }
  }

  /// Closes only if `id` is still the open
  /// overlay; requests from replaced
  /// overlays are ignored.
  pub fn close_if(
    &mut self,
    id: OverlayId,
    trigger: CloseTrigger
  ) -> bool {
    if self.open_id() != Some(id) {
      debug!(
        ?id,
        ?trigger,
        "ignoring close for replaced \
         overlay"
      );
      return false;
    }
    debug!(?id, ?trigger, "close requested");
    self.close()
  }

  pub fn open_id(&self) -> Option<OverlayId> {
    self.current.as_ref().map(|(id, _)| *id)
  }

  pub fn is_open(&self) -> bool {
    self.current.is_some()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::rc::Rc;

  use super::*;

  /// Counts mounted views and their key
  /// listeners the way the page would.
  struct FakeView {
    title:     String,
    mounted:   Rc<Cell<usize>>,
    listeners: Rc<Cell<usize>>
  }

  impl OverlayView for FakeView {
    fn dismiss(self) {
      self.mounted.set(self.mounted.get() - 1);
      self
        .listeners
        .set(self.listeners.get() - 1);
    }
  }

  struct Page {
    slot:      OverlaySlot<FakeView>,
    mounted:   Rc<Cell<usize>>,
    listeners: Rc<Cell<usize>>
  }

  impl Page {
    fn new() -> Self {
      Self {
        slot:      OverlaySlot::new(),
        mounted:   Rc::new(Cell::new(0)),
        listeners: Rc::new(Cell::new(0))
      }
    }

    fn open(&mut self, title: &str) -> OverlayId {
      let mounted = self.mounted.clone();
      let listeners = self.listeners.clone();
      let title = title.to_string();
      self.slot.open(move |_| {
        mounted.set(mounted.get() + 1);
        listeners.set(listeners.get() + 1);
        FakeView {
          title,
          mounted,
          listeners
        }
      })
    }

    fn open_title(&self) -> Option<&str> {
      self
        .slot
        .current
        .as_ref()
        .map(|(_, view)| view.title.as_str())
    }
  }

  #[test]
  fn second_open_replaces_first() {
    let mut page = Page::new();
    page.open("First");
    page.open("Second");
    assert_eq!(page.mounted.get(), 1);
    assert_eq!(page.open_title(), Some("Second"));
  }

  #[test]
  fn every_trigger_closes() {
    for trigger in [
      CloseTrigger::from_click(
        ClickTarget::CloseControl
      ),
      CloseTrigger::from_click(
        ClickTarget::Backdrop
      ),
      CloseTrigger::from_key("Escape")
    ] {
      let mut page = Page::new();
      let id = page.open("Project");
      let trigger =
        trigger.expect("closing trigger");
      assert!(page.slot.close_if(id, trigger));
      assert!(!page.slot.is_open());
      assert_eq!(page.mounted.get(), 0);
    }
  }

  #[test]
  fn panel_clicks_and_other_keys_do_not_close()
  {
    assert_eq!(
      CloseTrigger::from_click(
        ClickTarget::Panel
      ),
      None
    );
    assert_eq!(
      CloseTrigger::from_key("Enter"),
      None
    );
  }

  #[test]
  fn repeated_opens_leave_no_listeners() {
    let mut page = Page::new();
    for n in 0..5 {
      page.open(&format!("Card {n}"));
      assert_eq!(page.listeners.get(), 1);
    }
    page.slot.close();
    assert_eq!(page.listeners.get(), 0);
  }

  #[test]
  fn stale_close_is_ignored() {
    let mut page = Page::new();
    let first = page.open("First");
    let second = page.open("Second");
    assert!(!page.slot.close_if(
      first,
      CloseTrigger::Escape
    ));
    assert_eq!(page.slot.open_id(), Some(second));
    assert!(page.slot.close());
    assert!(!page.slot.close_if(
      second,
      CloseTrigger::Escape
    ));
  }
}
