use std::fmt;

use tracing::trace;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum EventKind {
  Click,
  Input,
  Blur,
  Focus,
  Submit,
  KeyDown,
  MouseEnter,
  MouseLeave,
  PageHide
}

impl EventKind {
  /// DOM event type name.
  pub fn as_str(self) -> &'static str {
    match self {
      | EventKind::Click => "click",
      | EventKind::Input => "input",
      | EventKind::Blur => "blur",
      | EventKind::Focus => "focus",
      | EventKind::Submit => "submit",
      | EventKind::KeyDown => "keydown",
      | EventKind::MouseEnter => {
        "mouseenter"
      }
      | EventKind::MouseLeave => {
        "mouseleave"
      }
      | EventKind::PageHide => "pagehide"
    }
  }
}

impl fmt::Display for EventKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
  pub target: String,
  pub kind:   EventKind
}

/// Every listener a component registered,
/// labelled by target and event type.
/// Dropping the table drops the listeners.
#[derive(Debug)]
pub struct BindingTable<L> {
  entries: Vec<(Binding, L)>
}

impl<L> Default for BindingTable<L> {
  fn default() -> Self {
    Self {
      entries: Vec::new()
    }
  }
}

impl<L> BindingTable<L> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(
    &mut self,
    target: impl Into<String>,
    kind: EventKind,
    listener: L
  ) {
    let binding = Binding {
      target: target.into(),
      kind
    };
    trace!(
      target = %binding.target,
      kind = %binding.kind,
      "registered binding"
    );
    self.entries.push((binding, listener));
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
