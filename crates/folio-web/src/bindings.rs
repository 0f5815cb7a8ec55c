use folio_core::bindings::{
  BindingTable,
  EventKind
};
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use web_sys::{
  Event,
  EventTarget
};

/// A controller's registered listeners.
/// Dropping it unregisters them all.
pub type Listeners = BindingTable<EventListener>;

pub fn listen<F>(
  table: &mut Listeners,
  label: &str,
  target: &EventTarget,
  kind: EventKind,
  handler: F
) where
  F: FnMut(&Event) + 'static
{
  let listener = EventListener::new(
    target,
    kind.as_str(),
    handler
  );
  table.push(label, kind, listener);
}

/// Like [`listen`], but the handler may
/// call `prevent_default`.
pub fn listen_active<F>(
  table: &mut Listeners,
  label: &str,
  target: &EventTarget,
  kind: EventKind,
  handler: F
) where
  F: FnMut(&Event) + 'static
{
  let listener = EventListener::new_with_options(
    target,
    kind.as_str(),
    EventListenerOptions::enable_prevent_default(),
    handler
  );
  table.push(label, kind, listener);
}
