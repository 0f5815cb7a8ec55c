use std::cell::RefCell;
use std::rc::{
  Rc,
  Weak
};

use folio_core::layer::Layer;
use folio_core::overlay::{
  ClickTarget,
  CloseTrigger,
  OverlayContent,
  OverlayId,
  OverlaySlot,
  OverlayView
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use crate::dom::{
  self,
  YewSurface
};

/// Page-specific framing around the
/// shared overlay content.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
  pub class:        &'static str,
  pub panel_class:  &'static str,
  pub tags_heading: Option<&'static str>,
  pub actions:      [&'static str; 2]
}

pub const PROJECT_LAYOUT: OverlayLayout =
  OverlayLayout {
    class:        "project-modal",
    panel_class:  "bg-white rounded-2xl \
                   max-w-2xl w-full \
                   max-h-[90vh] \
                   overflow-y-auto p-6",
    tags_heading: Some(
      "Technologies Used:"
    ),
    actions:      [
      "View Live Demo",
      "View Code"
    ]
  };

pub const SKILL_LAYOUT: OverlayLayout =
  OverlayLayout {
    class:        "skill-modal",
    panel_class:  "bg-white rounded-2xl \
                   max-w-md w-full p-6",
    tags_heading: None,
    actions:      [
      "View Projects",
      "Learn More"
    ]
  };

#[derive(Debug, Clone, PartialEq)]
pub struct ShownOverlay {
  pub id:      OverlayId,
  pub content: OverlayContent,
  pub layout:  OverlayLayout
}

pub type CloseRequest =
  Callback<(OverlayId, CloseTrigger)>;

#[derive(Properties, PartialEq)]
pub struct DetailOverlayProps {
  pub shown:    Option<ShownOverlay>,
  pub on_close: CloseRequest
}

/// Sends the close request a click on
/// `target` stands for, if any.
fn dispatch_click(
  on_close: &CloseRequest,
  id: OverlayId,
  target: ClickTarget
) {
  if let Some(trigger) =
    CloseTrigger::from_click(target)
  {
    on_close.emit((id, trigger));
  }
}

/// A click handler for one part of the
/// overlay. Propagation stops at every
/// part, so a panel click never reaches
/// the backdrop.
fn on_part(
  on_close: &CloseRequest,
  id: OverlayId,
  target: ClickTarget
) -> Callback<MouseEvent> {
  let on_close = on_close.clone();
  Callback::from(move |e: MouseEvent| {
    e.stop_propagation();
    dispatch_click(&on_close, id, target);
  })
}

#[function_component(DetailOverlay)]
pub fn detail_overlay(
  props: &DetailOverlayProps
) -> Html {
  let Some(shown) = &props.shown else {
    return html! {};
  };
  let on_backdrop = on_part(
    &props.on_close,
    shown.id,
    ClickTarget::Backdrop
  );
  let on_panel = on_part(
    &props.on_close,
    shown.id,
    ClickTarget::Panel
  );
  let on_close_control = on_part(
    &props.on_close,
    shown.id,
    ClickTarget::CloseControl
  );

  let layout = &shown.layout;
  let content = &shown.content;

  html! {
      <div
          class={format!("{} fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 p-4", layout.class)}
          role="dialog"
          aria-modal="true"
          onclick={on_backdrop}
      >
          <div class={layout.panel_class} onclick={on_panel}>
              <div class="flex justify-between items-start mb-4">
                  <h2 class="text-2xl font-bold text-gray-800">{ &content.title }</h2>
                  <button
                      type="button"
                      class="modal-close text-gray-500 hover:text-gray-700 text-2xl"
                      aria-label="Close"
                      onclick={on_close_control}
                  >
                      { "\u{00d7}" }
                  </button>
              </div>
              <p class="text-gray-600 mb-6">{ &content.description }</p>
              <div class="mb-6">
                  {
                      match layout.tags_heading {
                          Some(heading) => html! {
                              <h3 class="text-lg font-semibold text-gray-800 mb-3">{ heading }</h3>
                          },
                          None => html! {}
                      }
                  }
                  <div class="flex flex-wrap gap-2">
                      {
                          for content.tags.iter().map(|tag| html! {
                              <span class="px-3 py-1 bg-purple-100 text-purple-800 text-sm rounded-full">{ tag }</span>
                          })
                      }
                  </div>
              </div>
              <div class="flex gap-4">
                  <button type="button" class="bg-purple-600 text-white px-6 py-2 rounded-lg hover:bg-purple-700 transition-colors duration-300">
                      { layout.actions[0] }
                  </button>
                  <button type="button" class="border border-purple-600 text-purple-600 px-6 py-2 rounded-lg hover:bg-purple-600 hover:text-white transition-colors duration-300">
                      { layout.actions[1] }
                  </button>
              </div>
          </div>
      </div>
  }
}

type OverlayLayer =
  Layer<YewSurface<DetailOverlay>>;

/// The open overlay: what the shared
/// layer shows plus the document-level
/// Escape listener it owns.
pub struct MountedOverlay {
  layer:    Rc<RefCell<OverlayLayer>>,
  on_close: CloseRequest,
  _escape:  EventListener
}

impl OverlayView for MountedOverlay {
  fn dismiss(self) {
    self.layer.borrow_mut().render(
      DetailOverlayProps {
        shown:    None,
        on_close: self.on_close
      }
    );
  }
}

/// One overlay slot and the single Yew
/// root every overlay of a page renders
/// into.
pub struct OverlayHost {
  slot:     RefCell<
    OverlaySlot<MountedOverlay>
  >,
  layer:    Rc<RefCell<OverlayLayer>>,
  on_close: CloseRequest
}

pub type SharedOverlay = Rc<OverlayHost>;

pub fn shared_slot() -> SharedOverlay {
  Rc::new_cyclic(|weak| {
    let weak: Weak<OverlayHost> =
      weak.clone();
    OverlayHost {
      slot:     RefCell::new(
        OverlaySlot::new()
      ),
      layer:    Rc::new(RefCell::new(
        Layer::new("overlay")
      )),
      on_close: Callback::from(
        move |(id, trigger): (
          OverlayId,
          CloseTrigger
        )| {
          request_close(
            weak.clone(),
            id,
            trigger
          );
        }
      )
    }
  })
}

/// Replaces whatever overlay is open with
/// one showing `content`.
pub fn open(
  host: &SharedOverlay,
  content: OverlayContent,
  layout: OverlayLayout
) {
  let Some(document) = dom::document()
  else {
    return;
  };
  tracing::debug!(
    title = %content.title,
    tags = content.tags.len(),
    "opening detail overlay"
  );

  let weak = Rc::downgrade(host);
  host.slot.borrow_mut().open(|id| {
    let props = DetailOverlayProps {
      shown:    Some(ShownOverlay {
        id,
        content,
        layout
      }),
      on_close: host.on_close.clone()
    };
    host.layer.borrow_mut().show(
      props,
      |props| {
        YewSurface::mount(
          &document,
          "overlay-host",
          props
        )
      }
    );

    let escape = EventListener::new(
      &document,
      "keydown",
      move |event| {
        let key = event
          .dyn_ref::<KeyboardEvent>()
          .map(KeyboardEvent::key)
          .unwrap_or_default();
        if let Some(trigger) =
          CloseTrigger::from_key(&key)
        {
          request_close(
            weak.clone(),
            id,
            trigger
          );
        }
      }
    );

    MountedOverlay {
      layer:    host.layer.clone(),
      on_close: host.on_close.clone(),
      _escape:  escape
    }
  });
}

/// Closes overlay `id` once the
/// triggering handler has returned.
fn request_close(
  host: Weak<OverlayHost>,
  id: OverlayId,
  trigger: CloseTrigger
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      if let Some(host) = host.upgrade() {
        host
          .slot
          .borrow_mut()
          .close_if(id, trigger);
      }
    }
  );
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::rc::Rc;

  use folio_core::overlay::OverlaySlot;

  use super::*;

  struct Nothing;

  impl OverlayView for Nothing {
    fn dismiss(self) {}
  }

  fn recorder() -> (
    CloseRequest,
    Rc<RefCell<Vec<CloseTrigger>>>
  ) {
    let seen =
      Rc::new(RefCell::new(Vec::new()));
    let on_close = Callback::from({
      let seen = seen.clone();
      move |(_, trigger): (
        OverlayId,
        CloseTrigger
      )| {
        seen.borrow_mut().push(trigger);
      }
    });
    (on_close, seen)
  }

  fn some_id() -> OverlayId {
    OverlaySlot::<Nothing>::new()
      .open(|_| Nothing)
  }

  #[test]
  fn backdrop_click_requests_close() {
    let (on_close, seen) = recorder();
    dispatch_click(
      &on_close,
      some_id(),
      ClickTarget::Backdrop
    );
    assert_eq!(
      *seen.borrow(),
      vec![CloseTrigger::Backdrop]
    );
  }

  #[test]
  fn panel_click_is_swallowed() {
    let (on_close, seen) = recorder();
    dispatch_click(
      &on_close,
      some_id(),
      ClickTarget::Panel
    );
    dispatch_click(
      &on_close,
      some_id(),
      ClickTarget::CloseControl
    );
    assert_eq!(
      *seen.borrow(),
      vec![CloseTrigger::CloseControl]
    );
  }

  #[test]
  fn layouts_frame_their_pages() {
    assert_eq!(
      PROJECT_LAYOUT.tags_heading,
      Some("Technologies Used:")
    );
    assert_eq!(SKILL_LAYOUT.tags_heading, None);
    assert_ne!(
      PROJECT_LAYOUT.class,
      SKILL_LAYOUT.class
    );
  }
}
