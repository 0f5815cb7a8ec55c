use std::cell::{
  Cell,
  RefCell
};
use std::rc::{
  Rc,
  Weak
};

use folio_core::layer::Layer;
use folio_core::notify::{
  Notification,
  NotificationKind
};
use gloo::timers::callback::Timeout;
use web_sys::MouseEvent;
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

#[derive(Debug, Clone, PartialEq)]
pub struct ShownToast {
  pub id:      u64,
  pub kind:    NotificationKind,
  pub message: String
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
  pub shown:      Option<ShownToast>,
  pub on_dismiss: Callback<u64>
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
  let Some(shown) = &props.shown else {
    return html! {};
  };
  let on_click = {
    let id = shown.id;
    props
      .on_dismiss
      .reform(move |_: MouseEvent| id)
  };

  html! {
      <div
          class={format!("{} fixed top-20 right-4 text-white px-6 py-4 rounded-lg shadow-lg z-50 cursor-pointer", shown.kind.classes())}
          role="status"
          onclick={on_click}
      >
          <i class={format!("{} mr-2", shown.kind.icon())}></i>
          <span>{ &shown.message }</span>
      </div>
  }
}

struct ToastState {
  layer:      Layer<YewSurface<Toast>>,
  on_dismiss: Callback<u64>,
  current:    Option<(u64, Timeout)>
}

impl ToastState {
  fn props(
    &self,
    shown: Option<ShownToast>
  ) -> ToastProps {
    ToastProps {
      shown,
      on_dismiss: self.on_dismiss.clone()
    }
  }

  fn clear(&mut self) {
    if self.current.take().is_some() {
      let props = self.props(None);
      self.layer.render(props);
    }
  }
}

/// Shows one toast at a time; a new one
/// replaces the old. Every toast renders
/// into the same Yew root.
#[derive(Clone)]
pub struct Notifier {
  dismiss_ms: u32,
  next_id:    Rc<Cell<u64>>,
  state:      Rc<RefCell<ToastState>>
}

impl Notifier {
  pub fn new(dismiss_ms: u32) -> Self {
    let state =
      Rc::new_cyclic(|weak: &Weak<_>| {
        let weak = weak.clone();
        RefCell::new(ToastState {
          layer:      Layer::new("toast"),
          on_dismiss: Callback::from(
            move |id: u64| {
              defer_dismiss(weak.clone(), id);
            }
          ),
          current:    None
        })
      });
    Self {
      dismiss_ms,
      next_id: Rc::new(Cell::new(0)),
      state
    }
  }

  pub fn show(
    &self,
    notification: Notification
  ) {
    tracing::debug!(
      kind = notification.kind.as_str(),
      message = %notification.message,
      "showing notification"
    );
    let Some(document) = dom::document()
    else {
      return;
    };

    let id = self.next_id.get() + 1;
    self.next_id.set(id);

    let timer = Timeout::new(self.dismiss_ms, {
      let weak = Rc::downgrade(&self.state);
      move || defer_dismiss(weak, id)
    });

    let mut state = self.state.borrow_mut();
    let props = state.props(Some(ShownToast {
      id,
      kind: notification.kind,
      message: notification.message
    }));
    let shown = state.layer.show(props, |props| {
      YewSurface::mount(
        &document,
        "notification-host",
        props
      )
    });
    state.current =
      shown.then_some((id, timer));
  }
}

/// Hides toast `id` after the current
/// event handler returns, unless a newer
/// toast already replaced it.
fn defer_dismiss(
  state: Weak<RefCell<ToastState>>,
  id: u64
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      let Some(state) = state.upgrade()
      else {
        return;
      };
      let mut state = state.borrow_mut();
      let current = state
        .current
        .as_ref()
        .map(|(current, _)| *current);
      if current == Some(id) {
        state.clear();
      }
    }
  );
}
