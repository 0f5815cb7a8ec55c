use std::cell::RefCell;
use std::rc::Rc;

use folio_core::counter::{
  CounterAnimation,
  FRAME_MS,
  counter_label,
  leading_integer
};
use gloo::render::{
  AnimationFrame,
  request_animation_frame
};
use web_sys::Element;

use crate::dom;

type FrameSlot =
  Rc<RefCell<Option<AnimationFrame>>>;

/// A running stat counter. Dropping it stops
/// the animation where it is.
pub struct CounterRun {
  frame: FrameSlot
}

impl Drop for CounterRun {
  fn drop(&mut self) {
    self.frame.borrow_mut().take();
  }
}

/// Counts `element` up from zero to the
/// number its text currently shows.
pub fn start(
  element: &Element,
  duration_ms: u32
) -> Option<CounterRun> {
  let Some(target) =
    leading_integer(&dom::text_of(element))
  else {
    tracing::debug!(
      text = %dom::text_of(element),
      "counter text has no leading number"
    );
    return None;
  };
  tracing::debug!(
    target,
    duration_ms,
    "starting stat counter"
  );

  let frame: FrameSlot =
    Rc::new(RefCell::new(None));
  step(
    element.clone(),
    CounterAnimation::new(
      target,
      duration_ms,
      FRAME_MS
    ),
    frame.clone()
  );
  Some(CounterRun {
    frame
  })
}

fn step(
  element: Element,
  mut animation: CounterAnimation,
  slot: FrameSlot
) {
  let Some(value) = animation.next() else {
    return;
  };
  element
    .set_text_content(Some(&counter_label(value)));
  if animation.is_finished() {
    slot.borrow_mut().take();
    return;
  }

  let next = slot.clone();
  let handle = request_animation_frame(move |_| {
    step(element, animation, next);
  });
  *slot.borrow_mut() = Some(handle);
}
