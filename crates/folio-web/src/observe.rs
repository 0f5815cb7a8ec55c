use folio_core::reveal::{
  Intersection,
  RevealConfig,
  RevealTracker
};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::JsValue;
use web_sys::{
  Element,
  IntersectionObserver,
  IntersectionObserverEntry,
  IntersectionObserverInit
};

use crate::dom;

const INDEX_ATTR: &str = "data-observe-index";

type BatchCallback = Closure<
  dyn FnMut(
    js_sys::Array,
    IntersectionObserver
  )
>;

/// An `IntersectionObserver` over a fixed
/// element list. Disconnects on drop.
pub struct Watch {
  observer:  IntersectionObserver,
  _callback: BatchCallback
}

impl Drop for Watch {
  fn drop(&mut self) {
    self.observer.disconnect();
  }
}

fn index_of(
  entry: &IntersectionObserverEntry
) -> Option<usize> {
  entry
    .target()
    .get_attribute(INDEX_ATTR)?
    .parse()
    .ok()
}

fn intersection_of(
  entry: &IntersectionObserverEntry
) -> Option<Intersection> {
  Some(Intersection {
    index:           index_of(entry)?,
    ratio:           entry
      .intersection_ratio(),
    is_intersecting: entry
      .is_intersecting()
  })
}

/// Observes `targets`, handing each batch
/// to `on_batch` as indexed
/// intersections. The indexes it returns
/// are unobserved.
pub fn watch<F>(
  label: &'static str,
  targets: &[Element],
  threshold: f64,
  root_margin: &str,
  mut on_batch: F
) -> Option<Watch>
where
  F: FnMut(&[Intersection]) -> Vec<usize>
    + 'static
{
  if targets.is_empty() {
    return None;
  }

  let elements = targets.to_vec();
  let callback = BatchCallback::new(
    move |entries: js_sys::Array,
          observer: IntersectionObserver| {
      let batch: Vec<Intersection> =
        entries
          .iter()
          .filter_map(|entry| {
            entry
              .dyn_into::<
                IntersectionObserverEntry
              >()
              .ok()
          })
          .filter_map(|entry| {
            intersection_of(&entry)
          })
          .collect();
      for index in on_batch(&batch) {
        if let Some(element) =
          elements.get(index)
        {
          observer.unobserve(element);
        }
      }
    }
  );

  let init = IntersectionObserverInit::new();
  init.set_threshold(
    &JsValue::from_f64(threshold)
  );
  init.set_root_margin(root_margin);

  let observer =
    match IntersectionObserver::new_with_options(
      callback.as_ref().unchecked_ref(),
      &init
    ) {
      | Ok(observer) => observer,
      | Err(error) => {
        tracing::warn!(
          label,
          ?error,
          "intersection observer unavailable"
        );
        return None;
      }
    };

  for (index, target) in
    targets.iter().enumerate()
  {
    let _ = target.set_attribute(
      INDEX_ATTR,
      &index.to_string()
    );
    observer.observe(target);
  }
  tracing::debug!(
    label,
    targets = targets.len(),
    threshold,
    root_margin,
    "watching elements"
  );

  Some(Watch {
    observer,
    _callback: callback
  })
}

/// Hides `cards` and fades each in, once,
/// when it scrolls into view.
pub fn reveal(
  label: &'static str,
  cards: Vec<Element>,
  config: &RevealConfig
) -> Option<Watch> {
  let hidden = config.hidden_style();
  let transition = config.transition();
  for card in &cards {
    dom::set_styles(
      card,
      &[
        ("opacity", hidden.opacity),
        ("transform", &hidden.transform),
        ("transition", &transition)
      ]
    );
  }

  let shown = config.shown_style();
  let mut tracker =
    RevealTracker::new(cards.len(), config);
  let targets = cards.clone();
  watch(
    label,
    &targets,
    config.threshold,
    &config.root_margin,
    move |batch| {
      let steps = tracker.observe(batch);
      for step in &steps {
        let Some(card) =
          cards.get(step.index).cloned()
        else {
          continue;
        };
        let shown = shown.clone();
        Timeout::new(step.delay_ms, move || {
          if card.is_connected() {
            dom::set_styles(
              &card,
              &[
                ("opacity", shown.opacity),
                (
                  "transform",
                  &shown.transform
                )
              ]
            );
          }
        })
        .forget();
      }
      if !steps.is_empty()
        && tracker.all_revealed()
      {
        tracing::debug!(
          label,
          "every card revealed"
        );
      }
      steps
        .iter()
        .map(|step| step.index)
        .collect()
    }
  )
}

/// Calls `on_enter` the first time each
/// target crosses `threshold`, with the
/// viewport grown or shrunk by
/// `root_margin`.
pub fn once<F>(
  label: &'static str,
  targets: Vec<Element>,
  threshold: f64,
  root_margin: &str,
  mut on_enter: F
) -> Option<Watch>
where
  F: FnMut(&Element) + 'static
{
  let config = RevealConfig {
    threshold,
    root_margin: root_margin.to_string(),
    stagger_ms: 0,
    ..RevealConfig::default()
  };
  let mut tracker =
    RevealTracker::new(targets.len(), &config);
  let elements = targets.clone();
  watch(
    label,
    &targets,
    threshold,
    root_margin,
    move |batch| {
      let steps = tracker.observe(batch);
      for step in &steps {
        if let Some(element) =
          elements.get(step.index)
        {
          on_enter(element);
        }
      }
      if !steps.is_empty()
        && tracker.all_revealed()
      {
        tracing::debug!(
          label,
          "every target entered"
        );
      }
      steps
        .iter()
        .map(|step| step.index)
        .collect()
    }
  )
}
