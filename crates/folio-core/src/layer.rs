use tracing::debug;

/// A render root that lives as long as
/// its page and is re-rendered in place.
pub trait Surface {
  type Props;

  fn render(&mut self, props: Self::Props);
}

/// Mounts its surface on first use and
/// reuses it for every later render.
#[derive(Debug)]
pub struct Layer<S> {
  label:   &'static str,
  surface: Option<S>
}

impl<S: Surface> Layer<S> {
  pub fn new(label: &'static str) -> Self {
    Self {
      label,
      surface: None
    }
  }

  /// Renders `props`, mounting the
  /// surface with them when there is none
  /// yet. A failed mount is retried on the
  /// next call.
  pub fn show<M>(
    &mut self,
    props: S::Props,
    mount: M
  ) -> bool
  where
    M: FnOnce(S::Props) -> Option<S>
  {
    if let Some(surface) =
      self.surface.as_mut()
    {
      surface.render(props);
      return true;
    }
    match mount(props) {
      | Some(surface) => {
        debug!(
          layer = self.label,
          "mounted layer"
        );
        self.surface = Some(surface);
        true
      }
      | None => {
        debug!(
          layer = self.label,
          "layer host unavailable"
        );
        false
      }
    }
  }

  /// Re-renders an already mounted
  /// surface; never mounts.
  pub fn render(
    &mut self,
    props: S::Props
  ) -> bool {
    match self.surface.as_mut() {
      | Some(surface) => {
        surface.render(props);
        true
      }
      | None => false
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{
    Cell,
    RefCell
  };
  use std::rc::Rc;

  use super::*;
  use crate::overlay::{
    CloseTrigger,
    OverlaySlot,
    OverlayView
  };

  #[derive(Default)]
  struct Counts {
    mounts:  Cell<usize>,
    renders: Cell<usize>,
    last:    RefCell<Option<String>>
  }

  struct FakeSurface(Rc<Counts>);

  impl Surface for FakeSurface {
    type Props = Option<String>;

    fn render(
      &mut self,
      props: Option<String>
    ) {
      self
        .0
        .renders
        .set(self.0.renders.get() + 1);
      *self.0.last.borrow_mut() = props;
    }
  }

  fn mounter(
    counts: &Rc<Counts>
  ) -> impl FnOnce(
    Option<String>
  ) -> Option<FakeSurface> {
    let counts = counts.clone();
    move |props| {
      counts
        .mounts
        .set(counts.mounts.get() + 1);
      *counts.last.borrow_mut() = props;
      Some(FakeSurface(counts))
    }
  }

  #[test]
  fn mounts_once_then_rerenders() {
    let counts = Rc::new(Counts::default());
    let mut layer =
      Layer::<FakeSurface>::new("toast");
    for n in 0..4 {
      assert!(layer.show(
        Some(format!("toast {n}")),
        mounter(&counts)
      ));
    }
    assert_eq!(counts.mounts.get(), 1);
    assert_eq!(counts.renders.get(), 3);
    assert_eq!(
      counts.last.borrow().as_deref(),
      Some("toast 3")
    );
  }

  #[test]
  fn render_never_mounts() {
    let counts = Rc::new(Counts::default());
    let mut layer =
      Layer::<FakeSurface>::new("toast");
    assert!(!layer.render(None));
    assert_eq!(counts.mounts.get(), 0);
  }

  #[test]
  fn failed_mount_is_retried() {
    let counts = Rc::new(Counts::default());
    let mut layer =
      Layer::<FakeSurface>::new("overlay");
    assert!(
      !layer.show(Some("a".into()), |_| None)
    );
    assert!(
      layer.show(Some("b".into()), mounter(&counts))
    );
    assert_eq!(counts.mounts.get(), 1);
  }

  /// An overlay view that draws into a
  /// shared layer, as the page does.
  struct LayerView {
    layer: Rc<RefCell<Layer<FakeSurface>>>
  }

  impl OverlayView for LayerView {
    fn dismiss(self) {
      self.layer.borrow_mut().render(None);
    }
  }

  #[test]
  fn repeated_overlays_share_one_surface() {
    let counts = Rc::new(Counts::default());
    let layer = Rc::new(RefCell::new(
      Layer::<FakeSurface>::new("overlay")
    ));
    let mut slot = OverlaySlot::new();

    let mut last = None;
    for n in 0..5 {
      let layer = layer.clone();
      let counts = counts.clone();
      last = Some(slot.open(move |_| {
        layer.borrow_mut().show(
          Some(format!("card {n}")),
          mounter(&counts)
        );
        LayerView {
          layer
        }
      }));
    }
    assert_eq!(counts.mounts.get(), 1);
    assert_eq!(
      counts.last.borrow().as_deref(),
      Some("card 4")
    );

    let id = last.expect("opened");
    assert!(
      slot.close_if(id, CloseTrigger::Backdrop)
    );
    assert_eq!(counts.mounts.get(), 1);
    assert_eq!(*counts.last.borrow(), None);
  }
}
