/// FAQ accordion: at most one answer open.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Accordion {
  open: Option<usize>
}

impl Accordion {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clicking an open item closes it;
  /// clicking another item opens it and
  /// closes the rest. Returns the item that
  /// is open afterwards.
  pub fn toggle(
    &mut self,
    index: usize
  ) -> Option<usize> {
    self.open = if self.open == Some(index)
    {
      None
    } else {
      Some(index)
    };
    self.open
  }

  pub fn open(&self) -> Option<usize> {
    self.open
  }

  pub fn is_open(
    &self,
    index: usize
  ) -> bool {
    self.open == Some(index)
  }
}
