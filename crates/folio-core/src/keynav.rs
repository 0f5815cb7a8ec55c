/// Arrow-key position within a row of
/// filter buttons, clamped at both ends.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct FilterCursor {
  index: usize,
  len:   usize
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Arrow {
  Left,
  Right
}

impl Arrow {
  pub fn from_key(key: &str) -> Option<Arrow> {
    match key {
      | "ArrowLeft" => Some(Arrow::Left),
      | "ArrowRight" => Some(Arrow::Right),
      | _ => None
    }
  }
}

impl FilterCursor {
  pub fn new(len: usize) -> Self {
    Self {
      index: 0,
      len
    }
  }

  pub fn index(&self) -> usize {
    self.index
  }

  /// Moves the cursor and returns the new
  /// index, or `None` when there are no
  /// buttons.
  pub fn step(
    &mut self,
    arrow: Arrow
  ) -> Option<usize> {
    if self.len == 0 {
      return None;
    }
    self.index = match arrow {
      | Arrow::Left => {
        self.index.saturating_sub(1)
      }
      | Arrow::Right => {
        (self.index + 1).min(self.len - 1)
      }
    };
    Some(self.index)
  }

  /// Keeps the cursor in step with a button
  /// activated by mouse or badge click.
  pub fn sync(&mut self, index: usize) {
    if index < self.len {
      self.index = index;
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FocusTarget {
  Field(usize),
  SubmitButton
}

/// Where Enter moves focus from the field
/// at `current` in a form of `len` fields.
pub fn next_focus(
  current: usize,
  len: usize
) -> FocusTarget {
  if current + 1 < len {
    FocusTarget::Field(current + 1)
  } else {
    FocusTarget::SubmitButton
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cursor_clamps() {
    let mut cursor = FilterCursor::new(3);
    assert_eq!(cursor.step(Arrow::Left), Some(0));
    assert_eq!(cursor.step(Arrow::Right), Some(1));
    assert_eq!(cursor.step(Arrow::Right), Some(2));
    assert_eq!(cursor.step(Arrow::Right), Some(2));
    cursor.sync(1);
    assert_eq!(cursor.step(Arrow::Left), Some(0));
  }

  #[test]
  fn empty_row_has_no_target() {
    let mut cursor = FilterCursor::new(0);
    assert_eq!(cursor.step(Arrow::Right), None);
  }

  #[test]
  fn arrows_from_keys() {
    assert_eq!(
      Arrow::from_key("ArrowLeft"),
      Some(Arrow::Left)
    );
    assert_eq!(Arrow::from_key("a"), None);
  }

  #[test]
  fn enter_walks_fields_then_submit() {
    assert_eq!(next_focus(0, 5), FocusTarget::Field(1));
    assert_eq!(next_focus(3, 5), FocusTarget::Field(4));
    assert_eq!(
      next_focus(4, 5),
      FocusTarget::SubmitButton
    );
  }
}
