pub const FRAME_MS: u32 = 16;

/// Counts from zero up to `target` in
/// equal per-frame increments. The final
/// frame always shows exactly `target`.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
  target:    u32,
  increment: f64,
  frame:     u32,
  finished:  bool
}

impl CounterAnimation {
  pub fn new(
    target: u32,
    duration_ms: u32,
    frame_ms: u32
  ) -> Self {
    let frames = (f64::from(duration_ms)
      / f64::from(frame_ms.max(1)))
    .max(1.0);
    Self {
      target,
      increment: f64::from(target) / frames,
      frame: 0,
      finished: false
    }
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }
}

impl Iterator for CounterAnimation {
  type Item = u32;

  fn next(&mut self) -> Option<u32> {
    if self.finished {
      return None;
    }
    self.frame = self.frame.saturating_add(1);
    let current =
      f64::from(self.frame) * self.increment;
    if current < f64::from(self.target) {
      // floor of a value in [0, target)
      Some(current.floor() as u32)
    } else {
      self.finished = true;
      Some(self.target)
    }
  }
}

pub fn counter_label(value: u32) -> String {
  format!("{value}+")
}

/// Leading integer of a counter's text,
/// so "50+" reads as 50.
pub fn leading_integer(
  text: &str
) -> Option<u32> {
  let digits: String = text
    .trim_start()
    .chars()
    .take_while(char::is_ascii_digit)
    .collect();
  digits.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ends_exactly_at_target() {
    let frames: Vec<u32> =
      CounterAnimation::new(50, 2000, FRAME_MS)
        .collect();
    assert_eq!(frames.last(), Some(&50));
    assert!(frames.iter().all(|v| *v <= 50));
    assert!(
      frames.windows(2).all(|w| w[0] <= w[1])
    );
    assert_eq!(
      counter_label(*frames.last().unwrap_or(&0)),
      "50+"
    );
    assert_eq!(frames.len(), 125);
  }

  #[test]
  fn zero_target_finishes_immediately() {
    let mut anim =
      CounterAnimation::new(0, 2000, FRAME_MS);
    assert_eq!(anim.next(), Some(0));
    assert!(anim.is_finished());
    assert_eq!(anim.next(), None);
  }

  #[test]
  fn short_duration_is_single_frame() {
    let frames: Vec<u32> =
      CounterAnimation::new(7, 0, FRAME_MS)
        .collect();
    assert_eq!(frames, vec![7]);
  }

  #[test]
  fn reads_leading_digits() {
    assert_eq!(leading_integer("50+"), Some(50));
    assert_eq!(
      leading_integer("  120 projects"),
      Some(120)
    );
    assert_eq!(leading_integer("1,200"), Some(1));
    assert_eq!(leading_integer("many"), None);
  }
}
