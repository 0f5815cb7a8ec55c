//! Small contact page affordances: the
//! progress bar, the message character
//! counter and copyable contact details.

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CounterTone {
  Normal,
  Warning,
  Danger
}

impl CounterTone {
  pub fn color(self) -> &'static str {
    match self {
      | CounterTone::Normal => "#6b7280",
      | CounterTone::Warning => "#f59e0b",
      | CounterTone::Danger => "#ef4444"
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CharCounter {
  limit: usize
}

impl CharCounter {
  pub fn new(limit: usize) -> Self {
    Self {
      limit: limit.max(1)
    }
  }

  pub fn label(&self, len: usize) -> String {
    format!("{len}/{} characters", self.limit)
  }

  /// Amber past 80% of the limit, red past
  /// 90%.
  pub fn tone(&self, len: usize) -> CounterTone {
    if len * 10 > self.limit * 9 {
      CounterTone::Danger
    } else if len * 10 > self.limit * 8 {
      CounterTone::Warning
    } else {
      CounterTone::Normal
    }
  }
}

/// Percentage of filled inputs.
pub fn progress_percent(
  filled: usize,
  total: usize
) -> f64 {
  if total == 0 {
    return 0.0;
  }
  filled.min(total) as f64 / total as f64
    * 100.0
}

pub fn width_style(percent: f64) -> String {
  format!("{percent}%")
}

/// Contact details worth copying: emails
/// and phone numbers.
pub fn is_copyable(text: &str) -> bool {
  text.contains('@') || text.contains('+')
}

pub fn copied_message(text: &str) -> String {
  format!("{text} copied to clipboard!")
}

pub const COPY_FAILED_MESSAGE: &str =
  "Failed to copy to clipboard";

pub const MAP_PLACEHOLDER_MESSAGE: &str =
  "Interactive map coming soon!";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counter_tones_follow_thresholds() {
    let counter = CharCounter::new(500);
    assert_eq!(counter.tone(0), CounterTone::Normal);
    assert_eq!(
      counter.tone(400),
      CounterTone::Normal
    );
    assert_eq!(
      counter.tone(401),
      CounterTone::Warning
    );
    assert_eq!(
      counter.tone(450),
      CounterTone::Warning
    );
    assert_eq!(
      counter.tone(451),
      CounterTone::Danger
    );
    assert_eq!(
      counter.label(42),
      "42/500 characters"
    );
  }

  #[test]
  fn progress_handles_empty_form() {
    assert_eq!(progress_percent(0, 0), 0.0);
    assert_eq!(progress_percent(2, 4), 50.0);
    assert_eq!(progress_percent(5, 5), 100.0);
    assert_eq!(width_style(50.0), "50%");
  }

  #[test]
  fn copyable_details() {
    assert!(is_copyable("hello@example.com"));
    assert!(is_copyable("+1 555 0100"));
    assert!(!is_copyable("Berlin, Germany"));
    assert_eq!(
      copied_message("+1 555 0100"),
      "+1 555 0100 copied to clipboard!"
    );
  }
}
