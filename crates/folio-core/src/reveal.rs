use serde::{
  Deserialize,
  Serialize
};
use tracing::trace;

pub const DEFAULT_ROOT_MARGIN: &str =
  "0px 0px -50px 0px";

#[derive(
  Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[serde(default)]
pub struct RevealConfig {
  /// Visible fraction required before a
  /// card is revealed.
  pub threshold:   f64,
  pub root_margin: String,
  pub stagger_ms:  u32,
  pub duration_ms: u32,
  pub offset_px:   u32,
  /// Starting scale; `1.0` means no
  /// scaling.
  pub scale:       f64
}

impl Default for RevealConfig {
  fn default() -> Self {
    Self {
      threshold:   0.1,
      root_margin: DEFAULT_ROOT_MARGIN
        .to_string(),
      stagger_ms:  100,
      duration_ms: 600,
      offset_px:   30,
      scale:       1.0
    }
  }
}

impl RevealConfig {
  pub fn hidden_style(&self) -> CardStyle {
    CardStyle {
      opacity:   "0",
      transform: self.transform(
        self.offset_px,
        self.scale
      )
    }
  }

  pub fn shown_style(&self) -> CardStyle {
    CardStyle {
      opacity:   "1",
      transform: self.transform(0, 1.0)
    }
  }

  pub fn transition(&self) -> String {
    let secs =
      f64::from(self.duration_ms) / 1000.0;
    format!(
      "opacity {secs}s ease-out, \
       transform {secs}s ease-out"
    )
  }

  fn transform(
    &self,
    offset: u32,
    scale: f64
  ) -> String {
    let has_scale =
      (self.scale - 1.0).abs() > f64::EPSILON;
    if has_scale {
      format!(
        "translateY({offset}px) \
         scale({scale})"
      )
    } else {
      format!("translateY({offset}px)")
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
  pub opacity:   &'static str,
  pub transform: String
}

/// One entry of an intersection batch.
#[derive(
  Debug, Clone, Copy, PartialEq,
)]
pub struct Intersection {
  pub index:           usize,
  pub ratio:           f64,
  pub is_intersecting: bool
}

impl Intersection {
  pub fn passes(
    &self,
    threshold: f64
  ) -> bool {
    self.is_intersecting
      && self.ratio >= threshold
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct RevealStep {
  pub index:    usize,
  pub delay_ms: u32
}

/// One-shot reveal bookkeeping for a fixed
/// card list.
#[derive(Debug, Clone)]
pub struct RevealTracker {
  threshold:  f64,
  stagger_ms: u32,
  revealed:   Vec<bool>
}

impl RevealTracker {
  pub fn new(
    count: usize,
    config: &RevealConfig
  ) -> Self {
    Self {
      threshold:  config.threshold,
      stagger_ms: config.stagger_ms,
      revealed:   vec![false; count]
    }
  }

  /// Cards in the batch that become
  /// visible for the first time. The delay
  /// grows with the entry's position in the
  /// batch so cards arriving together
  /// animate in sequence.
  pub fn observe(
    &mut self,
    batch: &[Intersection]
  ) -> Vec<RevealStep> {
    let mut steps = Vec::new();
    for (position, entry) in
      batch.iter().enumerate()
    {
      let Some(revealed) =
        self.revealed.get_mut(entry.index)
      else {
        continue;
      };
      if *revealed
        || !entry.passes(self.threshold)
      {
        continue;
      }
      *revealed = true;
      let position =
        u32::try_from(position)
          .unwrap_or(u32::MAX);
      steps.push(RevealStep {
        index:    entry.index,
        delay_ms: position
          .saturating_mul(self.stagger_ms)
      });
    }
    trace!(
      batch = batch.len(),
      revealed = steps.len(),
      "processed intersection batch"
    );
    steps
  }

  pub fn all_revealed(&self) -> bool {
    self.revealed.iter().all(|r| *r)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(
    index: usize,
    ratio: f64
  ) -> Intersection {
    Intersection {
      index,
      ratio,
      is_intersecting: ratio > 0.0
    }
  }

  #[test]
  fn hidden_until_threshold_then_staggered() {
    let config = RevealConfig::default();
    let mut tracker =
      RevealTracker::new(4, &config);

    assert!(
      tracker
        .observe(&[entry(0, 0.0), entry(1, 0.05)])
        .is_empty()
    );
    assert!(!tracker.all_revealed());

    let steps = tracker.observe(&[
      entry(1, 0.2),
      entry(2, 0.0),
      entry(3, 0.5)
    ]);
    assert_eq!(
      steps,
      vec![
        RevealStep {
          index:    1,
          delay_ms: 0
        },
        RevealStep {
          index:    3,
          delay_ms: 200
        }
      ]
    );
  }

  #[test]
  fn revealed_cards_never_rehide_or_repeat() {
    let config = RevealConfig::default();
    let mut tracker =
      RevealTracker::new(1, &config);
    assert_eq!(
      tracker.observe(&[entry(0, 0.9)]).len(),
      1
    );
    assert!(
      tracker.observe(&[entry(0, 0.0)]).is_empty()
    );
    assert!(
      tracker.observe(&[entry(0, 1.0)]).is_empty()
    );
    assert!(tracker.all_revealed());
  }

  #[test]
  fn out_of_range_entries_are_ignored() {
    let mut tracker = RevealTracker::new(
      1,
      &RevealConfig::default()
    );
    assert!(
      tracker.observe(&[entry(7, 1.0)]).is_empty()
    );
  }

  #[test]
  fn styles_follow_config() {
    let config = RevealConfig {
      offset_px: 30,
      scale: 0.9,
      duration_ms: 800,
      ..RevealConfig::default()
    };
    assert_eq!(
      config.hidden_style(),
      CardStyle {
        opacity:   "0",
        transform: "translateY(30px) scale(0.9)"
          .to_string()
      }
    );
    assert_eq!(
      config.shown_style().transform,
      "translateY(0px) scale(1)"
    );
    assert_eq!(
      config.transition(),
      "opacity 0.8s ease-out, transform 0.8s ease-out"
    );

    let plain = RevealConfig::default();
    assert_eq!(
      plain.shown_style().transform,
      "translateY(0px)"
    );
  }
}
