#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Proficiency {
  Expert,
  Advanced,
  Intermediate,
  Beginner
}

impl Proficiency {
  pub fn parse(label: &str) -> Option<Self> {
    match label.trim() {
      | "Expert" => Some(Proficiency::Expert),
      | "Advanced" => {
        Some(Proficiency::Advanced)
      }
      | "Intermediate" => {
        Some(Proficiency::Intermediate)
      }
      | "Beginner" => {
        Some(Proficiency::Beginner)
      }
      | _ => None
    }
  }

  pub fn color(self) -> &'static str {
    match self {
      | Proficiency::Expert => "#10b981",
      | Proficiency::Advanced => "#3b82f6",
      | Proficiency::Intermediate => {
        "#f59e0b"
      }
      | Proficiency::Beginner => "#ef4444"
    }
  }
}

pub fn tooltip_text(
  skill: &str,
  level: &str
) -> String {
  format!("{}: {}", skill.trim(), level.trim())
}

pub const TOOLTIP_GAP_PX: f64 = 10.0;

/// Top-left corner that centres a tooltip
/// of `tip_width` x `tip_height` above the
/// anchor rectangle.
pub fn tooltip_position(
  anchor_left: f64,
  anchor_top: f64,
  anchor_width: f64,
  tip_width: f64,
  tip_height: f64
) -> (f64, f64) {
  (
    anchor_left + anchor_width / 2.0
      - tip_width / 2.0,
    anchor_top - tip_height - TOOLTIP_GAP_PX
  )
}
