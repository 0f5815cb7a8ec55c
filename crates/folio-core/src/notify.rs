#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NotificationKind {
  Success,
  Error,
  Info
}

impl NotificationKind {
  pub fn as_str(self) -> &'static str {
    match self {
      | NotificationKind::Success => {
        "success"
      }
      | NotificationKind::Error => "error",
      | NotificationKind::Info => "info"
    }
  }

  pub fn classes(self) -> &'static str {
    match self {
      | NotificationKind::Success => {
        "notification notification-success \
         bg-green-500"
      }
      | NotificationKind::Error => {
        "notification notification-error \
         bg-red-500"
      }
      | NotificationKind::Info => {
        "notification notification-info \
         bg-blue-500"
      }
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      | NotificationKind::Success => {
        "fas fa-check-circle"
      }
      | NotificationKind::Error => {
        "fas fa-exclamation-circle"
      }
      | NotificationKind::Info => {
        "fas fa-info-circle"
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind:    NotificationKind,
  pub message: String
}

impl Notification {
  pub fn success(
    message: impl Into<String>
  ) -> Self {
    Self {
      kind:    NotificationKind::Success,
      message: message.into()
    }
  }

  pub fn error(
    message: impl Into<String>
  ) -> Self {
    Self {
      kind:    NotificationKind::Error,
      message: message.into()
    }
  }

  pub fn info(
    message: impl Into<String>
  ) -> Self {
    Self {
      kind:    NotificationKind::Info,
      message: message.into()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn three_kinds_keep_distinct_classes() {
    let kinds = [
      NotificationKind::Success,
      NotificationKind::Error,
      NotificationKind::Info
    ];
    for (i, a) in kinds.iter().enumerate() {
      assert!(a.classes().contains(a.as_str()));
      for b in &kinds[i + 1..] {
        assert_ne!(a.classes(), b.classes());
      }
    }
    assert_eq!(
      Notification::info("Soon").kind,
      NotificationKind::Info
    );
  }
}
