use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{
  trace,
  warn
};

fn email_shape() -> Option<&'static Regex>
{
  static EMAIL_SHAPE: OnceLock<
    Option<Regex>
  > = OnceLock::new();
  EMAIL_SHAPE
    .get_or_init(|| {
      Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
      )
      .map_err(|error| {
        warn!(
          %error,
          "internal email regex compile \
           failure"
        );
      })
      .ok()
    })
    .as_ref()
}

/// The five tracked contact form fields.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub enum FieldName {
  FirstName,
  LastName,
  Email,
  Subject,
  Message
}

impl FieldName {
  pub const ALL: [FieldName; 5] = [
    FieldName::FirstName,
    FieldName::LastName,
    FieldName::Email,
    FieldName::Subject,
    FieldName::Message
  ];

  /// The `name`/`id` attribute used by
  /// the page markup.
  pub fn as_str(self) -> &'static str {
    match self {
      | FieldName::FirstName => {
        "firstName"
      }
      | FieldName::LastName => "lastName",
      | FieldName::Email => "email",
      | FieldName::Subject => "subject",
      | FieldName::Message => "message"
    }
  }

  pub fn parse(
    raw: &str
  ) -> Option<FieldName> {
    FieldName::ALL
      .into_iter()
      .find(|field| field.as_str() == raw)
  }
}

impl fmt::Display for FieldName {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   FieldName,
  pub message: &'static str
}

impl fmt::Display for FieldError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{}: {}",
      self.field, self.message
    )
  }
}

pub fn is_email_shape(
  value: &str
) -> bool {
  email_shape()
    .is_some_and(|re| re.is_match(value))
}

fn min_chars(
  value: &str,
  min: usize
) -> bool {
  value.chars().count() >= min
}

/// Checks one known field. The value is
/// trimmed before any rule applies.
pub fn check_field(
  field: FieldName,
  value: &str
) -> Result<(), FieldError> {
  let value = value.trim();
  let failure = match field {
    | FieldName::FirstName
    | FieldName::LastName => {
      (!min_chars(value, 2)).then_some(
        "Name must be at least 2 \
         characters long"
      )
    }
    | FieldName::Email => {
      (!is_email_shape(value))
        .then_some(
          "Please enter a valid email \
           address"
        )
    }
    | FieldName::Subject => {
      (!min_chars(value, 5)).then_some(
        "Subject must be at least 5 \
         characters long"
      )
    }
    | FieldName::Message => {
      (!min_chars(value, 10))
        .then_some(
          "Message must be at least 10 \
           characters long"
        )
    }
  };

  trace!(
    field = field.as_str(),
    valid = failure.is_none(),
    "checked field"
  );

  match failure {
    | Some(message) => {
      Err(FieldError {
        field,
        message
      })
    }
    | None => Ok(())
  }
}

/// Checks a field by its markup name.
/// Names without a rule always pass.
pub fn validate_field(
  name: &str,
  value: &str
) -> Result<(), FieldError> {
  match FieldName::parse(name) {
    | Some(field) => {
      check_field(field, value)
    }
    | None => Ok(())
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct FormReport {
  pub checked: usize,
  pub errors:  Vec<FieldError>
}

impl FormReport {
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn error_for(
    &self,
    field: FieldName
  ) -> Option<&FieldError> {
    self
      .errors
      .iter()
      .find(|error| error.field == field)
  }
}

/// Validates every field, collecting all
/// failures instead of stopping at the
/// first one.
#[tracing::instrument(skip_all)]
pub fn validate_form<'a, I>(
  fields: I
) -> FormReport
where
  I: IntoIterator<
    Item = (&'a str, &'a str)
  >
{
  let mut report = FormReport::default();
  for (name, value) in fields {
    report.checked += 1;
    if let Err(error) =
      validate_field(name, value)
    {
      report.errors.push(error);
    }
  }
  report
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_need_two_characters() {
    for field in [
      FieldName::FirstName,
      FieldName::LastName
    ] {
      let err = check_field(field, "A")
        .expect_err("too short");
      assert_eq!(
        err.message,
        "Name must be at least 2 \
         characters long"
      );
      assert!(
        check_field(field, "Al").is_ok()
      );
    }
  }

  #[test]
  fn subject_and_message_minimums() {
    assert!(
      check_field(
        FieldName::Subject,
        "Hey!"
      )
      .is_err()
    );
    assert!(
      check_field(
        FieldName::Subject,
        "Hello"
      )
      .is_ok()
    );
    let err = check_field(
      FieldName::Message,
      "too short"
    )
    .expect_err("nine chars");
    assert_eq!(
      err.message,
      "Message must be at least 10 \
       characters long"
    );
    assert!(
      check_field(
        FieldName::Message,
        "long enough"
      )
      .is_ok()
    );
  }

  #[test]
  fn values_are_trimmed_before_checks() {
    assert!(
      check_field(
        FieldName::FirstName,
        "  a   "
      )
      .is_err()
    );
    assert!(
      check_field(
        FieldName::Subject,
        "   abcde "
      )
      .is_ok()
    );
  }

  #[test]
  fn email_shape_accepts_simple_addresses() {
    assert!(is_email_shape(
      "user@example.com"
    ));
    assert!(!is_email_shape("user@"));
    assert!(!is_email_shape(
      "user example.com"
    ));
    assert!(!is_email_shape(""));
    assert!(!is_email_shape(
      "a b@example.com"
    ));
    let err = validate_field("email", "")
      .expect_err("empty email");
    assert_eq!(
      err.message,
      "Please enter a valid email \
       address"
    );
  }

  #[test]
  fn multibyte_names_count_characters() {
    assert!(
      check_field(
        FieldName::FirstName,
        "Łu"
      )
      .is_ok()
    );
  }

  #[test]
  fn unknown_fields_pass() {
    assert!(
      validate_field("company", "")
        .is_ok()
    );
  }

  #[test]
  fn form_reports_every_failure() {
    let report = validate_form([
      ("firstName", "J"),
      ("lastName", "Doe"),
      ("email", "nope"),
      ("subject", "Hi"),
      ("message", "A long enough body")
    ]);
    assert!(!report.is_valid());
    assert_eq!(report.checked, 5);
    assert_eq!(report.errors.len(), 3);
    assert!(
      report
        .error_for(FieldName::FirstName)
        .is_some()
    );
    assert!(
      report
        .error_for(FieldName::Email)
        .is_some()
    );
    assert!(
      report
        .error_for(FieldName::Subject)
        .is_some()
    );
    assert!(
      report
        .error_for(FieldName::Message)
        .is_none()
    );
  }

  #[test]
  fn field_names_round_trip_markup() {
    for field in FieldName::ALL {
      assert_eq!(
        FieldName::parse(field.as_str()),
        Some(field)
      );
    }
    assert_eq!(
      FieldName::parse("phone"),
      None
    );
  }
}
