use std::future::{
  self,
  Future
};

use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;

/// JSON body sent across the submission
/// boundary.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub subject:    String,
  pub message:    String
}

impl ContactMessage {
  pub fn to_json(
    &self
  ) -> Result<String, SubmitError> {
    serde_json::to_string(self).map_err(
      |error| {
        SubmitError::Encode(
          error.to_string()
        )
      }
    )
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum SubmitError {
  #[error(
    "submission timed out after \
     {timeout_ms} ms"
  )]
  Timeout { timeout_ms: u32 },
  #[error(
    "endpoint rejected submission with \
     status {status}"
  )]
  Rejected { status: u16 },
  #[error("network failure: {0}")]
  Network(String),
  #[error("failed to encode payload: {0}")]
  Encode(String),
  #[error("submission cancelled")]
  Cancelled
}

impl SubmitError {
  /// Text shown in the error
  /// notification.
  pub fn user_message(
    &self
  ) -> &'static str {
    match self {
      | SubmitError::Timeout {
        ..
      } => {
        "The server took too long to \
         respond. Please try again."
      }
      | SubmitError::Rejected {
        ..
      } => {
        "Your message could not be sent. \
         Please try again later."
      }
      | SubmitError::Network(_) => {
        "Network error. Check your \
         connection and try again."
      }
      | SubmitError::Encode(_) => {
        "Your message could not be \
         prepared for sending."
      }
      | SubmitError::Cancelled => {
        "Sending was cancelled."
      }
    }
  }
}

/// The request boundary for contact
/// submissions. Implementations decide
/// latency and transport; the session only
/// sees the outcome.
pub trait Submitter {
  fn submit(
    &self,
    message: ContactMessage
  ) -> impl Future<
    Output = Result<(), SubmitError>
  >;
}

/// Resolves immediately with a fixed
/// outcome.
#[derive(Debug, Clone)]
pub struct InstantSubmitter {
  outcome: Result<(), SubmitError>
}

impl InstantSubmitter {
  pub fn succeeding() -> Self {
    Self {
      outcome: Ok(())
    }
  }

  pub fn failing(
    error: SubmitError
  ) -> Self {
    Self {
      outcome: Err(error)
    }
  }
}

impl Submitter for InstantSubmitter {
  fn submit(
    &self,
    _message: ContactMessage
  ) -> impl Future<
    Output = Result<(), SubmitError>
  > {
    future::ready(self.outcome.clone())
  }
}

#[cfg(test)]
mod tests {
  use futures::executor::block_on;

  use super::*;

  #[test]
  fn payload_uses_markup_field_names() {
    let message = ContactMessage {
      first_name: "Ada".to_string(),
      last_name:  "Lovelace".to_string(),
      email:      "ada@example.com"
        .to_string(),
      subject:    "Engines".to_string(),
      message:    "About the analytical \
                   engine"
        .to_string()
    };
    let json =
      message.to_json().expect("encode");
    let value: serde_json::Value =
      serde_json::from_str(&json)
        .expect("decode");
    assert_eq!(value["firstName"], "Ada");
    assert_eq!(
      value["lastName"],
      "Lovelace"
    );
    assert_eq!(
      value["email"],
      "ada@example.com"
    );
    assert!(value.get("first_name").is_none());
  }

  #[test]
  fn instant_submitter_reports_outcome() {
    let ok = block_on(
      InstantSubmitter::succeeding()
        .submit(ContactMessage::default())
    );
    assert_eq!(ok, Ok(()));

    let err = block_on(
      InstantSubmitter::failing(
        SubmitError::Rejected {
          status: 503
        }
      )
      .submit(ContactMessage::default())
    );
    assert_eq!(
      err,
      Err(SubmitError::Rejected {
        status: 503
      })
    );
  }

  #[test]
  fn errors_render_for_logs_and_users() {
    let err = SubmitError::Timeout {
      timeout_ms: 10_000
    };
    assert_eq!(
      err.to_string(),
      "submission timed out after 10000 ms"
    );
    assert!(
      err
        .user_message()
        .contains("too long")
    );
  }
}
