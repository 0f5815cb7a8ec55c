use std::collections::BTreeMap;

use tracing::{
  debug,
  info,
  warn
};

use crate::draft::{
  DraftStore,
  Drafts
};
use crate::submit::{
  ContactMessage,
  SubmitError
};
use crate::validate::{
  FieldError,
  FieldName,
  FormReport,
  check_field,
  validate_form
};

/// What the page should show for a field
/// after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
  /// Nothing to re-render.
  Untouched,
  Valid,
  Invalid(&'static str)
}

impl FieldStatus {
  fn from_check(
    result: Result<(), FieldError>
  ) -> Self {
    match result {
      | Ok(()) => FieldStatus::Valid,
      | Err(error) => {
        FieldStatus::Invalid(error.message)
      }
    }
  }
}

/// Identifies one submission attempt.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
  pub ticket:  Ticket,
  pub message: ContactMessage
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
  Invalid(FormReport),
  AlreadyPending
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
  Sent,
  Failed(SubmitError),
  /// The attempt was cancelled or
  /// superseded; its result must not
  /// touch the page.
  Stale
}

/// Issues tickets and remembers which one
/// is still in flight.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
  next:    u64,
  pending: Option<Ticket>
}

impl Sequencer {
  pub fn begin(
    &mut self
  ) -> Option<Ticket> {
    if self.pending.is_some() {
      return None;
    }
    self.next += 1;
    let ticket = Ticket(self.next);
    self.pending = Some(ticket);
    Some(ticket)
  }

  /// True when `ticket` was the pending
  /// attempt, which is then cleared. Any
  /// other ticket leaves the pending one
  /// in place.
  pub fn finish(
    &mut self,
    ticket: Ticket
  ) -> bool {
    if self.pending == Some(ticket) {
      self.pending = None;
      true
    } else {
      false
    }
  }

  pub fn cancel(
    &mut self
  ) -> Option<Ticket> {
    self.pending.take()
  }

  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}

/// Contact form state for one page load:
/// field values, error flags, drafts and
/// the submission sequencer.
#[derive(Debug)]
pub struct ContactSession<S> {
  fields:    Vec<FieldName>,
  values:    BTreeMap<FieldName, String>,
  errors:
    BTreeMap<FieldName, &'static str>,
  drafts:    Drafts<S>,
  sequencer: Sequencer
}

impl<S: DraftStore> ContactSession<S> {
  pub fn new(drafts: Drafts<S>) -> Self {
    Self {
      fields: FieldName::ALL.to_vec(),
      values: BTreeMap::new(),
      errors: BTreeMap::new(),
      drafts,
      sequencer: Sequencer::default()
    }
  }

  /// Limits submit-time validation to the
  /// fields the page actually has.
  pub fn with_fields<I>(
    mut self,
    fields: I
  ) -> Self
  where
    I: IntoIterator<Item = FieldName>
  {
    self.fields =
      fields.into_iter().collect();
    self.fields.sort();
    self.fields.dedup();
    self
  }

  pub fn fields(&self) -> &[FieldName] {
    &self.fields
  }

  /// Loads saved drafts into the session
  /// and returns them so the page can
  /// pre-fill its inputs.
  pub fn restore_drafts(
    &mut self
  ) -> Vec<(FieldName, String)> {
    let restored = self.drafts.restore();
    for (field, value) in &restored {
      self
        .values
        .insert(*field, value.clone());
    }
    restored
  }

  pub fn value(
    &self,
    field: FieldName
  ) -> &str {
    self
      .values
      .get(&field)
      .map(String::as_str)
      .unwrap_or_default()
  }

  pub fn has_error(
    &self,
    field: FieldName
  ) -> bool {
    self.errors.contains_key(&field)
  }

  pub fn error(
    &self,
    field: FieldName
  ) -> Option<&'static str> {
    self.errors.get(&field).copied()
  }

  /// A keystroke: saves the draft and
  /// re-checks the field only if it is
  /// already flagged, so a correction
  /// clears the error live.
  pub fn input(
    &mut self,
    field: FieldName,
    value: &str
  ) -> FieldStatus {
    self
      .values
      .insert(field, value.to_string());
    self.drafts.record(field, value);

    if self.has_error(field) {
      self.check(field)
    } else {
      FieldStatus::Untouched
    }
  }

  pub fn blur(
    &mut self,
    field: FieldName,
    value: &str
  ) -> FieldStatus {
    self
      .values
      .insert(field, value.to_string());
    self.check(field)
  }

  fn check(
    &mut self,
    field: FieldName
  ) -> FieldStatus {
    let result =
      check_field(field, self.value(field));
    match &result {
      | Ok(()) => {
        self.errors.remove(&field);
      }
      | Err(error) => {
        self
          .errors
          .insert(field, error.message);
      }
    }
    FieldStatus::from_check(result)
  }

  /// Validates the page's fields and, when
  /// they all pass, opens a ticketed
  /// submission. Absent fields are sent
  /// empty.
  #[tracing::instrument(skip(self))]
  pub fn begin_submit(
    &mut self
  ) -> Result<PendingSubmission, SubmitBlocked>
  {
    if self.sequencer.is_pending() {
      debug!(
        "ignoring submit while one is \
         pending"
      );
      return Err(
        SubmitBlocked::AlreadyPending
      );
    }

    let report =
      validate_form(self.fields.iter().map(
        |field| {
          (field.as_str(), self.value(*field))
        }
      ));
    for field in &self.fields {
      self.errors.remove(field);
    }
    for error in &report.errors {
      self
        .errors
        .insert(error.field, error.message);
    }

    if !report.is_valid() {
      debug!(
        checked = report.checked,
        invalid = report.errors.len(),
        "contact form failed validation"
      );
      return Err(SubmitBlocked::Invalid(
        report
      ));
    }

    let Some(ticket) =
      self.sequencer.begin()
    else {
      return Err(
        SubmitBlocked::AlreadyPending
      );
    };

    let trimmed = |field| {
      self.value(field).trim().to_string()
    };
    let message = ContactMessage {
      first_name: trimmed(
        FieldName::FirstName
      ),
      last_name:  trimmed(
        FieldName::LastName
      ),
      email:      trimmed(FieldName::Email),
      subject:    trimmed(
        FieldName::Subject
      ),
      message:    trimmed(
        FieldName::Message
      )
    };

    info!(?ticket, "contact submission started");
    Ok(PendingSubmission {
      ticket,
      message
    })
  }

  #[tracing::instrument(skip(self))]
  pub fn finish_submit(
    &mut self,
    ticket: Ticket,
    result: Result<(), SubmitError>
  ) -> Completion {
    if !self.sequencer.finish(ticket) {
      debug!(
        ?ticket,
        "dropping stale submission result"
      );
      return Completion::Stale;
    }

    match result {
      | Ok(()) => {
        self.values.clear();
        self.errors.clear();
        self.drafts.clear();
        info!(
          ?ticket,
          "contact submission sent"
        );
        Completion::Sent
      }
      | Err(error) => {
        warn!(
          ?ticket,
          %error,
          "contact submission failed"
        );
        Completion::Failed(error)
      }
    }
  }

  /// Abandons the in-flight attempt, e.g.
  /// when the page is being left.
  pub fn cancel_pending(
    &mut self
  ) -> Option<Ticket> {
    let cancelled = self.sequencer.cancel();
    if let Some(ticket) = cancelled {
      info!(
        ?ticket,
        "contact submission cancelled"
      );
    }
    cancelled
  }

  pub fn is_pending(&self) -> bool {
    self.sequencer.is_pending()
  }

  pub fn drafts(&self) -> &Drafts<S> {
    &self.drafts
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::draft::MemoryStore;

  fn session() -> ContactSession<MemoryStore>
  {
    ContactSession::new(Drafts::new(
      MemoryStore::new()
    ))
  }

  fn fill_valid(
    session: &mut ContactSession<MemoryStore>
  ) {
    for (field, value) in [
      (FieldName::FirstName, "Grace"),
      (FieldName::LastName, "Hopper"),
      (
        FieldName::Email,
        "grace@example.com"
      ),
      (FieldName::Subject, "COBOL talk"),
      (
        FieldName::Message,
        "Would you speak at our meetup?"
      )
    ] {
      session.input(field, value);
    }
  }

  #[test]
  fn input_only_revalidates_flagged_fields()
  {
    let mut session = session();
    assert_eq!(
      session.input(FieldName::Subject, "Hi"),
      FieldStatus::Untouched
    );
    assert_eq!(
      session.blur(FieldName::Subject, "Hi"),
      FieldStatus::Invalid(
        "Subject must be at least 5 \
         characters long"
      )
    );
    assert!(
      session.has_error(FieldName::Subject)
    );
    assert_eq!(
      session
        .input(FieldName::Subject, "Hi the"),
      FieldStatus::Valid
    );
    assert!(
      !session.has_error(FieldName::Subject)
    );
  }

  #[test]
  fn invalid_submit_reports_all_fields() {
    let mut session = session();
    session
      .input(FieldName::FirstName, "Grace");
    let Err(SubmitBlocked::Invalid(report)) =
      session.begin_submit()
    else {
      panic!("expected invalid form");
    };
    assert_eq!(report.checked, 5);
    assert_eq!(report.errors.len(), 4);
    assert!(
      report
        .error_for(FieldName::FirstName)
        .is_none()
    );
    assert!(!session.is_pending());
    assert!(
      session.has_error(FieldName::Message)
    );
  }

  #[test]
  fn absent_fields_are_not_validated() {
    let mut session = session().with_fields([
      FieldName::FirstName,
      FieldName::Email,
      FieldName::Subject,
      FieldName::Message
    ]);
    for (field, value) in [
      (FieldName::FirstName, "Grace"),
      (
        FieldName::Email,
        "grace@example.com"
      ),
      (FieldName::Subject, "COBOL talk"),
      (
        FieldName::Message,
        "Would you speak at our meetup?"
      )
    ] {
      session.input(field, value);
    }
    let pending = session
      .begin_submit()
      .expect("form without last name");
    assert_eq!(pending.message.last_name, "");
    assert!(
      !session.has_error(FieldName::LastName)
    );
    assert_eq!(session.fields().len(), 4);
  }

  #[test]
  fn present_fields_still_block_submit() {
    let mut session = session()
      .with_fields([FieldName::Email]);
    let Err(SubmitBlocked::Invalid(report)) =
      session.begin_submit()
    else {
      panic!("expected invalid email");
    };
    assert_eq!(report.checked, 1);
    assert!(
      report
        .error_for(FieldName::Email)
        .is_some()
    );
  }

  #[test]
  fn finish_ignores_other_tickets() {
    let mut sequencer = Sequencer::default();
    let first =
      sequencer.begin().expect("idle");
    assert!(sequencer.finish(first));
    let second =
      sequencer.begin().expect("idle");
    assert!(!sequencer.finish(first));
    assert!(sequencer.is_pending());
    assert!(sequencer.finish(second));
    assert!(!sequencer.is_pending());
  }

  #[test]
  fn second_submit_while_pending_is_ignored()
  {
    let mut session = session();
    fill_valid(&mut session);
    let pending = session
      .begin_submit()
      .expect("valid form");
    assert_eq!(
      pending.message.first_name,
      "Grace"
    );
    assert_eq!(
      session.begin_submit(),
      Err(SubmitBlocked::AlreadyPending)
    );
  }

  #[test]
  fn success_clears_values_and_drafts() {
    let mut session = session();
    fill_valid(&mut session);
    assert_eq!(
      session.drafts().store().len(),
      5
    );
    let pending = session
      .begin_submit()
      .expect("valid form");

    assert_eq!(
      session
        .finish_submit(pending.ticket, Ok(())),
      Completion::Sent
    );
    assert!(session.drafts().store().is_empty());
    for field in FieldName::ALL {
      assert_eq!(session.value(field), "");
    }
  }

  #[test]
  fn failure_keeps_drafts_for_retry() {
    let mut session = session();
    fill_valid(&mut session);
    let pending = session
      .begin_submit()
      .expect("valid form");
    let outcome = session.finish_submit(
      pending.ticket,
      Err(SubmitError::Network(
        "offline".to_string()
      ))
    );
    assert!(matches!(
      outcome,
      Completion::Failed(
        SubmitError::Network(_)
      )
    ));
    assert_eq!(
      session.drafts().store().len(),
      5
    );
    assert_eq!(
      session.value(FieldName::LastName),
      "Hopper"
    );
    assert!(session.begin_submit().is_ok());
  }

  #[test]
  fn cancelled_ticket_completes_stale() {
    let mut session = session();
    fill_valid(&mut session);
    let pending = session
      .begin_submit()
      .expect("valid form");
    assert_eq!(
      session.cancel_pending(),
      Some(pending.ticket)
    );
    assert_eq!(
      session
        .finish_submit(pending.ticket, Ok(())),
      Completion::Stale
    );
    assert_eq!(
      session.drafts().store().len(),
      5
    );
  }

  #[test]
  fn restore_prefills_values() {
    let mut store = MemoryStore::new();
    store.save("contact_subject", "Saved");
    let mut session =
      ContactSession::new(Drafts::new(store));
    let restored = session.restore_drafts();
    assert_eq!(restored.len(), 1);
    assert_eq!(
      session.value(FieldName::Subject),
      "Saved"
    );
  }
}
