use std::cell::RefCell;
use std::rc::Rc;

use folio_core::accordion::Accordion;
use folio_core::bindings::EventKind;
use folio_core::config::ContactConfig;
use folio_core::contact::{
  Completion,
  ContactSession,
  FieldStatus,
  SubmitBlocked
};
use folio_core::draft::Drafts;
use folio_core::form::{
  COPY_FAILED_MESSAGE,
  CharCounter,
  MAP_PLACEHOLDER_MESSAGE,
  copied_message,
  is_copyable,
  progress_percent,
  width_style
};
use folio_core::keynav::{
  FocusTarget,
  next_focus
};
use folio_core::notify::Notification;
use folio_core::submit::Submitter;
use folio_core::validate::FieldName;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
  Document,
  Element,
  HtmlButtonElement,
  HtmlFormElement,
  KeyboardEvent
};

use crate::bindings::{
  Listeners,
  listen,
  listen_active
};
use crate::dom;
use crate::notify::Notifier;
use crate::storage::LocalDraftStore;
use crate::submit::ContactSubmitter;

const ERROR_BORDER: &str = "#ef4444";
const NEUTRAL_BORDER: &str = "#d1d5db";
const PENDING_LABEL: &str = "Sending...";

struct ContactPage {
  form:       HtmlFormElement,
  /// Every input and textarea, in
  /// document order.
  inputs:     Vec<Element>,
  session:
    RefCell<ContactSession<LocalDraftStore>>,
  submitter:  ContactSubmitter,
  notifier:   Notifier,
  success:    String,
  char_count: Option<(Element, CharCounter)>,
  progress:   Option<Element>,
  idle_label: RefCell<String>
}

/// Contact page behaviour, bound to
/// `#<form_id>`. Dropping it removes
/// every listener.
pub struct ContactController {
  _page:      Rc<ContactPage>,
  _listeners: Listeners
}

fn field_of(
  element: &Element
) -> Option<FieldName> {
  element
    .get_attribute("name")
    .and_then(|name| FieldName::parse(&name))
}

fn show_error(
  field: &Element,
  name: &str,
  message: &str
) {
  clear_error(field, name);
  dom::set_class(field, "error", true);
  dom::set_styles(
    field,
    &[("border-color", ERROR_BORDER)]
  );

  let (Some(parent), Some(document)) =
    (field.parent_element(), dom::document())
  else {
    return;
  };
  let Some(error) = dom::create(
    &document,
    "div",
    "field-error text-red-500 text-sm mt-1"
  ) else {
    return;
  };
  error.set_id(&format!("{name}-error"));
  error.set_text_content(Some(message));
  let _ = parent.append_child(&error);
}

fn clear_error(
  field: &Element,
  name: &str
) {
  dom::set_class(field, "error", false);
  dom::set_styles(
    field,
    &[("border-color", NEUTRAL_BORDER)]
  );
  if let Some(parent) = field.parent_element()
  {
    dom::remove_all(
      &parent,
      &format!("#{name}-error")
    );
  }
}

fn render_status(
  field: &Element,
  name: FieldName,
  status: &FieldStatus
) {
  match status {
    | FieldStatus::Untouched => {}
    | FieldStatus::Valid => {
      clear_error(field, name.as_str());
    }
    | FieldStatus::Invalid(message) => {
      show_error(
        field,
        name.as_str(),
        message
      );
    }
  }
}

fn show_feedback(
  field: &Element,
  valid: bool
) {
  let (Some(parent), Some(document)) =
    (field.parent_element(), dom::document())
  else {
    return;
  };
  dom::remove_all(&parent, ".validation-icon");
  dom::set_styles(
    &parent,
    &[("position", "relative")]
  );

  let icon_class = if valid {
    "fas fa-check text-green-500"
  } else {
    "fas fa-times text-red-500"
  };
  let (Some(holder), Some(icon)) = (
    dom::create(
      &document,
      "span",
      "validation-icon absolute right-3 \
       top-1/2 transform -translate-y-1/2"
    ),
    dom::create(&document, "i", icon_class)
  ) else {
    return;
  };
  let _ = holder.append_child(&icon);
  let _ = parent.append_child(&holder);
}

impl ContactPage {
  fn submit_button(
    &self
  ) -> Option<HtmlButtonElement> {
    dom::query_in(
      &self.form,
      "button[type=\"submit\"]"
    )
    .and_then(|el| {
      el.dyn_into::<HtmlButtonElement>().ok()
    })
  }

  fn set_pending(&self, pending: bool) {
    let Some(button) = self.submit_button()
    else {
      return;
    };
    if pending {
      *self.idle_label.borrow_mut() = button
        .text_content()
        .unwrap_or_default();
      button
        .set_text_content(Some(PENDING_LABEL));
      button.set_disabled(true);
      dom::set_styles(
        &button,
        &[("opacity", "0.7")]
      );
    } else {
      let label =
        self.idle_label.borrow().clone();
      button.set_text_content(Some(&label));
      button.set_disabled(false);
      dom::set_styles(
        &button,
        &[("opacity", "1")]
      );
    }
  }

  fn update_progress(&self) {
    let Some(fill) = self.progress.as_ref()
    else {
      return;
    };
    let filled = self
      .inputs
      .iter()
      .filter(|input| {
        !dom::input_value(input)
          .trim()
          .is_empty()
      })
      .count();
    let percent =
      progress_percent(filled, self.inputs.len());
    dom::set_styles(
      fill,
      &[("width", &width_style(percent))]
    );
  }

  fn message_input(&self) -> Option<&Element> {
    self.inputs.iter().find(|input| {
      field_of(input)
        == Some(FieldName::Message)
    })
  }

  fn update_char_count(&self) {
    let Some((label, counter)) =
      self.char_count.as_ref()
    else {
      return;
    };
    let len = self
      .message_input()
      .map(|input| {
        dom::input_value(input).chars().count()
      })
      .unwrap_or_default();
    label.set_text_content(Some(
      &counter.label(len)
    ));
    dom::set_styles(
      label,
      &[("color", counter.tone(len).color())]
    );
  }

  fn render_blocked(
    &self,
    blocked: &SubmitBlocked
  ) {
    let SubmitBlocked::Invalid(report) =
      blocked
    else {
      return;
    };
    for input in &self.inputs {
      let Some(field) = field_of(input) else {
        continue;
      };
      match report.error_for(field) {
        | Some(error) => {
          show_error(
            input,
            field.as_str(),
            error.message
          );
        }
        | None => {
          clear_error(input, field.as_str())
        }
      }
    }
  }

  fn reset_after_send(&self) {
    self.form.reset();
    for input in &self.inputs {
      let name = input
        .get_attribute("name")
        .unwrap_or_default();
      clear_error(input, &name);
    }
    dom::remove_all(
      &self.form,
      ".validation-icon"
    );
    self.update_progress();
    self.update_char_count();
  }
}

/// Validates, locks the form and hands
/// the message to the submitter. The
/// result is applied only if the ticket
/// is still current.
fn submit(page: &Rc<ContactPage>) {
  for input in &page.inputs {
    if let Some(field) = field_of(input) {
      page
        .session
        .borrow_mut()
        .input(field, &dom::input_value(input));
    }
  }

  let begun =
    page.session.borrow_mut().begin_submit();
  let pending = match begun {
    | Ok(pending) => pending,
    | Err(blocked) => {
      page.render_blocked(&blocked);
      return;
    }
  };

  page.set_pending(true);
  let page = page.clone();
  wasm_bindgen_futures::spawn_local(
    async move {
      let submitter = page.submitter.clone();
      let result = submitter
        .submit(pending.message)
        .await;
      let completion = page
        .session
        .borrow_mut()
        .finish_submit(pending.ticket, result);
      match completion {
        | Completion::Sent => {
          page.notifier.show(
            Notification::success(
              page.success.clone()
            )
          );
          page.reset_after_send();
          page.set_pending(false);
        }
        | Completion::Failed(error) => {
          page.notifier.show(
            Notification::error(
              error.user_message()
            )
          );
          page.set_pending(false);
        }
        | Completion::Stale => {}
      }
    }
  );
}

impl ContactController {
  pub fn attach(
    document: &Document,
    cfg: &ContactConfig,
    notifier: Notifier
  ) -> Option<Self> {
    let Some(form) = document
      .get_element_by_id(&cfg.form_id)
      .and_then(|el| {
        el.dyn_into::<HtmlFormElement>().ok()
      })
    else {
      tracing::debug!(
        form_id = %cfg.form_id,
        "no contact form on page"
      );
      return None;
    };

    let inputs = dom::query_all_in(
      &form,
      "input, textarea"
    );
    let mut session =
      ContactSession::new(Drafts::with_prefix(
        LocalDraftStore::open(),
        &cfg.storage_prefix
      ))
      .with_fields(
        inputs.iter().filter_map(field_of)
      );
    for (field, value) in
      session.restore_drafts()
    {
      if let Some(input) =
        inputs.iter().find(|input| {
          field_of(input) == Some(field)
        })
      {
        dom::set_input_value(input, &value);
      }
    }

    mark_required(document, &form);
    let progress =
      insert_progress(document, &form);
    let char_count = inputs
      .iter()
      .find(|input| {
        field_of(input)
          == Some(FieldName::Message)
      })
      .and_then(|input| {
        let parent = input.parent_element()?;
        let label = dom::create(
          document,
          "div",
          "text-sm text-gray-500 mt-1 \
           text-right"
        )?;
        parent.append_child(&label).ok()?;
        Some((
          label,
          CharCounter::new(cfg.message_limit)
        ))
      });

    let fields = session.fields().len();
    let page = Rc::new(ContactPage {
      form: form.clone(),
      inputs,
      session: RefCell::new(session),
      submitter: ContactSubmitter::from_config(
        cfg
      ),
      notifier,
      success: cfg.success_message.clone(),
      char_count,
      progress,
      idle_label: RefCell::new(String::new())
    });
    page.update_progress();
    page.update_char_count();

    let mut listeners = Listeners::new();
    bind_fields(&mut listeners, &page);
    bind_form(&mut listeners, &page);
    bind_details(
      &mut listeners,
      document,
      cfg,
      &page.notifier
    );
    animate_cards(document, cfg);

    tracing::info!(
      inputs = page.inputs.len(),
      fields,
      listeners = listeners.len(),
      endpoint = ?cfg.endpoint,
      "contact controller attached"
    );
    Some(Self {
      _page:      page,
      _listeners: listeners
    })
  }
}

fn bind_fields(
  listeners: &mut Listeners,
  page: &Rc<ContactPage>
) {
  for input in &page.inputs {
    let name = input
      .get_attribute("name")
      .unwrap_or_default();
    let label = format!("[name={name}]");
    let field = FieldName::parse(&name);

    listen(
      listeners,
      &label,
      input,
      EventKind::Blur,
      {
        let page = page.clone();
        let input = input.clone();
        move |_| {
          let valid = match field {
            | Some(field) => {
              let status =
                page.session.borrow_mut().blur(
                  field,
                  &dom::input_value(&input)
                );
              render_status(
                &input, field, &status
              );
              !matches!(
                status,
                FieldStatus::Invalid(_)
              )
            }
            | None => true
          };
          show_feedback(&input, valid);
        }
      }
    );

    if let Some(field) = field {
      listen(
        listeners,
        &label,
        input,
        EventKind::Input,
        {
          let page = page.clone();
          let input = input.clone();
          move |_| {
            let status =
              page.session.borrow_mut().input(
                field,
                &dom::input_value(&input)
              );
            render_status(
              &input, field, &status
            );
            if field == FieldName::Message {
              page.update_char_count();
            }
          }
        }
      );
    }
  }
}

fn focus_next(
  page: &ContactPage,
  event: &web_sys::Event
) {
  let Some(key) =
    event.dyn_ref::<KeyboardEvent>()
  else {
    return;
  };
  if key.key() != "Enter" {
    return;
  }
  let Some(target) = dom::event_target(event)
  else {
    return;
  };
  if target
    .tag_name()
    .eq_ignore_ascii_case("textarea")
  {
    return;
  }
  let Some(current) = page
    .inputs
    .iter()
    .position(|input| *input == target)
  else {
    return;
  };
  event.prevent_default();
  match next_focus(current, page.inputs.len())
  {
    | FocusTarget::Field(next) => {
      if let Some(input) = page.inputs.get(next)
      {
        dom::focus(input);
      }
    }
    | FocusTarget::SubmitButton => {
      if let Some(button) = page.submit_button()
      {
        dom::focus(&button);
      }
    }
  }
}

fn bind_form(
  listeners: &mut Listeners,
  page: &Rc<ContactPage>
) {
  let form: &Element = &page.form;

  listen_active(
    listeners,
    "form",
    form,
    EventKind::Submit,
    {
      let page = page.clone();
      move |event| {
        event.prevent_default();
        submit(&page);
      }
    }
  );

  listen(listeners, "form", form, EventKind::Input, {
    let page = page.clone();
    move |_| page.update_progress()
  });

  listen_active(
    listeners,
    "form",
    form,
    EventKind::KeyDown,
    {
      let page = page.clone();
      move |event| focus_next(&page, event)
    }
  );

  if let Some(window) = web_sys::window() {
    listen(
      listeners,
      "window",
      &window,
      EventKind::PageHide,
      {
        let page = page.clone();
        move |_| {
          let cancelled = page
            .session
            .borrow_mut()
            .cancel_pending();
          if cancelled.is_some() {
            page.submitter.abort();
            page.set_pending(false);
          }
        }
      }
    );
  }
}

fn bind_details(
  listeners: &mut Listeners,
  document: &Document,
  cfg: &ContactConfig,
  notifier: &Notifier
) {
  for link in dom::query_all(
    document,
    &cfg.social_link_selector
  ) {
    listen(
      listeners,
      "social link",
      &link,
      EventKind::MouseEnter,
      {
        let link = link.clone();
        move |_| {
          dom::set_styles(
            &link,
            &[(
              "transform",
              "scale(1.1) rotate(5deg)"
            )]
          );
        }
      }
    );
    listen(
      listeners,
      "social link",
      &link,
      EventKind::MouseLeave,
      {
        let link = link.clone();
        move |_| {
          dom::set_styles(
            &link,
            &[(
              "transform",
              "scale(1) rotate(0deg)"
            )]
          );
        }
      }
    );
  }

  bind_faq(
    listeners,
    document,
    &cfg.faq_item_selector
  );

  let details =
    format!("{} p", cfg.card_selector);
  for info in dom::query_all(document, &details)
  {
    let text = dom::text_of(&info);
    if !is_copyable(&text) {
      continue;
    }
    dom::set_styles(
      &info,
      &[("cursor", "pointer")]
    );
    let _ =
      info.set_attribute("title", "Click to copy");
    listen(
      listeners,
      "contact detail",
      &info,
      EventKind::Click,
      {
        let notifier = notifier.clone();
        move |_| {
          copy_to_clipboard(
            text.clone(),
            notifier.clone()
          )
        }
      }
    );
  }

  if let Some(map) =
    dom::query(document, &cfg.map_selector)
  {
    listen(listeners, "map", &map, EventKind::Click, {
      let notifier = notifier.clone();
      move |_| {
        notifier.show(Notification::info(
          MAP_PLACEHOLDER_MESSAGE
        ))
      }
    });
  }
}

fn copy_to_clipboard(
  text: String,
  notifier: Notifier
) {
  let Some(window) = web_sys::window() else {
    return;
  };
  let promise = window
    .navigator()
    .clipboard()
    .write_text(&text);
  wasm_bindgen_futures::spawn_local(
    async move {
      match JsFuture::from(promise).await {
        | Ok(_) => {
          notifier.show(Notification::success(
            copied_message(&text)
          ))
        }
        | Err(error) => {
          tracing::warn!(
            ?error,
            "clipboard write failed"
          );
          notifier.show(Notification::error(
            COPY_FAILED_MESSAGE
          ));
        }
      }
    }
  );
}

fn set_answer(answer: &Element, open: bool) {
  if open {
    let height =
      format!("{}px", answer.scroll_height());
    dom::set_styles(
      answer,
      &[
        ("display", "block"),
        ("opacity", "1"),
        ("max-height", &height)
      ]
    );
  } else {
    dom::set_styles(
      answer,
      &[
        ("display", "none"),
        ("opacity", "0"),
        ("max-height", "0")
      ]
    );
  }
}

fn bind_faq(
  listeners: &mut Listeners,
  document: &Document,
  selector: &str
) {
  let items: Vec<(Element, Element)> =
    dom::query_all(document, selector)
      .iter()
      .filter_map(|item| {
        Some((
          dom::query_in(item, "h3")?,
          dom::query_in(item, "p")?
        ))
      })
      .collect();
  if items.is_empty() {
    return;
  }

  let answers: Rc<Vec<Element>> = Rc::new(
    items
      .iter()
      .map(|(_, answer)| answer.clone())
      .collect()
  );
  let accordion =
    Rc::new(RefCell::new(Accordion::new()));
  for answer in answers.iter() {
    set_answer(answer, false);
    dom::set_styles(
      answer,
      &[(
        "transition",
        "opacity 0.3s ease, max-height 0.3s \
         ease"
      )]
    );
  }

  for (index, (question, _)) in
    items.iter().enumerate()
  {
    dom::set_styles(
      question,
      &[("cursor", "pointer")]
    );
    listen(
      listeners,
      "faq question",
      question,
      EventKind::Click,
      {
        let answers = answers.clone();
        let accordion = accordion.clone();
        move |_| {
          let open =
            accordion.borrow_mut().toggle(index);
          for (i, answer) in
            answers.iter().enumerate()
          {
            set_answer(answer, open == Some(i));
          }
        }
      }
    );
  }
}

fn mark_required(
  document: &Document,
  form: &Element
) {
  for label in dom::query_all_in(form, "label")
  {
    let required = label
      .get_attribute("for")
      .and_then(|id| {
        document.get_element_by_id(&id)
      })
      .is_some_and(|input| {
        input.has_attribute("required")
      });
    if !required {
      continue;
    }
    if let Some(marker) =
      dom::create(document, "span", "")
    {
      marker.set_text_content(Some(" *"));
      dom::set_styles(
        &marker,
        &[("color", ERROR_BORDER)]
      );
      let _ = label.append_child(&marker);
    }
  }
}

/// Inserts the progress bar as the form's
/// first child and returns its fill.
fn insert_progress(
  document: &Document,
  form: &Element
) -> Option<Element> {
  let bar = dom::create(
    document,
    "div",
    "form-progress w-full bg-gray-200 \
     rounded-full h-2 mb-4"
  )?;
  let fill = dom::create(
    document,
    "div",
    "progress-fill bg-purple-600 h-2 \
     rounded-full transition-all \
     duration-300"
  )?;
  dom::set_styles(&fill, &[("width", "0%")]);
  bar.append_child(&fill).ok()?;
  form
    .insert_before(
      &bar,
      form.first_child().as_ref()
    )
    .ok()?;
  Some(fill)
}

fn animate_cards(
  document: &Document,
  cfg: &ContactConfig
) {
  let cards =
    dom::query_all(document, &cfg.card_selector);
  for (index, card) in
    cards.into_iter().enumerate()
  {
    dom::set_styles(
      &card,
      &[
        ("opacity", "0"),
        ("transform", "translateY(30px)")
      ]
    );
    let delay = u32::try_from(index)
      .unwrap_or(u32::MAX)
      .saturating_mul(cfg.card_stagger_ms);
    Timeout::new(delay, move || {
      if card.is_connected() {
        dom::set_styles(
          &card,
          &[
            (
              "transition",
              "opacity 0.6s ease-out, \
               transform 0.6s ease-out"
            ),
            ("opacity", "1"),
            ("transform", "translateY(0)")
          ]
        );
      }
    })
    .forget();
  }
}
