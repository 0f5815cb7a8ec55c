mod board;
mod bindings;
mod contact;
mod counter;
mod dom;
mod notify;
mod observe;
mod overlay;
mod projects;
mod skills;
mod storage;
mod submit;

use std::cell::RefCell;

use folio_core::config::FolioConfig;
use web_sys::Document;

use crate::contact::ContactController;
use crate::notify::Notifier;
use crate::projects::ProjectsController;
use crate::skills::SkillsController;

const EMBEDDED_CONFIG: &str =
  include_str!("../assets/folio.toml");
const PAGE_CONFIG_ID: &str = "folio-config";

/// Controllers attached to the current
/// page, kept alive for its lifetime.
#[derive(Default)]
struct Page {
  contact:  Option<ContactController>,
  projects: Option<ProjectsController>,
  skills:   Option<SkillsController>
}

thread_local! {
  static PAGE: RefCell<Page> =
    RefCell::new(Page::default());
}

fn load_config(document: &Document) -> FolioConfig {
  let page_override = document
    .get_element_by_id(PAGE_CONFIG_ID)
    .and_then(|script| script.text_content());
  match FolioConfig::layered(
    EMBEDDED_CONFIG,
    page_override.as_deref()
  ) {
    | Ok(cfg) => cfg,
    | Err(error) => {
      tracing::error!(
        error = format!("{error:#}"),
        "invalid folio config; using defaults"
      );
      FolioConfig::from_toml_str(EMBEDDED_CONFIG)
        .unwrap_or_default()
    }
  }
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(document) = dom::document() else {
    tracing::error!("no document; nothing to attach");
    return;
  };
  let cfg = load_config(&document);
  let notifier =
    Notifier::new(cfg.notifications.dismiss_ms);

  let page = Page {
    contact:  ContactController::attach(
      &document,
      &cfg.contact,
      notifier
    ),
    projects: ProjectsController::attach(
      &document,
      &cfg.projects
    ),
    skills:   SkillsController::attach(
      &document,
      &cfg.skills
    )
  };
  tracing::info!(
    contact = page.contact.is_some(),
    projects = page.projects.is_some(),
    skills = page.skills.is_some(),
    "folio page scripts loaded"
  );
  PAGE.with(|slot| *slot.borrow_mut() = page);
}
