use std::cell::RefCell;
use std::rc::Rc;

use folio_core::bindings::EventKind;
use folio_core::config::ProjectsConfig;
use folio_core::filter::{
  CardRecord,
  parse_categories
};
use folio_core::gallery::{
  badge_category,
  button_for_category
};
use folio_core::overlay::OverlayContent;
use web_sys::{
  Document,
  Element
};

use crate::bindings::{
  Listeners,
  listen,
  listen_active
};
use crate::board::{
  self,
  FilterBoard
};
use crate::counter::{
  self,
  CounterRun
};
use crate::dom;
use crate::observe::{
  self,
  Watch
};
use crate::overlay::{
  self,
  PROJECT_LAYOUT,
  SharedOverlay
};

/// Projects page: category buttons,
/// search, card reveal, detail overlay
/// and the stats counters.
pub struct ProjectsController {
  _board:     Rc<FilterBoard>,
  _overlay:   SharedOverlay,
  _reveal:    Option<Watch>,
  _stats:     Option<Watch>,
  _counters:  Rc<RefCell<Vec<CounterRun>>>,
  _listeners: Listeners
}

fn record_for(
  card: &Element,
  tag_selector: &str
) -> CardRecord {
  CardRecord::new(
    dom::text_in(card, "h3").trim(),
    dom::text_in(card, "p").trim()
  )
  .with_tags(board::texts_in(card, tag_selector))
  .with_categories(parse_categories(
    &card
      .get_attribute("data-category")
      .unwrap_or_default()
  ))
}

fn show_details(
  slot: &SharedOverlay,
  board: &FilterBoard,
  index: usize
) {
  if let Some(record) = board.record(index) {
    overlay::open(
      slot,
      OverlayContent {
        title:       record.title,
        description: record.description,
        tags:        record.tags
      },
      PROJECT_LAYOUT
    );
  }
}

impl ProjectsController {
  pub fn attach(
    document: &Document,
    cfg: &ProjectsConfig
  ) -> Option<Self> {
    let cards =
      dom::query_all(document, &cfg.card_selector);
    if cards.is_empty() {
      tracing::debug!(
        selector = %cfg.card_selector,
        "no project cards on page"
      );
      return None;
    }

    let records = cards
      .iter()
      .map(|card| {
        record_for(card, &cfg.tag_selector)
      })
      .collect();
    let buttons = dom::query_all(
      document,
      &cfg.filter_button_selector
    );
    let board = Rc::new(FilterBoard::new(
      cards.clone(),
      records,
      buttons,
      "data-filter"
    ));
    let slot = overlay::shared_slot();
    let mut listeners = Listeners::new();

    board::bind_buttons(&mut listeners, &board);
    board::bind_focus_outline(
      &mut listeners,
      &board
    );
    board::bind_arrows(
      &mut listeners,
      document,
      &board
    );

    if let Some(section) = dom::query(
      document,
      &cfg.filter_section_selector
    ) && let Some(input) = board::search_input(
      document,
      &cfg.search_placeholder
    ) && section.append_child(&input).is_ok()
    {
      board::bind_search(
        &mut listeners,
        &board,
        &input
      );
    }

    for (index, card) in cards.iter().enumerate()
    {
      bind_card(
        &mut listeners,
        &board,
        &slot,
        cfg,
        index,
        card
      );
    }

    let reveal = observe::reveal(
      "project cards",
      cards.clone(),
      &cfg.reveal
    );
    let counters = Rc::new(RefCell::new(Vec::new()));
    let stats =
      dom::query(document, &cfg.stats_selector)
        .and_then(|section| {
          watch_stats(cfg, section, &counters)
        });

    tracing::info!(
      cards = cards.len(),
      filters = board.filters().len(),
      listeners = listeners.len(),
      "projects controller attached"
    );
    Some(Self {
      _board:     board,
      _overlay:   slot,
      _reveal:    reveal,
      _stats:     stats,
      _counters:  counters,
      _listeners: listeners
    })
  }
}

/// Starts every stat counter in `section`
/// once it is far enough into view.
fn watch_stats(
  cfg: &ProjectsConfig,
  section: Element,
  counters: &Rc<RefCell<Vec<CounterRun>>>
) -> Option<Watch> {
  let counters = counters.clone();
  let selector = cfg.counter_selector.clone();
  let duration_ms = cfg.counter_duration_ms;
  observe::once(
    "project stats",
    vec![section],
    cfg.counter_threshold,
    "0px",
    move |section| {
      let runs = dom::query_all_in(
        section, &selector
      )
      .iter()
      .filter_map(|el| {
        counter::start(el, duration_ms)
      })
      .collect::<Vec<_>>();
      counters.borrow_mut().extend(runs);
    }
  )
}

fn bind_card(
  listeners: &mut Listeners,
  board: &Rc<FilterBoard>,
  slot: &SharedOverlay,
  cfg: &ProjectsConfig,
  index: usize,
  card: &Element
) {
  listen(
    listeners,
    "project card",
    card,
    EventKind::MouseEnter,
    {
      let card = card.clone();
      move |_| {
        dom::set_styles(
          &card,
          &[
            (
              "transform",
              "translateY(-10px) scale(1.02)"
            ),
            (
              "box-shadow",
              "0 20px 40px rgba(0, 0, 0, 0.1)"
            )
          ]
        );
      }
    }
  );
  listen(
    listeners,
    "project card",
    card,
    EventKind::MouseLeave,
    {
      let card = card.clone();
      move |_| {
        dom::set_styles(
          &card,
          &[
            (
              "transform",
              "translateY(0) scale(1)"
            ),
            (
              "box-shadow",
              "0 10px 30px rgba(0, 0, 0, 0.1)"
            )
          ]
        );
      }
    }
  );

  listen(
    listeners,
    "project card",
    card,
    EventKind::Click,
    {
      let board = board.clone();
      let slot = slot.clone();
      move |event| {
        let in_link = dom::event_target(event)
          .and_then(|target| {
            target.closest("a").ok().flatten()
          })
          .is_some();
        if !in_link {
          show_details(&slot, &board, index);
        }
      }
    }
  );

  for link in
    dom::query_all_in(card, "a[href=\"#\"]")
  {
    listen_active(
      listeners,
      "project link",
      &link,
      EventKind::Click,
      {
        let board = board.clone();
        let slot = slot.clone();
        move |event| {
          event.prevent_default();
          show_details(&slot, &board, index);
        }
      }
    );
  }

  for badge in
    dom::query_all_in(card, &cfg.tag_selector)
  {
    listen(
      listeners,
      "tag badge",
      &badge,
      EventKind::Click,
      {
        let board = board.clone();
        let badge_el = badge.clone();
        move |event| {
          event.stop_propagation();
          select_badge(&board, &badge_el);
        }
      }
    );
  }
}

/// Clicks the filter button matching a
/// tag badge, as if the user had.
fn select_badge(
  board: &FilterBoard,
  badge: &Element
) {
  let category =
    badge_category(&dom::text_of(badge));
  match button_for_category(
    board.filters(),
    &category
  ) {
    | Some(i) => {
      if let Some(button) = board.buttons().get(i)
      {
        dom::click(button);
      }
    }
    | None => {
      tracing::debug!(
        %category,
        "no filter button for badge"
      );
    }
  }
}
