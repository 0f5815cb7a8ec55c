use std::cell::RefCell;
use std::rc::Rc;

use folio_core::bindings::EventKind;
use folio_core::filter::CardRecord;
use folio_core::gallery::Gallery;
use folio_core::keynav::{
  Arrow,
  FilterCursor
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  KeyboardEvent
};

use crate::bindings::{
  Listeners,
  listen,
  listen_active
};
use crate::dom;

const SEARCH_INPUT_CLASS: &str =
  "w-full max-w-md mx-auto mb-8 px-4 py-2 \
   border border-gray-300 rounded-lg \
   focus:outline-none focus:border-purple-600 \
   transition-colors duration-300";

/// A filterable card grid: the cards, the
/// category buttons that drive it and,
/// optionally, sections that are hidden
/// when none of their cards are visible.
pub struct FilterBoard {
  gallery:   RefCell<Gallery>,
  cards:     Vec<Element>,
  buttons:   Vec<Element>,
  filters:   Vec<String>,
  sections:  Vec<(Element, Vec<usize>)>,
  cursor:    RefCell<FilterCursor>,
  animation: &'static str
}

impl FilterBoard {
  pub fn new(
    cards: Vec<Element>,
    records: Vec<CardRecord>,
    buttons: Vec<Element>,
    filter_attr: &str
  ) -> Self {
    let filters = buttons
      .iter()
      .map(|button| {
        button
          .get_attribute(filter_attr)
          .unwrap_or_default()
          .to_lowercase()
      })
      .collect();
    let cursor =
      FilterCursor::new(buttons.len());
    Self {
      gallery: RefCell::new(Gallery::new(
        records
      )),
      cards,
      buttons,
      filters,
      sections: Vec::new(),
      cursor: RefCell::new(cursor),
      animation: "fadeIn 0.6s ease-in-out"
    }
  }

  pub fn with_sections(
    mut self,
    sections: Vec<(Element, Vec<usize>)>
  ) -> Self {
    self.sections = sections;
    self
  }

  pub fn filters(&self) -> &[String] {
    &self.filters
  }

  pub fn buttons(&self) -> &[Element] {
    &self.buttons
  }

  pub fn record(
    &self,
    index: usize
  ) -> Option<CardRecord> {
    self.gallery.borrow().card(index).cloned()
  }

  fn apply(&self, visibility: &[bool]) {
    for (card, visible) in
      self.cards.iter().zip(visibility)
    {
      dom::set_visible(
        card,
        *visible,
        self.animation
      );
    }
    for (section, members) in &self.sections {
      let any = members.iter().any(|i| {
        visibility
          .get(*i)
          .copied()
          .unwrap_or(false)
      });
      dom::set_visible(
        section,
        any,
        self.animation
      );
    }
  }

  /// Activates button `index` and filters
  /// by its category.
  pub fn select(&self, index: usize) {
    let Some(category) = self.filters.get(index)
    else {
      return;
    };
    for (i, button) in
      self.buttons.iter().enumerate()
    {
      dom::set_class(
        button,
        "active",
        i == index
      );
    }
    self.cursor.borrow_mut().sync(index);
    let visibility = self
      .gallery
      .borrow_mut()
      .select_category(category);
    self.apply(&visibility);
  }

  pub fn search(&self, query: &str) {
    let visibility =
      self.gallery.borrow_mut().set_query(query);
    self.apply(&visibility);
  }

  /// Moves the keyboard cursor and activates
  /// the button under it the way a click
  /// would.
  fn step(&self, arrow: Arrow) {
    let next = self.cursor.borrow_mut().step(arrow);
    if let Some(button) =
      next.and_then(|i| self.buttons.get(i))
    {
      dom::click(button);
      dom::focus(button);
    }
  }
}

pub fn bind_buttons(
  listeners: &mut Listeners,
  board: &Rc<FilterBoard>
) {
  for (index, button) in
    board.buttons.iter().enumerate()
  {
    listen(
      listeners,
      "filter button",
      button,
      EventKind::Click,
      {
        let board = board.clone();
        move |_| board.select(index)
      }
    );
  }
}

pub fn bind_focus_outline(
  listeners: &mut Listeners,
  board: &FilterBoard
) {
  for button in &board.buttons {
    listen(
      listeners,
      "filter button",
      button,
      EventKind::Focus,
      {
        let button = button.clone();
        move |_| {
          dom::set_styles(
            &button,
            &[
              ("outline", "2px solid #667eea"),
              ("outline-offset", "2px")
            ]
          );
        }
      }
    );
    listen(
      listeners,
      "filter button",
      button,
      EventKind::Blur,
      {
        let button = button.clone();
        move |_| {
          dom::set_styles(
            &button,
            &[("outline", "none")]
          )
        }
      }
    );
  }
}

/// A fresh search box; the caller decides
/// where it goes.
pub fn search_input(
  document: &Document,
  placeholder: &str
) -> Option<Element> {
  let input = dom::create(
    document,
    "input",
    SEARCH_INPUT_CLASS
  )?;
  input.set_attribute("type", "text").ok()?;
  input
    .set_attribute("placeholder", placeholder)
    .ok()?;
  Some(input)
}

pub fn bind_search(
  listeners: &mut Listeners,
  board: &Rc<FilterBoard>,
  input: &Element
) {
  listen(
    listeners,
    "search input",
    input,
    EventKind::Input,
    {
      let board = board.clone();
      let input = input.clone();
      move |_| {
        board.search(&dom::input_value(&input))
      }
    }
  );
}

fn is_typing(target: Option<Element>) -> bool {
  target.is_some_and(|el| {
    let tag = el.tag_name();
    tag.eq_ignore_ascii_case("input")
      || tag.eq_ignore_ascii_case("textarea")
  })
}

/// Left and right arrows walk the filter
/// buttons, except while typing.
pub fn bind_arrows(
  listeners: &mut Listeners,
  document: &Document,
  board: &Rc<FilterBoard>
) {
  if board.buttons.is_empty() {
    return;
  }
  listen_active(
    listeners,
    "document",
    document,
    EventKind::KeyDown,
    {
      let board = board.clone();
      move |event| {
        let Some(arrow) = event
          .dyn_ref::<KeyboardEvent>()
          .and_then(|key| {
            Arrow::from_key(&key.key())
          })
        else {
          return;
        };
        if is_typing(dom::event_target(event)) {
          return;
        }
        event.prevent_default();
        board.step(arrow);
      }
    }
  );
}

/// Text of every `selector` match under
/// `card`, trimmed.
pub fn texts_in(
  card: &Element,
  selector: &str
) -> Vec<String> {
  dom::query_all_in(card, selector)
    .iter()
    .map(|el| dom::text_of(el).trim().to_string())
    .collect()
}
