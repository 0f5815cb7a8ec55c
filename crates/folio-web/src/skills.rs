use std::cell::RefCell;
use std::rc::Rc;

use folio_core::bindings::EventKind;
use folio_core::config::SkillsConfig;
use folio_core::filter::{
  ALL_CATEGORIES,
  CardRecord,
  parse_categories
};
use folio_core::gallery::heading_categories;
use folio_core::overlay::OverlayContent;
use folio_core::skills::{
  Proficiency,
  tooltip_position,
  tooltip_text
};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlElement
};

use crate::bindings::{
  Listeners,
  listen
};
use crate::board::{
  self,
  FilterBoard
};
use crate::dom;
use crate::observe::{
  self,
  Watch
};
use crate::overlay::{
  self,
  SKILL_LAYOUT,
  SharedOverlay
};

const BUTTON_CLASS: &str =
  "category-btn px-4 py-2 rounded-lg border-2 \
   border-purple-600 text-purple-600 \
   hover:bg-purple-600 hover:text-white \
   transition-all duration-300";

type TooltipSlot = Rc<RefCell<Option<Element>>>;

/// Skills page: generated category buttons,
/// search, proficiency styling, tooltips,
/// progress bars and reveal animations.
pub struct SkillsController {
  _board:     Rc<FilterBoard>,
  _overlay:   SharedOverlay,
  _watches:   Vec<Watch>,
  _tooltip:   TooltipSlot,
  _listeners: Listeners
}

/// Level text, skill name and description
/// of one skill card.
struct SkillCard {
  name:        String,
  level:       String,
  description: String
}

impl SkillCard {
  fn read(card: &Element) -> Self {
    let level = dom::query_in(card, "p")
      .map(|p| {
        dom::text_of(&p).trim().to_string()
      })
      .unwrap_or_default();
    let name = dom::text_in(card, "h4");
    let description =
      dom::text_in(card, "p:last-child");
    Self {
      name: name.trim().to_string(),
      level,
      description: description
        .trim()
        .to_string()
    }
  }
}

fn section_of(
  sections: &[Element],
  card: &Element
) -> Option<usize> {
  sections.iter().position(|section| {
    section.contains(Some(card.as_ref()))
  })
}

/// Creates "All Skills" plus one button per
/// category and inserts the row before
/// `anchor`.
fn insert_buttons(
  document: &Document,
  anchor: &Element,
  categories: &[String]
) -> Vec<Element> {
  let Some(row) = dom::create(
    document,
    "div",
    "flex flex-wrap justify-center gap-4 \
     mb-8"
  ) else {
    return Vec::new();
  };

  let all = (
    "All Skills".to_string(),
    ALL_CATEGORIES.to_string()
  );
  let labels = std::iter::once(all).chain(
    categories
      .iter()
      .map(|c| (c.clone(), c.to_lowercase()))
  );
  let mut buttons = Vec::new();
  for (label, category) in labels {
    let Some(button) = dom::create(
      document,
      "button",
      BUTTON_CLASS
    ) else {
      continue;
    };
    button.set_text_content(Some(&label));
    let _ = button.set_attribute("type", "button");
    let _ = button
      .set_attribute("data-category", &category);
    if category == ALL_CATEGORIES {
      dom::set_class(&button, "active", true);
    }
    if row.append_child(&button).is_ok() {
      buttons.push(button);
    }
  }

  let inserted =
    anchor.parent_node().is_some_and(|parent| {
      parent
        .insert_before(&row, Some(anchor.as_ref()))
        .is_ok()
    });
  if inserted {
    buttons
  } else {
    tracing::debug!(
      "could not place skill category buttons"
    );
    Vec::new()
  }
}

fn style_level(
  document: &Document,
  card: &Element
) {
  let Some(level_el) = dom::query_in(card, "p")
  else {
    return;
  };
  let Some(level) =
    Proficiency::parse(&dom::text_of(&level_el))
  else {
    return;
  };
  dom::set_styles(
    &level_el,
    &[
      ("color", level.color()),
      ("font-weight", "600")
    ]
  );
  if let Some(dot) = dom::create(
    document,
    "span",
    "inline-block w-2 h-2 rounded-full ml-2"
  ) {
    dom::set_styles(
      &dot,
      &[("background-color", level.color())]
    );
    let _ = level_el.append_child(&dot);
  }
}

fn show_tooltip(
  slot: &TooltipSlot,
  anchor: &Element,
  text: &str
) {
  hide_tooltip(slot);
  let Some(document) = dom::document() else {
    return;
  };
  let Some(tip) = dom::create(
    &document,
    "div",
    "skill-tooltip absolute bg-gray-900 \
     text-white px-3 py-2 rounded-lg text-sm \
     z-50"
  ) else {
    return;
  };
  tip.set_text_content(Some(text));
  if !dom::append_to_body(&document, &tip) {
    return;
  }

  let (tip_width, tip_height) = tip
    .dyn_ref::<HtmlElement>()
    .map(|html| {
      (
        f64::from(html.offset_width()),
        f64::from(html.offset_height())
      )
    })
    .unwrap_or_default();
  let (scroll_x, scroll_y) = web_sys::window()
    .map(|window| {
      (
        window.scroll_x().unwrap_or_default(),
        window.scroll_y().unwrap_or_default()
      )
    })
    .unwrap_or_default();
  let rect = anchor.get_bounding_client_rect();
  let (left, top) = tooltip_position(
    rect.left(),
    rect.top(),
    rect.width(),
    tip_width,
    tip_height
  );
  dom::set_styles(
    &tip,
    &[
      ("left", &format!("{}px", left + scroll_x)),
      ("top", &format!("{}px", top + scroll_y))
    ]
  );
  *slot.borrow_mut() = Some(tip);
}

fn hide_tooltip(slot: &TooltipSlot) {
  if let Some(tip) = slot.borrow_mut().take() {
    tip.remove();
  }
}

/// Remembers each bar's width, empties it,
/// and grows it back once it is far
/// enough into view.
fn animate_progress(
  bars: Vec<Element>,
  cfg: &SkillsConfig
) -> Option<Watch> {
  let delay_ms = cfg.progress_delay_ms;
  let widths: Vec<String> = bars
    .iter()
    .map(|bar| dom::style_value(bar, "width"))
    .collect();
  let elements = bars.clone();
  observe::once(
    "progress bars",
    bars,
    cfg.progress_threshold,
    &cfg.progress_root_margin,
    move |bar| {
      let Some(index) =
        elements.iter().position(|el| el == bar)
      else {
        return;
      };
      let width = widths
        .get(index)
        .cloned()
        .unwrap_or_default();
      dom::set_styles(bar, &[("width", "0%")]);
      let bar = bar.clone();
      Timeout::new(delay_ms, move || {
        if bar.is_connected() {
          dom::set_styles(
            &bar,
            &[("width", &width)]
          );
        }
      })
      .forget();
    }
  )
}

/// Groups cards under the headed sections
/// that contain them and builds one
/// filter record per card.
fn card_records(
  cards: &[Element],
  details: &[SkillCard],
  sections: &[Element]
) -> (Vec<CardRecord>, Vec<Vec<usize>>) {
  let mut members: Vec<Vec<usize>> =
    vec![Vec::new(); sections.len()];
  let records = cards
    .iter()
    .zip(details)
    .enumerate()
    .map(|(index, (card, skill))| {
      let section = section_of(sections, card);
      if let Some(list) =
        section.and_then(|s| members.get_mut(s))
      {
        list.push(index);
      }
      let categories =
        match card.get_attribute("data-category") {
          | Some(raw) => parse_categories(&raw),
          | None => section
            .and_then(|s| sections.get(s))
            .map(|s| {
              heading_categories(
                &dom::text_in(s, "h3")
              )
            })
            .unwrap_or_default()
        };
      CardRecord::new(
        skill.name.clone(),
        skill.description.clone()
      )
      .with_tags([skill.level.clone()])
      .with_categories(categories)
    })
    .collect();
  (records, members)
}

impl SkillsController {
  pub fn attach(
    document: &Document,
    cfg: &SkillsConfig
  ) -> Option<Self> {
    let cards =
      dom::query_all(document, &cfg.card_selector);
    if cards.is_empty() {
      tracing::debug!(
        selector = %cfg.card_selector,
        "no skill cards on page"
      );
      return None;
    }

    let sections: Vec<Element> =
      dom::query_all(document, &cfg.section_selector)
        .into_iter()
        .filter(|section| {
          dom::query_in(section, "h3").is_some()
            && dom::query_in(
              section,
              &cfg.card_selector
            )
            .is_some()
        })
        .collect();
    let details: Vec<SkillCard> =
      cards.iter().map(SkillCard::read).collect();
    let (records, members) =
      card_records(&cards, &details, &sections);

    let buttons = dom::query(
      document,
      &cfg.button_anchor_selector
    )
    .map(|anchor| {
      insert_buttons(
        document,
        &anchor,
        &cfg.categories
      )
    })
    .unwrap_or_default();
    let board = Rc::new(
      FilterBoard::new(
        cards.clone(),
        records,
        buttons,
        "data-category"
      )
      .with_sections(
        sections.into_iter().zip(members).collect()
      )
    );

    let mut listeners = Listeners::new();
    board::bind_buttons(&mut listeners, &board);
    board::bind_arrows(
      &mut listeners,
      document,
      &board
    );

    if let Some(overview) =
      dom::query(document, &cfg.overview_selector)
      && let Some(parent) = overview.parent_node()
      && let Some(input) = board::search_input(
        document,
        &cfg.search_placeholder
      )
      && parent
        .insert_before(&input, Some(overview.as_ref()))
        .is_ok()
    {
      board::bind_search(
        &mut listeners,
        &board,
        &input
      );
    }

    let slot = overlay::shared_slot();
    let tooltip: TooltipSlot =
      Rc::new(RefCell::new(None));
    for (card, skill) in cards.iter().zip(details)
    {
      style_level(document, card);
      bind_card(
        &mut listeners,
        card,
        &slot,
        &tooltip,
        &cfg.progress_selector,
        skill
      );
    }

    let mut watches = Vec::new();
    watches.extend(animate_progress(
      dom::query_all(document, &cfg.progress_selector),
      cfg
    ));
    watches.extend(observe::reveal(
      "skill cards",
      cards.clone(),
      &cfg.reveal
    ));
    watches.extend(observe::reveal(
      "certification cards",
      dom::query_all(
        document,
        &cfg.certification_selector
      ),
      &cfg.certification_reveal
    ));

    tracing::info!(
      cards = cards.len(),
      filters = board.filters().len(),
      listeners = listeners.len(),
      "skills controller attached"
    );
    Some(Self {
      _board:     board,
      _overlay:   slot,
      _watches:   watches,
      _tooltip:   tooltip,
      _listeners: listeners
    })
  }
}

fn bind_card(
  listeners: &mut Listeners,
  card: &Element,
  slot: &SharedOverlay,
  tooltip: &TooltipSlot,
  progress_selector: &str,
  skill: SkillCard
) {
  listen(
    listeners,
    "skill card",
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
              "translateY(-5px) scale(1.02)"
            ),
            (
              "box-shadow",
              "0 15px 35px rgba(0, 0, 0, 0.1)"
            )
          ]
        );
      }
    }
  );
  listen(
    listeners,
    "skill card",
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
              "0 5px 15px rgba(0, 0, 0, 0.1)"
            )
          ]
        );
      }
    }
  );

  if let Some(bar) =
    dom::query_in(card, progress_selector)
  {
    let text =
      tooltip_text(&skill.name, &skill.level);
    listen(
      listeners,
      "progress bar",
      &bar,
      EventKind::MouseEnter,
      {
        let tooltip = tooltip.clone();
        let bar_el = bar.clone();
        move |_| {
          show_tooltip(&tooltip, &bar_el, &text)
        }
      }
    );
    listen(
      listeners,
      "progress bar",
      &bar,
      EventKind::MouseLeave,
      {
        let tooltip = tooltip.clone();
        move |_| hide_tooltip(&tooltip)
      }
    );
  }

  let content = OverlayContent {
    title:       skill.name,
    description: skill.description,
    tags:        vec![skill.level]
  };
  listen(
    listeners,
    "skill card",
    card,
    EventKind::Click,
    {
      let slot = slot.clone();
      move |_| {
        overlay::open(
          &slot,
          content.clone(),
          SKILL_LAYOUT
        )
      }
    }
  );
}
