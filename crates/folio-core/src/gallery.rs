use tracing::debug;

use crate::filter::{
  CardRecord,
  FilterState
};

/// The card set of a filterable page plus
/// its filter state. Visibility is always
/// recomputed for the whole set.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
  cards:  Vec<CardRecord>,
  filter: FilterState
}

impl Gallery {
  pub fn new(cards: Vec<CardRecord>) -> Self {
    Self {
      cards,
      filter: FilterState::default()
    }
  }

  pub fn cards(&self) -> &[CardRecord] {
    &self.cards
  }

  pub fn filter(&self) -> &FilterState {
    &self.filter
  }

  pub fn card(
    &self,
    index: usize
  ) -> Option<&CardRecord> {
    self.cards.get(index)
  }

  pub fn select_category(
    &mut self,
    category: &str
  ) -> Vec<bool> {
    self.filter.set_category(category);
    debug!(
      category = self.filter.category(),
      visible = self.visible_count(),
      "selected category"
    );
    self.visibility()
  }

  pub fn set_query(
    &mut self,
    query: &str
  ) -> Vec<bool> {
    self.filter.set_query(query);
    debug!(
      query = self.filter.query(),
      visible = self.visible_count(),
      "updated search query"
    );
    self.visibility()
  }

  pub fn visibility(&self) -> Vec<bool> {
    self
      .cards
      .iter()
      .map(|card| self.filter.matches(card))
      .collect()
  }

  pub fn visible_count(&self) -> usize {
    self
      .visibility()
      .into_iter()
      .filter(|visible| *visible)
      .count()
  }
}

/// The category a clicked tag badge
/// stands for.
pub fn badge_category(text: &str) -> String {
  text.trim().to_lowercase()
}

/// Index of the filter button whose
/// `data-filter` matches `category`.
pub fn button_for_category(
  filters: &[String],
  category: &str
) -> Option<usize> {
  filters
    .iter()
    .position(|filter| filter == category)
}

/// Categories for a card inside a section
/// headed `heading`, e.g. "Frontend
/// Development" gives `frontend` and
/// `development`.
pub fn heading_categories(
  heading: &str
) -> Vec<String> {
  heading
    .split(|c: char| {
      !c.is_alphanumeric()
    })
    .filter(|word| !word.is_empty())
    .map(str::to_lowercase)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gallery() -> Gallery {
    Gallery::new(vec![
      CardRecord::new("Shop", "Storefront")
        .with_tags(["React"])
        .with_categories(["web"]),
      CardRecord::new("Tracker", "GPS app")
        .with_tags(["Swift"])
        .with_categories(["mobile"]),
      CardRecord::new("Dashboard", "Charts")
        .with_tags(["React", "D3"])
        .with_categories(["web", "data"]),
    ])
  }

  #[test]
  fn category_then_query_narrows() {
    let mut gallery = gallery();
    assert_eq!(
      gallery.select_category("web"),
      vec![true, false, true]
    );
    assert_eq!(
      gallery.set_query("chart"),
      vec![false, false, true]
    );
    assert_eq!(
      gallery.select_category("all"),
      vec![false, false, true]
    );
    assert_eq!(
      gallery.set_query(""),
      vec![true, true, true]
    );
    assert_eq!(gallery.visible_count(), 3);
  }

  #[test]
  fn badges_resolve_to_buttons() {
    let filters: Vec<String> =
      ["all", "web", "react"]
        .into_iter()
        .map(String::from)
        .collect();
    let category = badge_category(" React ");
    assert_eq!(category, "react");
    assert_eq!(
      button_for_category(&filters, &category),
      Some(2)
    );
    assert_eq!(
      button_for_category(&filters, "swift"),
      None
    );
  }

  #[test]
  fn heading_words_become_categories() {
    assert_eq!(
      heading_categories(
        "Frontend Development"
      ),
      vec!["frontend", "development"]
    );
    assert_eq!(
      heading_categories("Tools & DevOps"),
      vec!["tools", "devops"]
    );
  }
}
