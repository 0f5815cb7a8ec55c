use tracing::trace;

pub const ALL_CATEGORIES: &str = "all";

/// The searchable view of one project or
/// skill card.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct CardRecord {
  pub title:       String,
  pub description: String,
  pub tags:        Vec<String>,
  pub categories:  Vec<String>
}

impl CardRecord {
  pub fn new(
    title: impl Into<String>,
    description: impl Into<String>
  ) -> Self {
    Self {
      title: title.into(),
      description: description.into(),
      ..Self::default()
    }
  }

  pub fn with_tags<I, T>(
    mut self,
    tags: I
  ) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>
  {
    self.tags =
      tags.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_categories<I, T>(
    mut self,
    categories: I
  ) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>
  {
    self.categories = categories
      .into_iter()
      .map(Into::into)
      .collect();
    self
  }

  /// Title, description and tags joined by
  /// spaces.
  pub fn search_text(&self) -> String {
    let mut text = String::with_capacity(
      self.title.len()
        + self.description.len()
        + 16
    );
    text.push_str(&self.title);
    text.push(' ');
    text.push_str(&self.description);
    for tag in &self.tags {
      text.push(' ');
      text.push_str(tag);
    }
    text
  }
}

/// Splits a `data-category` attribute
/// value into category ids.
pub fn parse_categories(
  raw: &str
) -> Vec<String> {
  raw
    .split_whitespace()
    .map(str::to_lowercase)
    .collect()
}

/// Active category plus active free-text
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
  category: String,
  query:    String
}

impl Default for FilterState {
  fn default() -> Self {
    Self {
      category: ALL_CATEGORIES.to_string(),
      query:    String::new()
    }
  }
}

impl FilterState {
  pub fn new(
    category: &str,
    query: &str
  ) -> Self {
    let mut state = Self::default();
    state.set_category(category);
    state.set_query(query);
    state
  }

  pub fn category(&self) -> &str {
    &self.category
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn set_category(
    &mut self,
    category: &str
  ) {
    let category = category.trim();
    self.category = if category.is_empty()
    {
      ALL_CATEGORIES.to_string()
    } else {
      category.to_lowercase()
    };
  }

  /// Stores the query lowercased; an all
  /// whitespace query counts as empty.
  pub fn set_query(&mut self, query: &str) {
    self.query = if query.trim().is_empty()
    {
      String::new()
    } else {
      query.to_lowercase()
    };
  }

  pub fn matches_category(
    &self,
    card: &CardRecord
  ) -> bool {
    self.category == ALL_CATEGORIES
      || card.categories.iter().any(
        |category| {
          category.eq_ignore_ascii_case(
            &self.category
          )
        }
      )
  }

  pub fn matches_query(
    &self,
    card: &CardRecord
  ) -> bool {
    self.query.is_empty()
      || card
        .search_text()
        .to_lowercase()
        .contains(&self.query)
  }

  /// Both filters apply together.
  pub fn matches(
    &self,
    card: &CardRecord
  ) -> bool {
    let visible = self
      .matches_category(card)
      && self.matches_query(card);
    trace!(
      title = %card.title,
      visible,
      "evaluated card filter"
    );
    visible
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn web_and_mobile() -> CardRecord {
    CardRecord::new(
      "Trail Tracker",
      "Offline maps for hikers"
    )
    .with_tags(["React Native", "Rust"])
    .with_categories(["web", "mobile"])
  }

  fn mobile_only() -> CardRecord {
    CardRecord::new(
      "Pocket Budget",
      "Expense tracking"
    )
    .with_tags(["Kotlin"])
    .with_categories(["mobile"])
  }

  #[test]
  fn category_membership() {
    let state = FilterState::new("web", "");
    assert!(state.matches(&web_and_mobile()));
    assert!(!state.matches(&mobile_only()));
  }

  #[test]
  fn all_shows_every_card() {
    let state = FilterState::default();
    assert_eq!(state.category(), "all");
    assert!(state.matches(&web_and_mobile()));
    assert!(state.matches(&mobile_only()));
  }

  #[test]
  fn query_is_case_insensitive_substring() {
    let state = FilterState::new("all", "OFFLINE");
    assert!(state.matches(&web_and_mobile()));
    assert!(!state.matches(&mobile_only()));

    let by_tag = FilterState::new("all", "kot");
    assert!(by_tag.matches(&mobile_only()));
  }

  #[test]
  fn category_and_query_combine() {
    let state =
      FilterState::new("mobile", "kotlin");
    assert!(state.matches(&mobile_only()));
    assert!(!state.matches(&web_and_mobile()));

    let none = FilterState::new("web", "kotlin");
    assert!(!none.matches(&mobile_only()));
    assert!(!none.matches(&web_and_mobile()));
  }

  #[test]
  fn predicate_holds_for_every_combination() {
    let cards = [web_and_mobile(), mobile_only()];
    for category in
      ["all", "web", "mobile", "desktop"]
    {
      for query in
        ["", "track", "RUST", "zzz"]
      {
        let state =
          FilterState::new(category, query);
        for card in &cards {
          let expected = (category == "all"
            || card
              .categories
              .iter()
              .any(|c| c == category))
            && (query.is_empty()
              || card
                .search_text()
                .to_lowercase()
                .contains(&query.to_lowercase()));
          assert_eq!(
            state.matches(card),
            expected,
            "category={category} query={query} card={}",
            card.title
          );
        }
      }
    }
  }

  #[test]
  fn categories_attribute_splits_on_whitespace()
  {
    assert_eq!(
      parse_categories(" Web  mobile "),
      vec!["web", "mobile"]
    );
    assert!(parse_categories("").is_empty());
  }

  #[test]
  fn search_text_concatenates_fields() {
    assert_eq!(
      mobile_only().search_text(),
      "Pocket Budget Expense tracking Kotlin"
    );
  }
}
