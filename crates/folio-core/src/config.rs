use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info
};

use crate::draft::DEFAULT_DRAFT_PREFIX;
use crate::reveal::{
  DEFAULT_ROOT_MARGIN,
  RevealConfig
};

/// Site behaviour settings. Every key has a
/// default so a page override only needs
/// the values it changes.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct FolioConfig {
  pub contact:       ContactConfig,
  pub projects:      ProjectsConfig,
  pub skills:        SkillsConfig,
  pub notifications: NotificationConfig
}

impl FolioConfig {
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: FolioConfig = toml::from_str(
      text
    )
    .context("failed to parse folio config")?;
    debug!(
      endpoint = ?cfg.contact.endpoint,
      "parsed folio config"
    );
    Ok(cfg)
  }

  /// Parses `base`, then applies an
  /// optional page-level override table on
  /// top of it key by key.
  pub fn layered(
    base: &str,
    page_override: Option<&str>
  ) -> anyhow::Result<Self> {
    let mut merged: toml::Table =
      toml::from_str(base).context(
        "failed to parse embedded folio \
         config"
      )?;
    if let Some(raw) = page_override {
      let overlay: toml::Table =
        toml::from_str(raw).context(
          "failed to parse page folio \
           config"
        )?;
      merge_tables(&mut merged, overlay);
      info!("applied page config override");
    }
    let cfg: FolioConfig =
      toml::Value::Table(merged)
        .try_into()
      .context("invalid folio config")?;
    Ok(cfg)
  }
}

fn merge_tables(
  base: &mut toml::Table,
  overlay: toml::Table
) {
  for (key, value) in overlay {
    match (base.get_mut(&key), value) {
      | (
        Some(toml::Value::Table(existing)),
        toml::Value::Table(incoming)
      ) => {
        merge_tables(existing, incoming);
      }
      | (_, value) => {
        base.insert(key, value);
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[serde(default)]
pub struct ContactConfig {
  pub form_id:             String,
  pub storage_prefix:      String,
  /// When set, submissions are sent here;
  /// otherwise they are simulated.
  pub endpoint:            Option<String>,
  pub method:              String,
  pub timeout_ms:          u32,
  pub simulated_delay_ms:  u32,
  pub message_limit:       usize,
  pub card_stagger_ms:     u32,
  pub card_selector:       String,
  pub social_link_selector: String,
  pub faq_item_selector:   String,
  pub map_selector:        String,
  pub success_message:     String
}

impl Default for ContactConfig {
  fn default() -> Self {
    Self {
      form_id:             "contact-form"
        .to_string(),
      storage_prefix:      DEFAULT_DRAFT_PREFIX
        .to_string(),
      endpoint:            None,
      method:              "POST".to_string(),
      timeout_ms:          10_000,
      simulated_delay_ms:  2_000,
      message_limit:       500,
      card_stagger_ms:     200,
      card_selector:       ".contact-card"
        .to_string(),
      social_link_selector: ".flex.space-x-4 a"
        .to_string(),
      faq_item_selector:
        ".bg-white.p-6.rounded-2xl.shadow-sm"
          .to_string(),
      map_selector:
        ".bg-gray-200.rounded-2xl.h-96"
          .to_string(),
      success_message:
        "Message sent successfully! I'll get \
         back to you within 24 hours."
          .to_string()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[serde(default)]
pub struct ProjectsConfig {
  pub card_selector:        String,
  pub filter_button_selector: String,
  pub tag_selector:         String,
  pub filter_section_selector: String,
  pub stats_selector:       String,
  pub counter_selector:     String,
  pub search_placeholder:   String,
  pub reveal:               RevealConfig,
  pub counter_duration_ms:  u32,
  pub counter_threshold:    f64
}

impl Default for ProjectsConfig {
  fn default() -> Self {
    Self {
      card_selector:        ".project-card"
        .to_string(),
      filter_button_selector: ".filter-btn"
        .to_string(),
      tag_selector:         ".flex.flex-wrap.gap-2 span"
        .to_string(),
      filter_section_selector:
        ".text-center.mb-8".to_string(),
      stats_selector:       ".grid.md\\:grid-cols-4"
        .to_string(),
      counter_selector:     ".text-4xl"
        .to_string(),
      search_placeholder:   "Search projects..."
        .to_string(),
      reveal:               RevealConfig::default(),
      counter_duration_ms:  2_000,
      counter_threshold:    0.5
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[serde(default)]
pub struct SkillsConfig {
  pub card_selector:          String,
  pub section_selector:       String,
  /// Category buttons are inserted before
  /// the first match.
  pub button_anchor_selector: String,
  pub progress_selector:      String,
  pub certification_selector: String,
  pub overview_selector:      String,
  pub categories:             Vec<String>,
  pub search_placeholder:     String,
  pub reveal:                 RevealConfig,
  pub certification_reveal:   RevealConfig,
  pub progress_threshold:     f64,
  pub progress_root_margin:   String,
  pub progress_delay_ms:      u32
}

impl Default for SkillsConfig {
  fn default() -> Self {
    Self {
      card_selector:          ".skill-card"
        .to_string(),
      section_selector:       ".mb-16"
        .to_string(),
      button_anchor_selector:
        ".mb-16.animate-slide-in-left".to_string(),
      progress_selector:      ".progress-bar"
        .to_string(),
      certification_selector:
        ".bg-gray-50.p-6.rounded-2xl.text-center"
          .to_string(),
      overview_selector:      ".text-center.mb-16"
        .to_string(),
      categories:             [
        "Frontend", "Backend", "Database",
        "Tools"
      ]
      .into_iter()
      .map(String::from)
      .collect(),
      search_placeholder:     "Search skills..."
        .to_string(),
      reveal:                 RevealConfig {
        stagger_ms: 50,
        offset_px: 20,
        ..RevealConfig::default()
      },
      certification_reveal:   RevealConfig {
        threshold: 0.3,
        root_margin: "0px".to_string(),
        stagger_ms: 200,
        duration_ms: 800,
        offset_px: 30,
        scale: 0.9
      },
      progress_threshold:     0.5,
      progress_root_margin:
        DEFAULT_ROOT_MARGIN.to_string(),
      progress_delay_ms:      100
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[serde(default)]
pub struct NotificationConfig {
  pub dismiss_ms: u32
}

impl Default for NotificationConfig {
  fn default() -> Self {
    Self {
      dismiss_ms: 5_000
    }
  }
}
