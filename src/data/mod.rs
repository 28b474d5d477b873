//! Core data models for memegen
//!
//! This module contains the meme template types shared by the catalog cache,
//! the name matcher and the imgflip API clients.

pub mod caption;
pub mod memes;

pub use caption::{CaptionClient, CaptionError};
pub use memes::{FetchError, MemesClient};

use serde::{Deserialize, Serialize};

use crate::matcher;

/// A meme template as published by imgflip
///
/// Field names follow the remote API (`id`, `name`, ...). The capitalized
/// aliases keep older cache files readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Opaque identifier assigned by imgflip, used as `template_id`
    #[serde(alias = "Id")]
    pub id: String,
    /// Human-readable display name
    #[serde(alias = "Name")]
    pub name: String,
    /// URL of the blank template image
    #[serde(alias = "URL")]
    pub url: String,
    /// Image width in pixels
    #[serde(alias = "Width", default)]
    pub width: u32,
    /// Image height in pixels
    #[serde(alias = "Height", default)]
    pub height: u32,
}

/// Ordered list of templates, in the order the remote API returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Template>);

impl Catalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self(templates)
    }

    pub fn templates(&self) -> &[Template] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first template whose short name contains `needle`
    pub fn choose(&self, needle: &str) -> Option<&Template> {
        matcher::choose(&self.0, needle)
    }
}
