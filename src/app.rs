//! Application dispatch for memegen
//!
//! Wires the catalog store, name matcher and caption client together and
//! renders each invocation's output.

use std::io::{self, Write};

use thiserror::Error;

use crate::cache::{CatalogError, CatalogStore};
use crate::cli::{usage, Invocation};
use crate::config::Config;
use crate::data::{CaptionClient, CaptionError, Catalog, MemesClient};
use crate::matcher::short_name;

/// Errors surfaced to the user as a single `Error:` line
#[derive(Debug, Error)]
pub enum AppError {
    /// No template's short name contains the query
    #[error("No meme found")]
    NotFound,

    /// The HTTP client could not be constructed
    #[error("Failed to initialise HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Caption(#[from] CaptionError),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Main application holding the configured store and clients
#[derive(Debug, Clone)]
pub struct App {
    store: CatalogStore,
    captioner: CaptionClient,
}

impl App {
    /// Creates the application from configuration
    ///
    /// Both API clients share one HTTP client carrying the configured timeouts.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http_client = config.http_client().map_err(AppError::HttpClient)?;
        let memes = MemesClient::with_client(http_client.clone(), config.api_base.clone());
        let captioner = CaptionClient::with_client(http_client, config.api_base.clone());

        Ok(Self {
            store: CatalogStore::new(config.cache_file.clone(), memes),
            captioner,
        })
    }

    /// Runs one invocation, writing its result to `out`
    pub async fn run<W: Write>(&self, invocation: &Invocation, out: &mut W) -> Result<(), AppError> {
        match invocation {
            Invocation::Usage => {
                writeln!(out, "{}", usage())?;
            }
            Invocation::List => {
                let catalog = self.store.load().await?;
                write_catalog(out, &catalog)?;
                writeln!(out, "{}", usage())?;
            }
            Invocation::Show { meme } => {
                let catalog = self.store.load().await?;
                let template = catalog.choose(meme).ok_or(AppError::NotFound)?;
                writeln!(out, "{}\t{}", short_name(&template.name), template.url)?;
            }
            Invocation::Caption { meme, top, bottom } => {
                let catalog = self.store.load().await?;
                let template = catalog.choose(meme).ok_or(AppError::NotFound)?;
                let url = self.captioner.generate(template, top, bottom).await?;
                writeln!(out, "{}\t{}", short_name(&template.name), url)?;
            }
        }

        Ok(())
    }
}

/// Writes one `<short name> <url>` line per template, with the URL column aligned.
pub fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    let rows: Vec<(String, &str)> = catalog
        .iter()
        .map(|template| (short_name(&template.name), template.url.as_str()))
        .collect();
    let width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    for (name, url) in rows {
        writeln!(out, "{:<width$} {}", name, url, width = width)?;
    }

    Ok(())
}
