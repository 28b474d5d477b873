//! Command-line interface parsing for memegen
//!
//! This module handles parsing of CLI arguments using clap. Positional
//! arguments are collected as-is and mapped to an [`Invocation`] by count:
//! `<MEME>`, then optional top and bottom caption text. Flags must come before
//! `<MEME>`; everything after it is taken verbatim, dashes included.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_API_BASE, DEFAULT_CACHE_FILE, DEFAULT_TIMEOUT_SECS};

/// Usage pattern shown by `--help` and on unsupported argument counts
pub const USAGE_PATTERN: &str = "memegen <MEME> ['<TOP TEXT>'] ['<BOTTOM TEXT>']";

/// memegen - Look up imgflip meme templates and caption them
#[derive(Parser, Debug)]
#[command(name = "memegen")]
#[command(about = "Look up imgflip meme templates and caption them")]
#[command(override_usage = USAGE_PATTERN)]
#[command(version)]
pub struct Cli {
    /// Meme name, followed by optional top and bottom text
    ///
    /// Examples:
    ///   memegen                          # List all templates
    ///   memegen yuno                     # Show the first template matching "yuno"
    ///   memegen yuno 'Y U NO' 'caption'  # Caption it (needs IMGFLIP_USERNAME/PASSWORD)
    #[arg(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<String>,

    /// Path of the cached template list
    #[arg(long, env = "MEMEGEN_CACHE_FILE", value_name = "PATH", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Base URL of the imgflip API
    #[arg(long, env = "MEMEGEN_API_URL", value_name = "URL", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "MEMEGEN_TIMEOUT",
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// What a single run should do, derived from the positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print every template, then the usage line
    List,
    /// Print the first template matching `meme`
    Show { meme: String },
    /// Caption the first template matching `meme`
    Caption {
        meme: String,
        top: String,
        bottom: String,
    },
    /// Print the usage line
    Usage,
}

impl Invocation {
    /// Maps positional arguments (program name excluded) to an invocation.
    ///
    /// Missing bottom text becomes an empty string; more than three arguments
    /// fall back to [`Invocation::Usage`].
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => Invocation::List,
            [meme] => Invocation::Show { meme: meme.clone() },
            [meme, top] => Invocation::Caption {
                meme: meme.clone(),
                top: top.clone(),
                bottom: String::new(),
            },
            [meme, top, bottom] => Invocation::Caption {
                meme: meme.clone(),
                top: top.clone(),
                bottom: bottom.clone(),
            },
            _ => Invocation::Usage,
        }
    }
}

/// The one-line usage help
pub fn usage() -> String {
    format!("Usage: {}", USAGE_PATTERN)
}
