//! `[base]` section configuration.
//!
//! Contains basic site information like title and description.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in readstack.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Reading Log"
/// description = "Books and notes"
/// url = "https://reads.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: String,

    /// Base URL for absolute links.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}
