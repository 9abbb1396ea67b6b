//! `[build]` section configuration.
//!
//! Contains the data-directory layout and output settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in readstack.toml - build paths and output settings.
///
/// `manifest` and `tags` are resolved relative to `data` at load time.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"
/// output = "public"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory. Usually set from the CLI, not the file.
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding the manifest, taxonomy and markdown documents.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Directory the generated site is written to.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Manifest file name, relative to `data`.
    #[serde(default = "defaults::build::manifest")]
    #[educe(Default = defaults::build::manifest())]
    pub manifest: PathBuf,

    /// Tag taxonomy file name, relative to `data`.
    #[serde(default = "defaults::build::tags")]
    #[educe(Default = defaults::build::tags())]
    pub tags: PathBuf,

    /// Minify generated HTML.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}
