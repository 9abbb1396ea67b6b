//! HTML minification, gated on `[build].minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a page when enabled in config.
///
/// Returns `Cow::Borrowed` if minify is disabled, `Cow::Owned` if minified.
pub fn minify_page<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(html);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}
