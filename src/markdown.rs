//! Minimal Markdown-to-HTML renderer for note and book bodies.
//!
//! Deliberately a small subset, not CommonMark: bullet lists (nested by
//! two-space indent), `#`/`##`/`###` headings anchored to line start,
//! asterisk emphasis, paragraphs, and a last-resort sanitization pass.
//! The passes run in a fixed order; each one only sees the previous
//! pass's output.
//!
//! Single-asterisk spans intentionally render as bold-weight text, not
//! italic. Pages depend on the current look, so the mapping stays.

use regex::Regex;
use std::sync::LazyLock;

const H1_STYLE: &str = "font-size:2rem;font-weight:900;color:#1e293b;margin:2em 0 1em 0;";
const H2_STYLE: &str = "font-size:1.5rem;font-weight:900;color:#1e293b;margin:1.5em 0 0.8em 0;";
const H3_STYLE: &str = "font-size:1rem;font-weight:800;color:#1e293b;margin:1.2em 0 0.7em 0;";

const STRONG_ACCENT: &str = "color:#2563eb;font-weight:700;";
const STRONG_PLAIN: &str = "color:#222;font-weight:700;";

/// Base left margin in px for every list item, before per-level offsets.
const LIST_BASE_MARGIN: usize = 18;

/// Render a Markdown subset to sanitized HTML.
pub fn render_markdown(source: &str) -> String {
    let html = list_pass(source);
    let html = heading_pass(&html);
    let html = emphasis_pass(&html);
    let html = paragraph_pass(&html);
    sanitize(&html)
}

/// `Some((indent, text))` when the line is a bullet item. Tabs in the
/// indent count as two spaces.
fn list_item(line: &str) -> Option<(usize, &str)> {
    let rest = line.trim_start();
    let text = rest.strip_prefix("- ")?;
    let prefix = &line[..line.len() - rest.len()];
    let indent = prefix.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum();
    Some((indent, text))
}

/// Turn runs of bullet lines into nested `<ul>` blocks.
///
/// Nesting level is `indent / 2 + 1`; a stack of open lists tracks the
/// current depth. Non-list lines close every open list first. Blank lines
/// and lines directly following a list item are dropped so the paragraph
/// pass never wraps text touching a list boundary.
fn list_pass(source: &str) -> String {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let mut html = String::with_capacity(source.len());
    let mut depth = 0usize;

    for (i, line) in lines.iter().enumerate() {
        if let Some((indent, text)) = list_item(line) {
            let level = indent / 2 + 1;
            while depth < level {
                html.push_str("<ul>");
                depth += 1;
            }
            while depth > level {
                html.push_str("</ul>");
                depth -= 1;
            }
            let margin = LIST_BASE_MARGIN + indent * 12;
            html.push_str(&format!("<li style=\"margin-left:{margin}px\">{text}</li>"));
        } else {
            while depth > 0 {
                html.push_str("</ul>");
                depth -= 1;
            }
            let after_item = i > 0 && list_item(lines[i - 1]).is_some();
            if !line.trim().is_empty() && !after_item {
                html.push_str(line);
                html.push('\n');
            }
        }
    }
    while depth > 0 {
        html.push_str("</ul>");
        depth -= 1;
    }
    html
}

/// `#`/`##`/`###` at line start become styled headings. Longest prefix is
/// checked first so `###` is never misread as `#`.
fn heading_line(line: &str) -> Option<String> {
    for (marker, level, style) in [("###", 3, H3_STYLE), ("##", 2, H2_STYLE), ("#", 1, H1_STYLE)] {
        if let Some(rest) = line.strip_prefix(marker)
            && rest.starts_with(char::is_whitespace)
        {
            let text = rest.trim_start();
            return Some(format!("<h{level} style=\"{style}\">{text}</h{level}>"));
        }
    }
    None
}

fn heading_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in text.split_inclusive('\n') {
        let (line, newline) = match segment.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (segment, ""),
        };
        match heading_line(line) {
            Some(heading) => out.push_str(&heading),
            None => out.push_str(line),
        }
        out.push_str(newline);
    }
    out
}

/// Asterisk spans, longest marker first. Spans may cross line breaks and
/// must hold at least two characters that do not start or end with `*`, so
/// empty or pure-asterisk runs stay literal.
fn emphasis_pass(text: &str) -> String {
    static TRIPLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)\*\*\*([^*].*?[^*])\*\*\*").unwrap());
    static DOUBLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)\*\*([^*].*?[^*])\*\*").unwrap());
    static SINGLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)\*([^*].*?[^*])\*").unwrap());

    let accent = format!("<strong style=\"{STRONG_ACCENT}\">$1</strong>");
    let plain = format!("<strong style=\"{STRONG_PLAIN}\">$1</strong>");
    let text = TRIPLE.replace_all(text, accent.as_str());
    let text = DOUBLE.replace_all(&text, accent.as_str());
    SINGLE.replace_all(&text, plain.as_str()).into_owned()
}

/// Wrap leftover text lines in `<p>`. Lines already starting with a block
/// tag pass through, as does a trailing fragment without a newline.
fn paragraph_pass(text: &str) -> String {
    const BLOCK_PREFIXES: [&str; 7] = ["<h1", "<h2", "<h3", "<ul", "<li", "</ul", "</li"];

    let mut out = String::with_capacity(text.len());
    for segment in text.split_inclusive('\n') {
        match segment.strip_suffix('\n') {
            Some(line)
                if !line.is_empty() && !BLOCK_PREFIXES.iter().any(|p| line.starts_with(p)) =>
            {
                out.push_str("<p>");
                out.push_str(line);
                out.push_str("</p>\n");
            }
            _ => out.push_str(segment),
        }
    }
    out
}

/// Strip `<script>`/`<style>` blocks and quoted `on*=` handler attributes.
///
/// A last line of defense, not a full sanitizer: unquoted attribute values
/// and handlers outside the `on\w+="..."` shape pass through.
fn sanitize(html: &str) -> String {
    static SCRIPT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").unwrap());
    static STYLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").unwrap());
    static EVENT_ATTR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?i) on\w+="[^"]*""#).unwrap());

    let html = SCRIPT.replace_all(html, "");
    let html = STYLE.replace_all(&html, "");
    EVENT_ATTR.replace_all(&html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraph() {
        let html = render_markdown("# Title\n## Sub\nText.\n");
        assert!(html.contains("<h1 "));
        assert!(html.contains(">Title</h1>"));
        assert!(html.contains("<h2 "));
        assert!(html.contains(">Sub</h2>"));
        assert!(html.contains("<p>Text.</p>"));
    }

    #[test]
    fn test_heading_longest_prefix_first() {
        let html = render_markdown("### Deep\n");
        assert!(html.contains("<h3 "));
        assert!(!html.contains("<h1 "));
    }

    #[test]
    fn test_heading_mid_line_not_matched() {
        let html = render_markdown("see # issue 4\n");
        assert!(!html.contains("<h1"));
        assert!(html.contains("<p>see # issue 4</p>"));
    }

    #[test]
    fn test_flat_list() {
        let html = render_markdown("- One\n- Two\n");
        assert_eq!(
            html,
            "<ul><li style=\"margin-left:18px\">One</li><li style=\"margin-left:18px\">Two</li></ul>"
        );
    }

    #[test]
    fn test_nested_list_opens_inner_wrapper() {
        let html = render_markdown("- a\n  - b\n- c\n");
        assert!(html.starts_with("<ul><li style=\"margin-left:18px\">a</li>"));
        assert!(html.contains("<ul><li style=\"margin-left:42px\">b</li></ul>"));
        assert!(html.ends_with("<li style=\"margin-left:18px\">c</li></ul>"));
    }

    #[test]
    fn test_tab_indent_counts_as_two_spaces() {
        let html = render_markdown("- a\n\t- b\n");
        assert!(html.contains("margin-left:42px"));
    }

    #[test]
    fn test_open_lists_closed_at_end_of_input() {
        let html = render_markdown("- a\n  - b");
        assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    }

    #[test]
    fn test_line_after_list_item_is_not_a_paragraph() {
        let html = render_markdown("- a\nglued\nfree\n");
        assert!(!html.contains("<p>glued</p>"));
        assert!(html.contains("free"));
    }

    #[test]
    fn test_double_asterisk_accent_strong() {
        let html = render_markdown("**bold**\n");
        assert!(html.contains("<strong style=\"color:#2563eb;font-weight:700;\">bold</strong>"));
    }

    #[test]
    fn test_single_asterisk_renders_bold_not_italic() {
        let html = render_markdown("*span*\n");
        assert!(html.contains("<strong style=\"color:#222;font-weight:700;\">span</strong>"));
        assert!(!html.contains("<em"));
    }

    #[test]
    fn test_triple_asterisk_accent_strong() {
        let html = render_markdown("***loud***\n");
        assert!(html.contains("<strong style=\"color:#2563eb;font-weight:700;\">loud</strong>"));
        // triple markers are fully consumed, no stray asterisks remain
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_emphasis_span_crosses_lines() {
        let html = render_markdown("**two\nlines**\n");
        assert!(html.contains("<strong"));
        assert!(html.contains("</strong>"));
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_short_and_empty_spans_stay_literal() {
        assert!(render_markdown("*a*\n").contains("*a*"));
        assert!(render_markdown("**\n").contains("**"));
    }

    #[test]
    fn test_script_and_handlers_stripped() {
        let html = render_markdown("<script>alert(1)</script><a onclick=\"x()\">X</a>\n");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
        assert!(html.contains(">X</a>"));
    }

    #[test]
    fn test_style_block_stripped_across_lines() {
        let html = render_markdown("<style>\np { color: red }\n</style>\nok\n");
        assert!(!html.contains("<style"));
        assert!(html.contains("ok"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
    }
}
