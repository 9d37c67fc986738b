use anyhow::Result;
use scraper::{ElementRef, Html, Node};

/// Converts a rich-text/HTML fragment into a quoting-friendly markdown block.
///
/// Scanner detail markup is injected through this trait so the relay core can
/// be exercised with fakes; [`HtmlMarkdownConverter`] is the shipped
/// implementation.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, fragment: &str) -> Result<String>;
}

/// HTML → markdown converter for scanner issue detail.
///
/// Handles the markup scanners actually emit: paragraphs, line breaks,
/// emphasis, inline and fenced code, links, lists, headings, and tables
/// (rendered as markdown pipe tables).
#[derive(Debug, Default)]
pub struct HtmlMarkdownConverter;

impl HtmlMarkdownConverter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownConverter for HtmlMarkdownConverter {
    fn convert(&self, fragment: &str) -> Result<String> {
        let document = Html::parse_fragment(fragment);
        let mut out = String::new();
        render_children(document.root_element(), &mut out, false);
        Ok(collapse_blank_runs(out.trim()))
    }
}

fn render_children(element: ElementRef<'_>, out: &mut String, in_pre: bool) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if in_pre {
                    out.push_str(text);
                } else {
                    append_inline_text(out, text);
                }
            }
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    render_element(el, out, in_pre);
                }
            }
            _ => {}
        }
    }
}

#[allow(clippy::too_many_lines)]
fn render_element(el: ElementRef<'_>, out: &mut String, in_pre: bool) {
    match el.value().name() {
        "br" => out.push('\n'),
        "b" | "strong" => wrap_inline(el, out, "**"),
        "i" | "em" => wrap_inline(el, out, "*"),
        "code" if !in_pre => wrap_inline(el, out, "`"),
        "a" => {
            let text = inner_markdown(el).trim().to_string();
            match el.value().attr("href") {
                Some(href) if !text.is_empty() => {
                    out.push_str(&format!("[{text}]({href})"));
                }
                _ => out.push_str(&text),
            }
        }
        "pre" => {
            let mut raw = String::new();
            render_children(el, &mut raw, true);
            ensure_block_break(out);
            out.push_str("```\n");
            out.push_str(raw.trim_matches('\n'));
            out.push_str("\n```");
            ensure_block_break(out);
        }
        "p" | "div" | "blockquote" => {
            ensure_block_break(out);
            render_children(el, out, in_pre);
            ensure_block_break(out);
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = el.value().name().as_bytes()[1] - b'0';
            ensure_block_break(out);
            out.push_str(&"#".repeat(usize::from(level)));
            out.push(' ');
            render_children(el, out, in_pre);
            ensure_block_break(out);
        }
        "ul" => {
            ensure_block_break(out);
            for item in list_items(el) {
                out.push_str("- ");
                out.push_str(inner_markdown(item).trim());
                out.push('\n');
            }
            ensure_block_break(out);
        }
        "ol" => {
            ensure_block_break(out);
            for (index, item) in list_items(el).enumerate() {
                out.push_str(&format!("{}. ", index + 1));
                out.push_str(inner_markdown(item).trim());
                out.push('\n');
            }
            ensure_block_break(out);
        }
        "table" => {
            ensure_block_break(out);
            out.push_str(&render_table(el));
            ensure_block_break(out);
        }
        // Unknown wrappers contribute their children only
        _ => render_children(el, out, in_pre),
    }
}

fn wrap_inline(el: ElementRef<'_>, out: &mut String, marker: &str) {
    let inner = inner_markdown(el);
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return;
    }
    if inner.starts_with(char::is_whitespace) && !out.is_empty() && !ends_with_whitespace(out) {
        out.push(' ');
    }
    out.push_str(marker);
    out.push_str(trimmed);
    out.push_str(marker);
    if inner.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn inner_markdown(el: ElementRef<'_>) -> String {
    let mut inner = String::new();
    render_children(el, &mut inner, false);
    inner
}

fn list_items(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
}

fn render_table(table: ElementRef<'_>) -> String {
    let rows: Vec<Vec<String>> = descendant_elements(table, "tr")
        .map(|row| {
            row.descendants()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(|cell| inner_markdown(cell).trim().replace('\n', " "))
                .collect()
        })
        .filter(|cells: &Vec<String>| !cells.is_empty())
        .collect();

    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str(&pipe_row(header));
    out.push_str(&pipe_row(&vec!["---".to_string(); header.len()]));
    for row in body {
        out.push_str(&pipe_row(row));
    }
    out
}

fn descendant_elements<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn pipe_row(cells: &[String]) -> String {
    let mut row = String::from("|");
    for cell in cells {
        row.push(' ');
        row.push_str(cell);
        row.push_str(" |");
    }
    row.push('\n');
    row
}

fn append_inline_text(out: &mut String, raw: &str) {
    if raw.trim().is_empty() {
        if !out.is_empty() && !ends_with_whitespace(out) {
            out.push(' ');
        }
        return;
    }
    if raw.starts_with(char::is_whitespace) && !out.is_empty() && !ends_with_whitespace(out) {
        out.push(' ');
    }
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    out.push_str(&collapsed);
    if raw.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn ends_with_whitespace(out: &str) -> bool {
    out.ends_with(char::is_whitespace)
}

fn ensure_block_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(fragment: &str) -> String {
        HtmlMarkdownConverter::new().convert(fragment).unwrap()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(convert("Reflected input was found."), "Reflected input was found.");
    }

    #[test]
    fn paragraphs_become_blank_line_separated_blocks() {
        assert_eq!(convert("<p>First.</p><p>Second.</p>"), "First.\n\nSecond.");
    }

    #[test]
    fn emphasis_and_code_render_inline() {
        assert_eq!(
            convert("The <b>q</b> parameter echoes <code>alert(1)</code>."),
            "The **q** parameter echoes `alert(1)`."
        );
    }

    #[test]
    fn inline_emphasis_keeps_surrounding_spaces() {
        assert_eq!(convert("a <b>bold</b> word"), "a **bold** word");
    }

    #[test]
    fn links_render_as_markdown_links() {
        assert_eq!(
            convert(r#"See <a href="https://example.com/ref">the reference</a>."#),
            "See [the reference](https://example.com/ref)."
        );
    }

    #[test]
    fn unordered_list_renders_dashes() {
        assert_eq!(
            convert("<ul><li>one</li><li>two</li></ul>"),
            "- one\n- two"
        );
    }

    #[test]
    fn ordered_list_renders_numbers() {
        assert_eq!(
            convert("<ol><li>first</li><li>second</li></ol>"),
            "1. first\n2. second"
        );
    }

    #[test]
    fn pre_renders_fenced_block_preserving_whitespace() {
        let markdown = convert("<pre>GET /a HTTP/1.1\nHost: x</pre>");
        assert_eq!(markdown, "```\nGET /a HTTP/1.1\nHost: x\n```");
    }

    #[test]
    fn table_renders_pipe_rows_with_separator() {
        let markdown = convert(
            "<table><tr><th>Issue</th><th>Severity</th></tr>\
             <tr><td>XSS</td><td>High</td></tr></table>",
        );
        assert_eq!(
            markdown,
            "| Issue | Severity |\n| --- | --- |\n| XSS | High |"
        );
    }

    #[test]
    fn layout_whitespace_is_collapsed() {
        assert_eq!(
            convert("<p>\n    Indented\n    source\n  </p>"),
            "Indented source"
        );
    }

    #[test]
    fn unknown_tags_contribute_children() {
        assert_eq!(convert("<span>plain <u>span</u></span>"), "plain span");
    }

    #[test]
    fn empty_fragment_yields_empty_string() {
        assert_eq!(convert(""), "");
    }
}
