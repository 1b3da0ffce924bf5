//! Markdown serialisation for [`Page`] trees.

use crate::page::{Block, Element, Inline, Node, Page};

/// Where an inline is being written; HTML blocks are not parsed as Markdown.
#[derive(Clone, Copy)]
enum Context {
    Markdown,
    Html,
}

/// Render a page to Markdown text.
pub fn render(page: &Page) -> String {
    let mut md = String::with_capacity(4096);
    for block in &page.blocks {
        render_block(&mut md, block);
    }
    // One trailing newline, not a blank line.
    while md.ends_with("\n\n") {
        md.pop();
    }
    md
}

fn render_block(md: &mut String, block: &Block) {
    match block {
        Block::Heading { level, content } => {
            md.push_str(&"#".repeat(usize::from((*level).clamp(1, 6))));
            md.push(' ');
            render_inlines(md, content, Context::Markdown);
            md.push_str("\n\n");
        }
        Block::Paragraph(content) => {
            render_inlines(md, content, Context::Markdown);
            md.push_str("\n\n");
        }
        Block::Code { lang, source } => {
            let fence = "`".repeat(fence_len(source));
            md.push_str(&fence);
            md.push_str(lang);
            md.push('\n');
            md.push_str(source.trim_end_matches('\n'));
            md.push('\n');
            md.push_str(&fence);
            md.push_str("\n\n");
        }
        Block::Html(element) => {
            render_element(md, element, 0);
            md.push('\n');
        }
        Block::List(items) => {
            for item in items {
                md.push_str("- ");
                render_inlines(md, item, Context::Markdown);
                md.push('\n');
            }
            md.push('\n');
        }
        Block::Rule => md.push_str("---\n\n"),
    }
}

/// Elements holding only inline content go on one line; the rest nest with
/// two-space indentation.
fn render_element(md: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    md.push_str(&indent);
    md.push('<');
    md.push_str(element.tag);
    if let Some(class) = element.class {
        md.push_str(" class=\"");
        md.push_str(&escape_html(class));
        md.push('"');
    }
    md.push('>');

    let inline_only = element
        .children
        .iter()
        .all(|child| matches!(child, Node::Inline(_)));

    if inline_only {
        for child in &element.children {
            if let Node::Inline(inline) = child {
                render_inline(md, inline, Context::Html);
            }
        }
    } else {
        md.push('\n');
        for child in &element.children {
            match child {
                Node::Element(el) => render_element(md, el, depth + 1),
                Node::Inline(inline) => {
                    md.push_str(&"  ".repeat(depth + 1));
                    render_inline(md, inline, Context::Html);
                    md.push('\n');
                }
            }
        }
        md.push_str(&indent);
    }

    md.push_str("</");
    md.push_str(element.tag);
    md.push_str(">\n");
}

fn render_inlines(md: &mut String, inlines: &[Inline], ctx: Context) {
    for inline in inlines {
        render_inline(md, inline, ctx);
    }
}

fn render_inline(md: &mut String, inline: &Inline, ctx: Context) {
    match (inline, ctx) {
        (Inline::Text(s), Context::Markdown) => md.push_str(&escape_markdown(s)),
        (Inline::Text(s), Context::Html) => md.push_str(&escape_html(s)),
        (Inline::Expr(expr), _) => {
            md.push_str("${");
            md.push_str(expr);
            md.push('}');
        }
        (Inline::Link { text, href }, Context::Markdown) => {
            md.push('[');
            md.push_str(&escape_markdown(text));
            md.push_str("](");
            md.push_str(&escape_href(href));
            md.push(')');
        }
        (Inline::Link { text, href }, Context::Html) => {
            md.push_str("<a href=\"");
            md.push_str(&escape_html(href));
            md.push_str("\">");
            md.push_str(&escape_html(text));
            md.push_str("</a>");
        }
    }
}

/// Backtick fence long enough that nothing inside can close it.
fn fence_len(source: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in source.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(3)
}

/// Escape text for HTML content and attributes. `$` is written as an entity
/// so text can never start a view-time `${...}` expression.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '$' => out.push_str("&#36;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for Markdown prose: backslash for Markdown punctuation, then
/// the same entity escaping as [`escape_html`].
pub fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '$' => out.push_str("&#36;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_href(href: &str) -> String {
    href.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::build_page;
    use courtmap_core::{Region, RegionKind};
    use serde_json::{Map, json};

    fn page(blocks: Vec<Block>) -> Page {
        Page {
            slug: "test".into(),
            blocks,
        }
    }

    #[test]
    fn heading_and_paragraph() {
        let md = render(&page(vec![
            Block::Heading {
                level: 1,
                content: vec![Inline::Text("Ninth Circuit".into())],
            },
            Block::Paragraph(vec![Inline::Text("Hello".into())]),
        ]));
        assert_eq!(md, "# Ninth Circuit\n\nHello\n");
    }

    #[test]
    fn view_time_expression() {
        let md = render(&page(vec![Block::Heading {
            level: 2,
            content: vec![Inline::Expr("circuit.name".into())],
        }]));
        assert_eq!(md, "## ${circuit.name}\n");
    }

    #[test]
    fn text_cannot_open_expression() {
        let md = render(&page(vec![Block::Paragraph(vec![Inline::Text(
            "${secret}".into(),
        )])]));
        assert!(!md.contains("${"));
        assert_eq!(md, "&#36;{secret}\n");
    }

    #[test]
    fn html_text_is_escaped() {
        let md = render(&page(vec![Block::Html(
            Element::new("p").text("<script>alert(1)</script> & co"),
        )]));
        assert_eq!(md, "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</p>\n");
    }

    #[test]
    fn markdown_punctuation_is_escaped() {
        assert_eq!(escape_markdown("*bold* [x]"), r"\*bold\* \[x\]");
    }

    #[test]
    fn nested_elements_indent() {
        let md = render(&page(vec![Block::Html(
            Element::new("div")
                .class("info-card")
                .child(Element::new("h3").text("Circuit Judges")),
        )]));
        assert_eq!(
            md,
            "<div class=\"info-card\">\n  <h3>Circuit Judges</h3>\n</div>\n"
        );
    }

    #[test]
    fn code_fence_outgrows_backticks() {
        let md = render(&page(vec![Block::Code {
            lang: "js",
            source: "const s = `a ```` b`;".into(),
        }]));
        assert!(md.starts_with("`````js\n"));
        assert!(md.ends_with("\n`````\n"));
    }

    #[test]
    fn plain_code_uses_three_backticks() {
        let md = render(&page(vec![Block::Code {
            lang: "js",
            source: "display(1);\n".into(),
        }]));
        assert_eq!(md, "```js\ndisplay(1);\n```\n");
    }

    #[test]
    fn list_of_links() {
        let md = render(&page(vec![Block::List(vec![
            vec![Inline::Link {
                text: "First Circuit".into(),
                href: "./first-circuit".into(),
            }],
            vec![Inline::Link {
                text: "Second Circuit".into(),
                href: "./second-circuit".into(),
            }],
        ])]));
        assert_eq!(
            md,
            "- [First Circuit](./first-circuit)\n- [Second Circuit](./second-circuit)\n"
        );
    }

    #[test]
    fn full_circuit_page() {
        let region = Region::new("Ninth Circuit", json!(null), Map::new());
        let md = render(&build_page(RegionKind::Circuit, &region));
        assert!(md.starts_with("# Ninth Circuit\n\n```js\n// Load all circuits data\n"));
        assert!(md.contains("const circuitSlug = \"ninth-circuit\";"));
        assert!(md.contains("## ${circuit.name}\n"));
        assert!(md.contains(
            "<p class=\"circuit-intro\">The ${circuit.name} is one of the thirteen United States Courts of Appeals.</p>"
        ));
        assert!(md.contains("## Information\n"));
        assert!(md.contains("    <h3>Member Districts</h3>\n"));
        assert!(md.ends_with("---\n\n[← Back to all circuits](./index)\n"));
    }
}
