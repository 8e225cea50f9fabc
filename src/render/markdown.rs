//! Markdown → HTML for report export.
//!
//! Parsing produces a small typed tree (blocks of inline nodes) from the raw,
//! unescaped text; serialization is the only place that emits markup, and it
//! escapes every text leaf and every attribute value there. Constructs that
//! don't parse cleanly (an unclosed fence, a table without a separator row)
//! fall back to paragraph text, so malformed input never yields broken tags.

use std::sync::OnceLock;

use regex::Regex;

use super::escape::{escape_html, safe_href};

/// One line of inline content.
pub type InlineLine = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    StrongEmphasis(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: usize, content: InlineLine },
    Paragraph(Vec<InlineLine>),
    CodeBlock { language: Option<String>, code: String },
    Table { header: Vec<InlineLine>, rows: Vec<Vec<InlineLine>> },
    List { ordered: bool, items: Vec<InlineLine> },
    Blockquote(Vec<InlineLine>),
    Rule,
}

fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,4})\s+(.+)$").unwrap())
}

fn re_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap())
}

fn re_table_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|?\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)*\|?$").unwrap())
}

fn re_unordered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*+•]\s+(.*)$").unwrap())
}

fn re_ordered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]\s+(.*)$").unwrap())
}

/// Inline constructs, most specific first: code spans, autolinks, links,
/// then `***`, `**`, `*` emphasis.
fn re_inline() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"`([^`\n]+)`",
            r"|<(https?://[^\s<>]+)>",
            r"|\[([^\]\n]+)\]\(([^)\s]*)\)",
            r"|\*\*\*([^*\n]+)\*\*\*",
            r"|\*\*([^*\n]+)\*\*",
            r"|\*([^*\s][^*\n]*)\*",
        ))
        .unwrap()
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse inline markdown in a single line.
pub fn parse_inlines(text: &str) -> InlineLine {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in re_inline().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            out.push(Inline::Text(text[last..whole.start()].to_string()));
        }

        let node = if let Some(code) = caps.get(1) {
            Inline::Code(code.as_str().to_string())
        } else if let Some(url) = caps.get(2) {
            Inline::Link {
                href: url.as_str().to_string(),
                children: vec![Inline::Text(url.as_str().to_string())],
            }
        } else if let (Some(label), Some(url)) = (caps.get(3), caps.get(4)) {
            Inline::Link {
                href: url.as_str().to_string(),
                children: parse_inlines(label.as_str()),
            }
        } else if let Some(inner) = caps.get(5) {
            Inline::StrongEmphasis(parse_inlines(inner.as_str()))
        } else if let Some(inner) = caps.get(6) {
            Inline::Strong(parse_inlines(inner.as_str()))
        } else if let Some(inner) = caps.get(7) {
            Inline::Emphasis(parse_inlines(inner.as_str()))
        } else {
            Inline::Text(whole.as_str().to_string())
        };
        out.push(node);
        last = whole.end();
    }

    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
    out
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(caps) = re_unordered_item().captures(line) {
        return caps.get(1).map(|m| (false, m.as_str()));
    }
    re_ordered_item()
        .captures(line)
        .and_then(|caps| caps.get(1).map(|m| (true, m.as_str())))
}

fn split_table_row(line: &str) -> Vec<InlineLine> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| parse_inlines(cell.trim())).collect()
}

/// Try to parse a non-paragraph block starting at `start`. Returns the block
/// and how many lines it consumed.
fn parse_block_at(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let trimmed = lines[start].trim();

    if let Some(info) = trimmed.strip_prefix("```") {
        if info.contains('`') {
            return None;
        }
        let close = start + 1 + lines[start + 1..]
            .iter()
            .position(|l| l.trim().starts_with("```"))?;
        let language = info.trim();
        let block = Block::CodeBlock {
            language: (!language.is_empty()).then(|| language.to_string()),
            code: lines[start + 1..close].join("\n"),
        };
        return Some((block, close + 1 - start));
    }

    if let Some(caps) = re_heading().captures(trimmed) {
        let block = Block::Heading {
            level: caps[1].len(),
            content: parse_inlines(caps[2].trim()),
        };
        return Some((block, 1));
    }

    if re_rule().is_match(trimmed) {
        return Some((Block::Rule, 1));
    }

    if trimmed.contains('|') {
        let has_separator = lines
            .get(start + 1)
            .is_some_and(|next| re_table_separator().is_match(next.trim()));
        if has_separator {
            let header = split_table_row(trimmed);
            let rows: Vec<_> = lines[start + 2..]
                .iter()
                .take_while(|l| !l.trim().is_empty() && l.contains('|'))
                .map(|l| split_table_row(l))
                .collect();
            let consumed = 2 + rows.len();
            return Some((Block::Table { header, rows }, consumed));
        }
    }

    if let Some((ordered, _)) = list_item(trimmed) {
        let items: Vec<_> = lines[start..]
            .iter()
            .map_while(|l| match list_item(l.trim()) {
                Some((kind, text)) if kind == ordered => Some(parse_inlines(text)),
                _ => None,
            })
            .collect();
        let consumed = items.len();
        return Some((Block::List { ordered, items }, consumed));
    }

    if trimmed.starts_with('>') {
        let quoted: Vec<_> = lines[start..]
            .iter()
            .map(|l| l.trim())
            .take_while(|l| l.starts_with('>'))
            .map(|l| {
                let body = &l[1..];
                parse_inlines(body.strip_prefix(' ').unwrap_or(body))
            })
            .collect();
        let consumed = quoted.len();
        return Some((Block::Blockquote(quoted), consumed));
    }

    None
}

fn flush_paragraph(paragraph: &mut Vec<InlineLine>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

/// Parse a markdown document into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let text = markdown.replace('\r', "");
    let lines: Vec<&str> = text.lines().collect();

    let mut blocks = Vec::new();
    let mut paragraph: Vec<InlineLine> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            i += 1;
            continue;
        }

        if let Some((block, consumed)) = parse_block_at(&lines, i) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(block);
            i += consumed.max(1);
            continue;
        }

        paragraph.push(parse_inlines(trimmed));
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

// =============================================================================
// Serialization
// =============================================================================

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Code(code) => {
                out.push_str(&format!("<code>{}</code>", escape_html(code)));
            }
            Inline::Strong(children) => {
                out.push_str(&format!("<strong>{}</strong>", render_inlines(children)));
            }
            Inline::Emphasis(children) => {
                out.push_str(&format!("<em>{}</em>", render_inlines(children)));
            }
            Inline::StrongEmphasis(children) => {
                out.push_str(&format!("<strong><em>{}</em></strong>", render_inlines(children)));
            }
            Inline::Link { href, children } => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    safe_href(href),
                    render_inlines(children)
                ));
            }
        }
    }
    out
}

fn render_lines(lines: &[InlineLine]) -> String {
    lines
        .iter()
        .map(|line| render_inlines(line))
        .collect::<Vec<_>>()
        .join("<br>\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, content } => {
            format!("<h{0}>{1}</h{0}>", level, render_inlines(content))
        }
        Block::Paragraph(lines) => format!("<p>{}</p>", render_lines(lines)),
        Block::CodeBlock { language, code } => match language {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(lang),
                escape_html(code)
            ),
            None => format!("<pre><code>{}</code></pre>", escape_html(code)),
        },
        Block::Table { header, rows } => {
            let mut html = String::from("<table>\n<thead><tr>");
            for cell in header {
                html.push_str(&format!("<th>{}</th>", render_inlines(cell)));
            }
            html.push_str("</tr></thead>\n<tbody>\n");
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str(&format!("<td>{}</td>", render_inlines(cell)));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</tbody>\n</table>");
            html
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let mut html = format!("<{}>\n", tag);
            for item in items {
                html.push_str(&format!("<li>{}</li>\n", render_inlines(item)));
            }
            html.push_str(&format!("</{}>", tag));
            html
        }
        Block::Blockquote(lines) => format!("<blockquote>{}</blockquote>", render_lines(lines)),
        Block::Rule => "<hr>".to_string(),
    }
}

/// Serialize parsed blocks to HTML, one block per line.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(render_block).collect::<Vec<_>>().join("\n")
}

/// Convert a markdown report body to escaped, styled-ready HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    render_blocks(&parse_blocks(markdown))
}
