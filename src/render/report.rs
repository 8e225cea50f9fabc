//! Standalone HTML document for downloading or printing a research brief.

use super::escape::escape_html;
use super::markdown::markdown_to_html;
use crate::types::{InsightSection, KeyFact, ResearchBrief};

const REPORT_STYLE: &str = r#"
  body { font-family: 'DM Sans', -apple-system, sans-serif; max-width: 760px; margin: 48px auto; padding: 0 24px; color: #2a2a2a; line-height: 1.65; font-size: 15px; }
  h1 { font-family: 'Newsreader', Georgia, serif; font-size: 34px; font-weight: 400; letter-spacing: -0.01em; margin: 0 0 8px; }
  h2 { font-family: 'Newsreader', Georgia, serif; font-size: 22px; font-weight: 400; margin: 40px 0 12px; border-top: 1px solid #e0ddd8; padding-top: 16px; }
  h3, h4 { font-size: 16px; font-weight: 500; margin: 24px 0 8px; }
  p { margin: 0 0 12px; }
  ul, ol { padding-left: 20px; margin: 0 0 12px; }
  li { margin-bottom: 6px; }
  code { font-family: 'JetBrains Mono', monospace; font-size: 13px; background: #f5f3ef; padding: 1px 4px; border-radius: 2px; }
  pre { background: #f5f3ef; padding: 12px 16px; overflow-x: auto; border-radius: 4px; }
  pre code { padding: 0; background: none; }
  blockquote { border-left: 3px solid #c9a227; padding-left: 20px; margin: 16px 0; font-style: italic; color: #555; }
  hr { border: none; border-top: 1px solid #e0ddd8; margin: 32px 0; }
  table { border-collapse: collapse; width: 100%; margin: 0 0 16px; font-size: 14px; }
  th, td { border: 1px solid #e0ddd8; padding: 6px 10px; text-align: left; vertical-align: top; }
  th { background: #faf8f5; font-weight: 500; }
  a { color: #8a6d1a; }
  .meta { font-family: 'JetBrains Mono', monospace; font-size: 11px; color: #888; letter-spacing: 0.04em; margin-bottom: 24px; }
  .hero { font-size: 18px; color: #555; margin-bottom: 32px; }
  .facts { display: grid; grid-template-columns: max-content 1fr; gap: 6px 20px; margin: 0 0 12px; }
  .facts dt { font-weight: 500; color: #555; }
  .facts dd { margin: 0; }
  .empty { color: #999; font-style: italic; }
  @media print { body { margin: 24px; } a { color: inherit; } }
"#;

fn render_key_facts(key_facts: &[KeyFact]) -> String {
    if key_facts.is_empty() {
        return "<p class=\"empty\">No key facts detected.</p>".to_string();
    }
    let mut html = String::from("<dl class=\"facts\">\n");
    for fact in key_facts {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape_html(&fact.label),
            escape_html(&fact.value)
        ));
    }
    html.push_str("</dl>");
    html
}

fn render_pricing(pricing_highlights: &[String]) -> String {
    if pricing_highlights.is_empty() {
        return "<p class=\"empty\">No pricing signals found.</p>".to_string();
    }
    let items: String = pricing_highlights
        .iter()
        .map(|line| format!("<li>{}</li>\n", escape_html(line)))
        .collect();
    format!("<ul>\n{}</ul>", items)
}

fn render_insights(sections: &[InsightSection]) -> String {
    if sections.is_empty() {
        return "<p class=\"empty\">No insight sections found.</p>".to_string();
    }
    let mut html = String::new();
    for section in sections {
        html.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape_html(&section.title)));
        for bullet in &section.bullets {
            html.push_str(&format!("<li>{}</li>\n", escape_html(bullet)));
        }
        html.push_str("</ul>\n");
    }
    html
}

/// Build the exported HTML document for a brief.
///
/// Every interpolated value (query, hero line, facts, highlights, section
/// titles and bullets, report body) is escaped before it lands in markup.
pub fn render_report_html(
    query: &str,
    key_facts: &[KeyFact],
    pricing_highlights: &[String],
    insight_sections: &[InsightSection],
    hero_line: &str,
    raw_report: &str,
) -> String {
    let title = if query.trim().is_empty() {
        "Market Research".to_string()
    } else {
        format!("Market Research: {}", query.trim())
    };
    let title = escape_html(&title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<p class="meta">MARKET RESEARCH BRIEF</p>
<h1>{title}</h1>
<p class="hero">{hero}</p>
<h2>Key Facts</h2>
{facts}
<h2>Pricing Highlights</h2>
{pricing}
<h2>Insights</h2>
{insights}
<h2>Full Report</h2>
<article>
{body}
</article>
</body>
</html>
"#,
        title = title,
        style = REPORT_STYLE,
        hero = escape_html(hero_line),
        facts = render_key_facts(key_facts),
        pricing = render_pricing(pricing_highlights),
        insights = render_insights(insight_sections),
        body = markdown_to_html(raw_report),
    )
}

/// Render the export document straight from a built brief.
pub fn render_brief_html(brief: &ResearchBrief) -> String {
    render_report_html(
        &brief.query,
        &brief.key_facts,
        &brief.pricing_highlights,
        &brief.insight_sections,
        &brief.hero_line,
        &brief.raw_report,
    )
}
