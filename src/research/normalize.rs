//! Noise removal for raw research reports.
//!
//! Search and summarization providers return markdown peppered with HTML line
//! breaks, stray code fences, non-breaking spaces and their own attribution
//! lines. `normalize` strips all of that so the extractors see plain
//! line-oriented markdown. The boilerplate patterns are shared with the token
//! stripper, which re-applies them per line.

use std::sync::OnceLock;

use regex::Regex;

/// Domains of search/summarization providers whose credit lines get scrubbed.
pub const PROVIDER_DOMAINS: &[&str] = &["you.com", "perplexity.ai", "tavily.com", "exa.ai"];

// Compile-once regex patterns via OnceLock.
fn re_line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap())
}

fn re_excess_newlines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Whole lines that are nothing but a provider credit.
fn re_credit_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t>*_#-]*(?:powered[ \t]+by|summari[sz]ed[ \t]+by|source[ \t]*:)[^\n]*$")
            .unwrap()
    })
}

/// Trailing "(powered by ...)" style credits inside an otherwise useful line.
fn re_credit_fragment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[(\[]?[ \t]*\b(?:powered|summari[sz]ed)[ \t]+by\b[^\n)\]]*[)\]]?").unwrap()
    })
}

fn re_provider_domain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let domains = PROVIDER_DOMAINS
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"(?i)(?:https?://)?(?:www\.)?\b(?:{})\b(?:/[^\s)\]]*)?",
            domains
        ))
        .unwrap()
    })
}

fn strip_boilerplate_once(text: &str) -> String {
    let text = re_credit_line().replace_all(text, "");
    let text = re_credit_fragment().replace_all(&text, "");
    re_provider_domain().replace_all(&text, "").into_owned()
}

/// Remove provider attribution: credit lines, credit fragments and bare
/// provider domain mentions. Leaves surrounding whitespace for the caller to
/// collapse.
///
/// Passes repeat until nothing changes: dropping a domain can expose a credit
/// line (`exa.ai Source: ...`). Every effective pass shortens the text.
pub fn strip_boilerplate(text: &str) -> String {
    let mut current = strip_boilerplate_once(text);
    loop {
        let next = strip_boilerplate_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn collapse_blank_runs(text: &str) -> String {
    re_excess_newlines().replace_all(text, "\n\n").into_owned()
}

/// Clean a raw report into normalized markdown.
///
/// Rules run in order; later ones see the output of earlier ones. Code fences
/// are flattened here, only the HTML renderer keeps fenced code. Idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = re_line_break().replace_all(raw, "\n");
    let text = text.replace("```", "\n");
    let text = text.replace('\u{a0}', " ");
    let text = text.replace('\r', "");
    let text = collapse_blank_runs(&text);
    let text = strip_boilerplate(&text);
    let text = collapse_blank_runs(&text);

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n  "), "");
    }

    #[test]
    fn line_breaks_and_fences_become_newlines() {
        let raw = "Founded: 2015<br>HQ: Austin<BR/>Team: 40<br />\n```\nplain\n```";
        assert_eq!(normalize(raw), "Founded: 2015\nHQ: Austin\nTeam: 40\n\nplain");
    }

    #[test]
    fn nbsp_and_carriage_returns() {
        assert_eq!(normalize("Acme\u{a0}Corp\r\nships\r\n"), "Acme Corp\nships");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn strips_credit_lines() {
        let raw = "## Summary\nAcme leads the segment.\nPowered by You.com\n*Summarized by our assistant*\nSource: you.com/search?q=acme\n\n\nNext line";
        assert_eq!(normalize(raw), "## Summary\nAcme leads the segment.\n\nNext line");
    }

    #[test]
    fn strips_credit_fragments_and_domains() {
        let raw = "Acme leads the segment (powered by Perplexity)\nSee https://www.you.com/answers for more";
        let out = normalize(raw);
        assert!(!out.to_lowercase().contains("powered by"));
        assert!(!out.to_lowercase().contains("you.com"));
        assert!(out.starts_with("Acme leads the segment"));
        assert!(out.contains("See"));
    }

    #[test]
    fn sources_heading_survives() {
        let raw = "Answer text.\n\nSources:\n- [Acme](https://acme.com)";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn credit_line_behind_provider_domain() {
        assert_eq!(normalize("exa.ai Source: acme blog\nBody"), "Body");
        assert!(strip_boilerplate("you.com Powered by Tavily").trim().is_empty());
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "plain",
            "## Pricing<br>- Starter $29\r\n\n\n\n- Pro $99\u{a0}/mo",
            "```\ncode\n```\n\n\n\nPowered by you.com\n\n\n\ntrailing",
            "  leading and trailing  \n\n",
            "a\n \n\n\n\nb",
            "exa.ai Source: acme blog\nBody",
            "tavily.com powered by you.com\n\n\nperplexity.ai Source: x",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
