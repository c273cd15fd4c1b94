//! Card content markup: free text with trailing `![gif](url)` markers

use regex::Regex;
use std::sync::OnceLock;

/// Card content split into its text and embedded gif urls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentParts {
    pub text: String,
    pub gifs: Vec<String>,
}

impl ContentParts {
    /// True when there is neither text nor a gif
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.gifs.is_empty()
    }
}

static GIF_REGEX: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

fn gif_regex() -> &'static Regex {
    GIF_REGEX.get_or_init(|| {
        Regex::new(r"!\[gif\]\((https?://[^)]+)\)").expect("Invalid gif regex")
    })
}

fn blank_run_regex() -> &'static Regex {
    BLANK_RUN_REGEX.get_or_init(|| Regex::new(r"\n\n+").expect("Invalid blank line regex"))
}

/// Pull the gif markers out of card content.
///
/// Gif urls are returned in order of appearance. The remaining text has runs
/// of blank lines collapsed to one and is trimmed.
pub fn split_gifs(content: &str) -> ContentParts {
    let gifs = gif_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|url| url.as_str().to_string())
        .collect();
    let stripped = gif_regex().replace_all(content, "");
    let text = blank_run_regex()
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string();
    ContentParts { text, gifs }
}

/// Join text and gif urls back into card content, one marker per line
pub fn compose(text: &str, gifs: &[String]) -> String {
    let text = text.trim();
    if gifs.is_empty() {
        return text.to_string();
    }
    let markers = gifs
        .iter()
        .map(|url| format!("![gif]({url})"))
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        markers
    } else {
        format!("{text}\n\n{markers}")
    }
}
