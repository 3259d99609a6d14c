//! Best-effort Markdown to HTML for model answers.
//!
//! A fixed sequence of passes, each applied to the output of the previous one:
//!
//! 1. `> ` lines become blockquotes
//! 2. fenced code blocks become `<pre><code class="language-…">`
//! 3. `### ` / `## ` lines become `<h3>` / `<h2>`
//! 4. `` `code` `` spans become `<code>`
//! 5. `**bold**` becomes `<strong>`
//! 6. every `- ` line is pulled into one `<ul>` placed at the end
//! 7. blank-line separated blocks become `<p>` with `<br/>` line breaks
//!
//! This is not a Markdown parser. Lists do not nest and always move to the
//! end of the output, and nothing is HTML-escaped. Code produced by passes 2
//! and 4 is parked behind placeholders so later passes never rewrite it.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const BLOCKQUOTE_CLASS: &str = "border-l-4 border-indigo-500 pl-4 py-1 italic text-gray-400";
const PLAINTEXT_LANG: &str = "plaintext";

// Placeholder markers (Unicode private use area).
const FENCE_MARK: char = '\u{E000}';
const INLINE_MARK: char = '\u{E002}';
const END_MARK: char = '\u{E001}';

// `R`: `.` stops before `\r` and `$` matches before `\r\n`.
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| re(r"(?mR)^> (.*)$"));
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)```([A-Za-z0-9_]+)?\n(.*?)```"));
static H3: LazyLock<Regex> = LazyLock::new(|| re(r"(?mR)^### (.*)$"));
static H2: LazyLock<Regex> = LazyLock::new(|| re(r"(?mR)^## (.*)$"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| re(r"`([^`]+)`"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| re(r"(?R)\*\*(.*?)\*\*"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| re(r"(?mR)^- (.*)$"));
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| re("[\u{E000}\u{E002}]([0-9]+)\u{E001}"));

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("markdown pattern must compile")
}

/// Renders `markdown` to HTML. `None` and `""` render to `""`.
///
/// ```
/// use chat_client::markdown::render;
///
/// assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
/// assert_eq!(render(None::<&str>), "");
/// ```
pub fn render<'a>(markdown: impl Into<Option<&'a str>>) -> String {
    let markdown = match markdown.into() {
        Some(md) if !md.is_empty() => md,
        _ => return String::new(),
    };

    let mut parked = Parked::default();

    let html = blockquotes(markdown);
    let html = fenced_code(&html, &mut parked);
    let html = headers(&html);
    let html = inline_code(&html, &mut parked);
    let html = bold(&html);
    let html = lists(html);
    let html = paragraphs(&html);

    parked.restore(&html)
}

fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, |caps: &Captures| {
            format!(r#"<blockquote class="{BLOCKQUOTE_CLASS}">{}</blockquote>"#, &caps[1])
        })
        .into_owned()
}

fn fenced_code(text: &str, parked: &mut Parked) -> String {
    CODE_FENCE
        .replace_all(text, |caps: &Captures| {
            let lang = caps.get(1).map_or(PLAINTEXT_LANG, |m| m.as_str());
            let html = format!(
                r#"<pre><code class="language-{lang}">{}</code></pre>"#,
                caps[2].trim()
            );
            parked.park(FENCE_MARK, html)
        })
        .into_owned()
}

fn headers(text: &str) -> String {
    // `###` first, or `## ` would never see a level-3 line.
    let text = H3.replace_all(text, "<h3>${1}</h3>");
    H2.replace_all(&text, "<h2>${1}</h2>").into_owned()
}

fn inline_code(text: &str, parked: &mut Parked) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            parked.park(INLINE_MARK, format!("<code>{}</code>", &caps[1]))
        })
        .into_owned()
}

fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>${1}</strong>").into_owned()
}

fn lists(text: String) -> String {
    if !LIST_ITEM.is_match(&text) {
        return text;
    }

    let items: Vec<&str> = LIST_ITEM
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();

    let mut list = String::from("<ul>");
    for item in &items {
        list.push_str("<li>");
        list.push_str(item);
        list.push_str("</li>");
    }
    list.push_str("</ul>");

    let mut rest = LIST_ITEM.replace_all(&text, "").into_owned();
    if rest.trim().is_empty() {
        list
    } else {
        rest.push_str(&list);
        rest
    }
}

fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(|block| {
            if block.trim().is_empty() || is_structural(block) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block.replace('\n', "<br/>"))
            }
        })
        .collect()
}

fn is_structural(block: &str) -> bool {
    block.starts_with("<h")
        || block.starts_with("<ul")
        || block.starts_with("<blockquote")
        || block.starts_with("<pre")
        || block.starts_with(FENCE_MARK)
}

/// Rendered code held out of the text while later passes run.
#[derive(Default)]
struct Parked {
    html: Vec<String>,
}

impl Parked {
    fn park(&mut self, mark: char, html: String) -> String {
        let token = format!("{mark}{}{END_MARK}", self.html.len());
        self.html.push(html);
        token
    }

    /// Swaps placeholders back, including ones nested in parked HTML.
    fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.html.get(i))
                    .map_or_else(|| caps[0].to_string(), |html| self.restore(html))
            })
            .into_owned()
    }
}
