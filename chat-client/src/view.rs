//! HTML fragments for one exchange: the answer, its citations, or an error.
//!
//! Answer text goes through [`crate::markdown::render`] untouched. Citation
//! fields and error messages come from third parties and are escaped.

use ai_llm_service::Source;

/// Wraps the rendered answer next to the assistant avatar.
pub fn render_answer(text: &str) -> String {
    format!(
        concat!(
            r#"<div class="flex items-start gap-3 mb-4">"#,
            r#"<div class="w-8 h-8 bg-gradient-to-br from-indigo-500 to-purple-500 rounded-full flex items-center justify-center flex-shrink-0">"#,
            r#"<span class="text-white text-sm">🤖</span></div>"#,
            r#"<div class="flex-1 min-w-0">{}</div></div>"#
        ),
        crate::markdown::render(text)
    )
}

/// Numbered citation links; empty string when there are no sources.
pub fn render_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut out = String::from(concat!(
        r#"<div class="mt-8 pt-6 border-t border-gray-700/50">"#,
        r#"<h4 class="text-sm font-semibold text-indigo-400">Sources &amp; References</h4>"#,
        r#"<div class="grid gap-2">"#
    ));

    for (index, source) in sources.iter().enumerate() {
        out.push_str(&format!(
            concat!(
                r#"<a href="{uri}" target="_blank" rel="noopener noreferrer" class="group flex items-start gap-3 p-3 rounded-lg">"#,
                r#"<span class="flex-shrink-0 w-6 h-6 rounded-full text-xs font-medium">{n}</span>"#,
                r#"<div class="flex-1 min-w-0">"#,
                r#"<p class="text-sm text-gray-300 line-clamp-2">{title}</p>"#,
                r#"<p class="text-xs text-gray-500 mt-1 truncate">{host}</p>"#,
                r#"</div></a>"#
            ),
            uri = escape(&source.uri),
            n = index + 1,
            title = escape(&source.title),
            host = escape(&source_host(&source.uri)),
        ));
    }

    out.push_str("</div></div>");
    out
}

/// Error panel shown instead of an answer.
pub fn render_error_panel(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="bg-red-900/20 border border-red-700/50 p-4 rounded-xl">"#,
            r#"<h4 class="text-red-400 font-semibold mb-1">Request Failed</h4>"#,
            r#"<p class="text-red-300 text-sm mb-2">{}</p>"#,
            r#"<p class="text-xs text-red-400/70">Check your server console for details. "#,
            r#"If you see an API key error, verify your <code>.env</code> file and restart the server.</p>"#,
            r#"</div>"#
        ),
        escape(message)
    )
}

/// Host part of a citation URI, or the URI itself if it does not parse.
pub fn source_host(uri: &str) -> String {
    reqwest::Url::parse(uri)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| uri.to_string())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(uri: &str, title: &str) -> Source {
        Source {
            uri: uri.into(),
            title: title.into(),
        }
    }

    #[test]
    fn answer_contains_rendered_markdown() {
        let html = render_answer("**hi**");
        assert!(html.contains("<p><strong>hi</strong></p>"));
    }

    #[test]
    fn no_sources_renders_nothing() {
        assert_eq!(render_sources(&[]), "");
    }

    #[test]
    fn sources_are_numbered_with_host() {
        let html = render_sources(&[
            source("https://www.rust-lang.org/learn", "Learn Rust"),
            source("https://docs.rs/tokio", "tokio - Rust"),
        ]);
        assert!(html.contains(r#"href="https://www.rust-lang.org/learn""#));
        assert!(html.contains(">1</span>"));
        assert!(html.contains(">2</span>"));
        assert!(html.contains(">www.rust-lang.org</p>"));
        assert!(html.contains(">docs.rs</p>"));
        assert!(html.find("Learn Rust") < html.find("tokio - Rust"));
    }

    #[test]
    fn unparsable_uri_falls_back_to_itself() {
        assert_eq!(source_host("not a url"), "not a url");
    }

    #[test]
    fn titles_and_messages_are_escaped() {
        let html = render_sources(&[source("https://a.example", "<script>x</script>")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));

        let panel = render_error_panel("Backend returned status 502 <bad>");
        assert!(panel.contains("Backend returned status 502 &lt;bad&gt;"));
    }
}
