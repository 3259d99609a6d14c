//! Citation extraction from Gemini grounding attributions.

use std::collections::HashSet;

use crate::{conversation::Source, services::gemini_payload::WebAttribution};

/// Keeps attributions that carry both a non-empty `uri` and `title`, then
/// deduplicates by `uri`. The first occurrence wins, both for position and
/// for the title that is kept.
pub fn collect_sources<'a, I>(attributions: I) -> Vec<Source>
where
    I: IntoIterator<Item = &'a WebAttribution>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for web in attributions {
        let (Some(uri), Some(title)) = (non_empty(&web.uri), non_empty(&web.title)) else {
            continue;
        };
        if seen.insert(uri) {
            out.push(Source {
                uri: uri.to_string(),
                title: title.to_string(),
            });
        }
    }

    out
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}
