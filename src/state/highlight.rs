//! Query highlighting for rendered matches.

use regex::RegexBuilder;

/// A run of text that is either emphasized (matches the query) or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text of this run.
    pub text: &'a str,
    /// True when the run equals the query, ignoring case.
    pub emphasized: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasized: false,
        }
    }

    fn mark(text: &'a str) -> Self {
        Self {
            text,
            emphasized: true,
        }
    }
}

/// Split `text` into plain and emphasized runs for every case-insensitive
/// occurrence of `query`.
///
/// The query is matched literally: regex metacharacters such as `+` or `(`
/// are escaped before the pattern is built.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::debug!(%err, query, "highlight pattern rejected");
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::plain(&text[cursor..found.start()]));
        }
        segments.push(Segment::mark(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn marks_case_insensitive_occurrence() {
        let segments = highlight("Acme Corp", "acme");
        assert_eq!(
            segments,
            vec![Segment::mark("Acme"), Segment::plain(" Corp")]
        );
    }

    #[test]
    fn marks_every_occurrence() {
        let segments = highlight("abcABCabc", "abc");
        assert_eq!(marked(&segments), vec!["abc", "ABC", "abc"]);
        assert!(segments.iter().all(|s| s.emphasized));
    }

    #[test]
    fn metacharacters_are_literal() {
        let segments = highlight("a+b and aab", "a+b");
        assert_eq!(marked(&segments), vec!["a+b"]);

        let segments = highlight("price (usd) [net]", "(usd) [");
        assert_eq!(marked(&segments), vec!["(usd) ["]);

        let segments = highlight("no match here", ".*");
        assert!(marked(&segments).is_empty());
    }

    #[test]
    fn no_match_returns_whole_text_plain() {
        assert_eq!(highlight("Globex", "acme"), vec![Segment::plain("Globex")]);
    }

    #[test]
    fn empty_inputs() {
        assert!(highlight("", "acme").is_empty());
        assert_eq!(highlight("Acme", ""), vec![Segment::plain("Acme")]);
    }

    #[test]
    fn segments_reassemble_original_text() {
        let text = "Acme acme ACME corp";
        let joined: String = highlight(text, "aCmE").iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }
}
