//! Splitting message text into plain and tappable spans.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<url>(?:https?://|www\.)[^\s<>]*[^\s<>.,;:!?'\)\]])",
        r"|(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,})",
    ))
    .expect("link pattern is valid")
});

/// What a tappable span points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A web address.
    Url,
    /// An email address, opened through a `mailto:` target.
    Email,
}

/// A run of message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "span", rename_all = "snake_case")]
pub enum TextSpan {
    /// Text shown as-is.
    Plain {
        /// The text.
        text: String,
    },
    /// Text that opens `target` when tapped.
    Link {
        /// The text as it appeared in the message.
        text: String,
        /// The target handed to the link opener.
        target: String,
        /// Kind of link.
        kind: LinkKind,
    },
}

impl TextSpan {
    /// Returns the text of the span.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } | Self::Link { text, .. } => text,
        }
    }

    /// Returns the link target, if the span is tappable.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Plain { .. } => None,
            Self::Link { target, .. } => Some(target),
        }
    }
}

/// Splits `text` into plain spans and link spans.
///
/// Web addresses keep their text as the target (a bare `www.` address gains
/// an `https://` scheme). Email addresses target `mailto:<address>`.
/// Concatenating the span texts reproduces `text`.
///
/// # Examples
///
/// ```
/// use exchange_chat::timeline::domain::linkify;
///
/// let spans = linkify("visit https://example.com or mail me@x.com");
/// let targets: Vec<_> = spans.iter().filter_map(|s| s.target()).collect();
/// assert_eq!(targets, ["https://example.com", "mailto:me@x.com"]);
/// ```
#[must_use]
pub fn linkify(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for captures in LINK_PATTERN.captures_iter(text) {
        let (matched, kind) = match (captures.name("url"), captures.name("email")) {
            (Some(url), _) => (url, LinkKind::Url),
            (None, Some(email)) => (email, LinkKind::Email),
            (None, None) => continue,
        };

        if let Some(before) = text.get(cursor..matched.start())
            && !before.is_empty()
        {
            spans.push(TextSpan::Plain {
                text: before.to_owned(),
            });
        }

        let link_text = matched.as_str();
        spans.push(TextSpan::Link {
            text: link_text.to_owned(),
            target: link_target(link_text, kind),
            kind,
        });
        cursor = matched.end();
    }

    if let Some(rest) = text.get(cursor..)
        && !rest.is_empty()
    {
        spans.push(TextSpan::Plain {
            text: rest.to_owned(),
        });
    }

    spans
}

fn link_target(text: &str, kind: LinkKind) -> String {
    match kind {
        LinkKind::Email => format!("mailto:{text}"),
        LinkKind::Url if text.starts_with("www.") => format!("https://{text}"),
        LinkKind::Url => text.to_owned(),
    }
}
