//! Line-based review scan.
//!
//! A review header is a line starting with the reviewer's name followed by a
//! relative time: `alice il y a 2 mois` or `alice 2 months ago`. Any text after
//! the time expression on the header line is inline comment text; the next
//! line is appended unless it is itself a header.

use std::sync::LazyLock;

use regex::Regex;

use vintalyze_core::{find_relative_time, ReviewEvent};

static HEADER_FR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\S+)\s+il\s+y\s+a\s+(.+)$").expect("valid review header regex")
});

static HEADER_EN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\S+)\s+((?:\d+|an?|one)\s+\S+\s+ago\b.*)$")
        .expect("valid review header regex")
});

#[derive(Debug, PartialEq, Eq)]
struct Header<'a> {
    reviewer: &'a str,
    /// Everything after the reviewer and the "il y a" marker.
    rest: &'a str,
}

fn parse_header(line: &str) -> Option<Header<'_>> {
    [&*HEADER_FR_RE, &*HEADER_EN_RE].iter().find_map(|re| {
        let caps = re.captures(line)?;
        Some(Header {
            reviewer: caps.get(1)?.as_str(),
            rest: caps.get(2)?.as_str().trim(),
        })
    })
}

/// Splits `"2 mois merci parfait"` into `("2 mois", "merci parfait")`.
///
/// When no time expression opens `rest`, the whole of it is kept as the time
/// text and the inline comment is empty.
fn split_time(rest: &str) -> (String, String) {
    let Some(found) = find_relative_time(rest) else {
        return (rest.to_string(), String::new());
    };
    let start = found.end - found.text.len();
    if !rest[..start].trim().is_empty() {
        return (rest.to_string(), String::new());
    }

    let mut inline = rest[found.end..].trim_start();
    let starts_with_ago = inline.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("ago"))
        && !inline[3..].starts_with(char::is_alphanumeric);
    if starts_with_ago {
        inline = &inline[3..];
    }
    let inline = inline
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '·' | '-' | ':' | ','));
    (found.text.to_string(), inline.trim_end().to_string())
}

/// Collects review events in page order.
///
/// Headers attributed to `platform_name` (case-insensitive) or to the shop
/// itself are skipped, as is any header whose previous line mentions the shop
/// name: that is the layout of a seller's reply block.
pub(crate) fn extract_reviews(text: &str, shop_name: &str, platform_name: &str) -> Vec<ReviewEvent> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut events = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(header) = parse_header(line) else {
            continue;
        };

        if header.reviewer.eq_ignore_ascii_case(platform_name) || header.reviewer == shop_name {
            tracing::debug!(reviewer = header.reviewer, "skipping platform or seller entry");
            continue;
        }
        let follows_shop_line = i > 0 && !shop_name.is_empty() && lines[i - 1].contains(shop_name);
        if follows_shop_line {
            tracing::debug!(reviewer = header.reviewer, "skipping entry under a seller line");
            continue;
        }

        let (relative_time, inline) = split_time(header.rest);
        let follow_up = lines
            .get(i + 1)
            .copied()
            .filter(|next| !next.is_empty() && parse_header(next).is_none());

        let comment = match (inline.is_empty(), follow_up) {
            (true, None) => String::new(),
            (true, Some(next)) => next.to_string(),
            (false, None) => inline,
            (false, Some(next)) => format!("{inline} {next}"),
        };

        events.push(ReviewEvent {
            reviewer: header.reviewer.to_string(),
            relative_time,
            comment,
        });
    }

    events
}
