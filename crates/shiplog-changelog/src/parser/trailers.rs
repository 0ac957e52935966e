//! Commit body and trailer block splitting

use regex::Regex;
use std::sync::LazyLock;

/// Regex for the first line of a trailer
static TRAILER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[A-Z]\w+(?:-\w+)*):\s+(?P<value>.*)$").expect("Invalid regex")
});

/// A `Key: value` trailer; continuation lines are joined with newlines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
    pub value: String,
}

/// A commit body split into free text and its trailing trailer block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitBody {
    pub paragraphs: Vec<String>,
    pub trailers: Vec<Trailer>,
}

/// Split a full message into its subject and body at the first blank line.
///
/// Subject lines are joined with single spaces.
pub fn split_message(message: &str) -> (String, String) {
    let mut lines = message.lines();
    let mut subject = Vec::new();

    for line in lines.by_ref() {
        if line.trim().is_empty() {
            if subject.is_empty() {
                continue;
            }
            break;
        }
        subject.push(line.trim());
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    (subject.join(" "), body.trim().to_string())
}

/// Split a body into paragraphs and the trailer block of its last paragraph
pub fn split_body(body: &str) -> SplitBody {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let mut trailers = Vec::new();
    if let Some(last) = paragraphs.last_mut() {
        if let Some(start) = trailer_block_start(last) {
            trailers = parse_trailers(&last[start..]);
            last.truncate(start);
        }
        if last.is_empty() {
            paragraphs.pop();
        }
    }

    SplitBody {
        paragraphs: paragraphs.into_iter().map(|p| p.join("\n")).collect(),
        trailers,
    }
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// Index of the first line of the longest trailing trailer block
fn trailer_block_start(lines: &[&str]) -> Option<usize> {
    (0..lines.len()).find(|&i| {
        TRAILER_REGEX.is_match(lines[i])
            && lines[i + 1..]
                .iter()
                .all(|l| TRAILER_REGEX.is_match(l) || is_continuation(l))
    })
}

fn parse_trailers(lines: &[&str]) -> Vec<Trailer> {
    let mut entries: Vec<(Trailer, Vec<&str>)> = Vec::new();

    for line in lines {
        if is_continuation(line) {
            if let Some((_, continuation)) = entries.last_mut() {
                continuation.push(line);
            }
        } else if let Some(caps) = TRAILER_REGEX.captures(line) {
            entries.push((
                Trailer {
                    key: caps["key"].to_string(),
                    value: caps["value"].trim().to_string(),
                },
                Vec::new(),
            ));
        }
    }

    entries
        .into_iter()
        .map(|(mut trailer, continuation)| {
            if !continuation.is_empty() {
                trailer.value.push('\n');
                trailer.value.push_str(&textwrap::dedent(&continuation.join("\n")));
            }
            trailer
        })
        .collect()
}
