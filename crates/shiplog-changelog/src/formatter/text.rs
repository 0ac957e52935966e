//! Plain text layout helpers

/// Word wrap to `width` columns; words longer than a line are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// A title line followed by an underline of the same width
pub fn underline(label: &str, ch: char) -> String {
    let label = label.trim();
    let rule: String = std::iter::repeat(ch).take(label.chars().count()).collect();
    format!("{}\n{}\n", label, rule)
}

/// `subject [author, author]`
pub fn attributed(subject: &str, authors: &[String]) -> String {
    format!("{} [{}]", subject, authors.join(", "))
}
