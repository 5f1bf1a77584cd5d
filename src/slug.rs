//! Title → URL slug conversion.

/// Converts a title into a URL-friendly slug.
///
/// The title is lowercased and every character outside `[a-z0-9 -]` is
/// dropped. Runs of spaces and hyphens collapse into a single `-`, and the
/// result never starts or ends with one.
///
/// ```rust
/// use quill::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("a   b"), "a-b");
/// assert_eq!(slugify("!!!"), "");
/// ```
///
/// Two titles may map to the same slug, and a title made only of
/// punctuation maps to the empty string.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        match c {
            'a'..='z' | '0'..='9' => {
                // Pending separators are only emitted between two kept
                // characters, which trims both ends for free.
                if separator && !slug.is_empty() {
                    slug.push('-');
                }
                separator = false;
                slug.push(c);
            }
            ' ' | '-' => separator = true,
            _ => {}
        }
    }

    slug
}
