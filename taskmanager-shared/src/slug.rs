//! URL-safe slug generation for usernames and task titles.
//!
//! Non-ASCII text is transliterated to its closest ASCII spelling first, so
//! `"Jöhn Doe"` and `"John Doe"` share the slug `"john-doe"`. The output only
//! ever contains `[a-z0-9-]` and never starts or ends with a hyphen.

/// Derives a slug from arbitrary text.
///
/// Apostrophes and commas between digits are dropped (`"it's"` becomes
/// `"its"`, `"1,000"` becomes `"1000"`); every other run of non-alphanumeric
/// characters becomes a single hyphen.
///
/// # Example
///
/// ```
/// use taskmanager_shared::slug::slugify;
///
/// assert_eq!(slugify("Jöhn Doe"), "john-doe");
/// assert_eq!(slugify("  Buy milk, eggs & bread!  "), "buy-milk-eggs-bread");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    let chars: Vec<char> = ascii.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '\'' {
            continue;
        }

        // Thousands separator: "1,000" reads as "1000"
        if c == ','
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit())
        {
            continue;
        }

        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
