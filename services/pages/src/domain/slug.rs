//! URL slug normalization.
//!
//! The normalization and the `base`, `base-1`, `base-2`, … collision
//! tie-break are an observable URL-stability contract inherited from the
//! legacy site; do not change either.

/// Normalize a title into a slug: lowercase, every character outside
/// `[a-z0-9-]` replaced with `-`, runs of `-` collapsed, edges trimmed.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut last_was_dash = false;
    for c in lowered.chars() {
        let mapped = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            c
        } else {
            '-'
        };
        if mapped == '-' {
            if !last_was_dash {
                slug.push('-');
            }
            last_was_dash = true;
        } else {
            slug.push(mapped);
            last_was_dash = false;
        }
    }
    slug.trim_matches('-').to_owned()
}

/// Candidate slugs in probe order: `base`, `base-1`, `base-2`, …
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (0u32..).map(move |n| {
        if n == 0 {
            base.to_owned()
        } else {
            format!("{base}-{n}")
        }
    })
}
