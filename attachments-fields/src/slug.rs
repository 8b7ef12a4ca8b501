//! Slug normalization for field names, field types and instance names.
//!
//! A slug contains only `[a-z0-9_-]`, never starts or ends with `-` and never
//! contains `--`. Every other character (whitespace, punctuation, non-ASCII)
//! collapses into a single `-` separator.

const SEPARATOR: char = '-';

/// Normalize free-form text into a lowercase identifier.
///
/// `slugify(slugify(x)) == slugify(x)` for every input.
///
/// ```
/// use attachments_fields::slugify;
///
/// assert_eq!(slugify("Featured Image"), "featured-image");
/// assert_eq!(slugify("  Body -- Copy!  "), "body-copy");
/// assert_eq!(slugify("snake_case"), "snake_case");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Normalize an instance or category name into a map key.
///
/// Same as [`slugify`] with hyphens turned into underscores, so
/// `"Featured-Images"` and `"featured images"` both become `featured_images`.
pub fn instance_key(input: &str) -> String {
    slugify(input).replace(SEPARATOR, "_")
}
