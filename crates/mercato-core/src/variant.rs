//! # Variant Descriptor Parser
//!
//! Converts a free-form product-variant label into a structured
//! color/size pair.
//!
//! ## Label Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  "Đỏ, M"          → color "Đỏ",  size "M"                           │
//! │  "Đỏ, size M (+1)"→ color "Đỏ",  size "size M"  (suffix stripped)   │
//! │  "M"              → size "M"     (known size token)                 │
//! │  "Đỏ"             → color "Đỏ"   (not a size token)                 │
//! │  "Xanh (+3)"      → color "Xanh" (counter suffix stripped)          │
//! │  ""  / absent     → neither                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trailing `(+N)` suffix means "N more variants" on a collapsed
//! catalog row and carries no descriptive value.
//!
//! With two or more comma segments the first is always the color and the
//! second always the size, regardless of content. Labels authored
//! size-first therefore come out swapped; that positional policy is
//! intentional and pinned by tests.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

// =============================================================================
// Size Lexicon
// =============================================================================

/// Ordered table of known size tokens, compared case-insensitively.
///
/// Data-driven so the token set can be tested and extended without touching
/// parsing control flow. Table order is display order: lexicon members sort
/// by their position here, ahead of any unknown token.
#[derive(Debug, Clone)]
pub struct SizeLexicon {
    tokens: Vec<String>,
}

impl SizeLexicon {
    /// Builds a lexicon from an ordered token list.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SizeLexicon {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `token` is a known size token (case-insensitive).
    pub fn contains(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    /// Position of `token` in the size order, if known.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.eq_ignore_ascii_case(token))
    }
}

impl Default for SizeLexicon {
    /// The storefront's apparel and footwear sizes.
    fn default() -> Self {
        SizeLexicon::new([
            "XS", "S", "M", "L", "XL", "XXL", "36", "37", "38", "39", "40", "41", "42", "Freesize",
        ])
    }
}

// =============================================================================
// Variant Descriptor
// =============================================================================

/// Parsed color/size pair derived from a raw variant label.
///
/// Derived, never persisted; recomputed on demand from the item's raw
/// `variant` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantDescriptor {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl VariantDescriptor {
    /// Descriptor with neither field set.
    pub const fn empty() -> Self {
        VariantDescriptor {
            color: None,
            size: None,
        }
    }

    /// Recombines the non-null fields into a label ("color, size").
    ///
    /// Parsing the joined form yields this descriptor back (idempotence).
    pub fn join(&self) -> String {
        match (&self.color, &self.size) {
            (Some(color), Some(size)) => format!("{}, {}", color, size),
            (Some(color), None) => color.clone(),
            (None, Some(size)) => size.clone(),
            (None, None) => String::new(),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Strips one trailing "(+N)" counter suffix, if present.
fn strip_counter_suffix(label: &str) -> &str {
    let trimmed = label.trim_end();
    let Some(body) = trimmed.strip_suffix(')') else {
        return label;
    };
    let Some(open) = body.rfind("(+") else {
        return label;
    };
    let digits = &body[open + 2..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return label;
    }
    trimmed[..open].trim_end()
}

/// Parses a raw variant label into a [`VariantDescriptor`].
///
/// ## Rules
/// - One trailing "(+N)" counter suffix is stripped first.
/// - Segments are comma-separated and trimmed; empty segments are dropped.
/// - No segments → neither field.
/// - One segment → size if the lexicon knows it, otherwise color.
/// - Two or more → first is color, second is size, the rest are ignored.
///
/// Pure function of the input and the lexicon; idempotent under re-parse
/// of [`VariantDescriptor::join`]'s output.
pub fn parse(raw: Option<&str>, lexicon: &SizeLexicon) -> VariantDescriptor {
    let Some(raw) = raw else {
        return VariantDescriptor::empty();
    };

    let sanitized = strip_counter_suffix(raw);
    let segments: Vec<&str> = sanitized
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        [] => VariantDescriptor::empty(),
        [only] => {
            if lexicon.contains(only) {
                VariantDescriptor {
                    color: None,
                    size: Some((*only).to_string()),
                }
            } else {
                VariantDescriptor {
                    color: Some((*only).to_string()),
                    size: None,
                }
            }
        }
        [color, size, ..] => VariantDescriptor {
            color: Some((*color).to_string()),
            size: Some((*size).to_string()),
        },
    }
}

// =============================================================================
// Catalog Derivation
// =============================================================================

/// Size ordering: lexicon order first, then numeric, then lexical.
/// Lexicon members sort ahead of unknown tokens.
pub fn compare_sizes(a: &str, b: &str, lexicon: &SizeLexicon) -> Ordering {
    match (lexicon.position(a), lexicon.position(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        },
    }
}

/// Distinct colors, distinct sizes, and the color → available-sizes map
/// derived from a product's full variant catalog.
///
/// Colors keep first-seen order; sizes (overall and per color) are sorted
/// by [`compare_sizes`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantOptions {
    colors: Vec<String>,
    sizes: Vec<String>,
    sizes_by_color: Vec<(String, Vec<String>)>,
}

impl VariantOptions {
    /// Applies the parser to every catalog label and groups the results.
    pub fn from_labels<'a, I>(labels: I, lexicon: &SizeLexicon) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut options = VariantOptions::default();

        for label in labels {
            let descriptor = parse(Some(label), lexicon);

            if let Some(size) = &descriptor.size {
                if !options.sizes.contains(size) {
                    options.sizes.push(size.clone());
                }
            }

            if let Some(color) = &descriptor.color {
                if !options.colors.contains(color) {
                    options.colors.push(color.clone());
                    options.sizes_by_color.push((color.clone(), Vec::new()));
                }
                if let Some(size) = &descriptor.size {
                    let entry = options
                        .sizes_by_color
                        .iter_mut()
                        .find(|(c, _)| c == color)
                        .map(|(_, sizes)| sizes);
                    if let Some(sizes) = entry {
                        if !sizes.contains(size) {
                            sizes.push(size.clone());
                        }
                    }
                }
            }
        }

        options.sizes.sort_by(|a, b| compare_sizes(a, b, lexicon));
        for (_, sizes) in &mut options.sizes_by_color {
            sizes.sort_by(|a, b| compare_sizes(a, b, lexicon));
        }

        options
    }

    /// Distinct colors in first-seen order.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Distinct sizes in size order.
    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    /// Sizes available for one color, in size order.
    pub fn sizes_for(&self, color: &str) -> &[String] {
        self.sizes_by_color
            .iter()
            .find(|(c, _)| c == color)
            .map(|(_, sizes)| sizes.as_slice())
            .unwrap_or(&[])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> SizeLexicon {
        SizeLexicon::default()
    }

    fn descriptor(color: Option<&str>, size: Option<&str>) -> VariantDescriptor {
        VariantDescriptor {
            color: color.map(str::to_string),
            size: size.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_color_and_size() {
        assert_eq!(parse(Some("Đỏ, M"), &lex()), descriptor(Some("Đỏ"), Some("M")));
    }

    #[test]
    fn test_parse_single_size_token() {
        assert_eq!(parse(Some("M"), &lex()), descriptor(None, Some("M")));
        assert_eq!(parse(Some("freesize"), &lex()), descriptor(None, Some("freesize")));
        assert_eq!(parse(Some("38"), &lex()), descriptor(None, Some("38")));
    }

    #[test]
    fn test_parse_single_color_token() {
        assert_eq!(parse(Some("Đỏ"), &lex()), descriptor(Some("Đỏ"), None));
    }

    #[test]
    fn test_parse_strips_counter_suffix() {
        assert_eq!(parse(Some("Xanh (+3)"), &lex()), descriptor(Some("Xanh"), None));
        assert_eq!(
            parse(Some("Đỏ, size M (+1)"), &lex()),
            descriptor(Some("Đỏ"), Some("size M"))
        );
        // Not a counter suffix: no digits.
        assert_eq!(parse(Some("Xanh (+)"), &lex()), descriptor(Some("Xanh (+)"), None));
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert_eq!(parse(None, &lex()), VariantDescriptor::empty());
        assert_eq!(parse(Some(""), &lex()), VariantDescriptor::empty());
        assert_eq!(parse(Some("  ,  "), &lex()), VariantDescriptor::empty());
    }

    #[test]
    fn test_parse_extra_segments_ignored() {
        assert_eq!(
            parse(Some("Đen, XL, cotton"), &lex()),
            descriptor(Some("Đen"), Some("XL"))
        );
    }

    /// Two-plus-segment labels are positional by policy: first segment is
    /// the color even when it looks like a size.
    #[test]
    fn test_parse_positional_policy_pinned() {
        assert_eq!(parse(Some("M, Đỏ"), &lex()), descriptor(Some("M"), Some("Đỏ")));
    }

    #[test]
    fn test_parse_idempotent_under_rejoin() {
        let samples = [
            "Đỏ, M",
            "M",
            "Đỏ",
            "Xanh (+3)",
            "Đen, XL, cotton",
            "  Trắng ,  L  ",
            "40",
            "",
        ];
        for raw in samples {
            let first = parse(Some(raw), &lex());
            let second = parse(Some(&first.join()), &lex());
            assert_eq!(first, second, "re-parse of join({:?}) diverged", raw);
        }
    }

    #[test]
    fn test_variant_options_grouping() {
        let labels = [
            "Đỏ, M",
            "Đỏ, S",
            "Xanh, M",
            "Xanh, 38",
            "Đỏ, M (+2)",
            "Trắng",
        ];
        let options = VariantOptions::from_labels(labels, &lex());

        assert_eq!(options.colors(), ["Đỏ", "Xanh", "Trắng"]);
        // Lexicon order: S, M before numeric member 38.
        assert_eq!(options.sizes(), ["S", "M", "38"]);
        assert_eq!(options.sizes_for("Đỏ"), ["S", "M"]);
        assert_eq!(options.sizes_for("Xanh"), ["M", "38"]);
        assert!(options.sizes_for("Trắng").is_empty());
        assert!(options.sizes_for("Vàng").is_empty());
    }

    #[test]
    fn test_size_sort_fallbacks() {
        let lexicon = lex();
        let mut sizes = vec![
            "45".to_string(),      // numeric, unknown to the lexicon
            "M".to_string(),       // lexicon
            "Oversize".to_string(), // lexical fallback
            "43".to_string(),      // numeric, unknown to the lexicon
            "XS".to_string(),      // lexicon
        ];
        sizes.sort_by(|a, b| compare_sizes(a, b, &lexicon));
        assert_eq!(sizes, ["XS", "M", "43", "45", "Oversize"]);
    }
}
