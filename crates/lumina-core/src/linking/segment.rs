//! Interval-claiming text segmenter.
//!
//! Products are processed in catalog order. For each product, every still
//! unclaimed gap of the text is scanned left to right for case-insensitive,
//! literal occurrences of the product name (no word-boundary rule, so a name
//! inside a longer word still matches). Each occurrence claims its byte span.
//! Claimed spans are never scanned again, which makes the earliest catalog
//! product win whenever names nest or overlap.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product, ProductId};

/// One fragment of segmented text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text
    Text { text: String },
    /// A product mention. `text` is the substring exactly as it appeared.
    Product { product_id: ProductId, text: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text } | Segment::Product { text, .. } => text,
        }
    }

    pub fn product_id(&self) -> Option<&str> {
        match self {
            Segment::Text { .. } => None,
            Segment::Product { product_id, .. } => Some(product_id),
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, Segment::Product { .. })
    }

    /// The product a reference segment points at.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Option<&'a Product> {
        self.product_id().and_then(|id| catalog.get(id))
    }
}

/// A span of the input claimed by one product.
#[derive(Debug, Clone, Copy)]
struct Claim {
    start: usize,
    end: usize,
    product: usize,
}

/// Segments `text` against the catalog.
pub fn segment(text: &str, catalog: &Catalog) -> Vec<Segment> {
    segment_products(text, catalog.products())
}

/// Segments `text` against an ordered product list.
///
/// Concatenating the returned fragment texts always reproduces `text`. Text
/// without any mention (including the empty string) comes back as a single
/// plain fragment.
pub fn segment_products(text: &str, products: &[Product]) -> Vec<Segment> {
    let mut claims: Vec<Claim> = Vec::new();

    for (index, product) in products.iter().enumerate() {
        let needle: Vec<char> = product.name.chars().map(fold).collect();
        if needle.is_empty() {
            continue;
        }

        let mut found = Vec::new();
        for (gap_start, gap_end) in gaps(&claims, text.len()) {
            for (start, end) in find_all(text, gap_start, gap_end, &needle) {
                found.push(Claim {
                    start,
                    end,
                    product: index,
                });
            }
        }

        if !found.is_empty() {
            claims.extend(found);
            claims.sort_by_key(|claim| claim.start);
        }
    }

    let mut segments = Vec::with_capacity(claims.len() * 2 + 1);
    let mut cursor = 0;
    for claim in &claims {
        if claim.start > cursor {
            segments.push(Segment::Text {
                text: text[cursor..claim.start].to_string(),
            });
        }
        segments.push(Segment::Product {
            product_id: products[claim.product].id.clone(),
            text: text[claim.start..claim.end].to_string(),
        });
        cursor = claim.end;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment::Text {
            text: text[cursor..].to_string(),
        });
    }

    tracing::debug!(
        "Segmented {} bytes into {} fragments ({} product mentions)",
        text.len(),
        segments.len(),
        claims.len()
    );
    segments
}

/// Concatenates fragment texts.
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Distinct product ids referenced by the segments, in first-mention order.
pub fn linked_product_ids(segments: &[Segment]) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::new();
    for id in segments.iter().filter_map(Segment::product_id) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Unclaimed `[start, end)` ranges between sorted claims.
fn gaps(claims: &[Claim], len: usize) -> Vec<(usize, usize)> {
    let mut gaps = Vec::with_capacity(claims.len() + 1);
    let mut cursor = 0;
    for claim in claims {
        if claim.start > cursor {
            gaps.push((cursor, claim.start));
        }
        cursor = claim.end;
    }
    if cursor < len {
        gaps.push((cursor, len));
    }
    gaps
}

/// Non-overlapping occurrences of `needle` inside `text[from..to]`.
fn find_all(text: &str, from: usize, to: usize, needle: &[char]) -> Vec<(usize, usize)> {
    let gap = &text[from..to];
    let mut found = Vec::new();
    let mut cursor = 0;

    while cursor < gap.len() {
        match match_len(&gap[cursor..], needle) {
            Some(len) => {
                found.push((from + cursor, from + cursor + len));
                cursor += len;
            }
            None => {
                cursor += gap[cursor..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    found
}

/// Byte length of the prefix of `haystack` matching `needle`, if any.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for &wanted in needle {
        let (_, c) = chars.next()?;
        if fold(c) != wanted {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(index, _)| index))
}

/// Simple one-to-one case folding. Characters whose lowercase form expands to
/// several characters compare as themselves.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
