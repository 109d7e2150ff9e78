// HTML alt attribute reconciliation
//
// Attribute-level regex rewriting rather than a full HTML parse: img tags are
// located and rewritten in place, everything around them passes through
// untouched.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::CaptionRecord;
use crate::error::{CaptionError, Result};

/// Matches one whole img tag. Quoted attribute values may contain `>`, so
/// the tag body is matched quote-aware.
static IMG_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<img\b(?:"[^"]*"|'[^']*'|[^>"'])*>"#).expect("Invalid regex pattern")
});

/// Matches the src attribute inside one tag
static SRC_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("Invalid regex pattern")
});

/// Matches the alt attribute inside one tag
static ALT_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\balt\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).expect("Invalid regex pattern")
});

/// Cache entries whose filename matched no img element in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub unmatched: BTreeSet<String>,
}

/// Rewrite the alt attribute of every img element matched by a cached record.
///
/// For each img element, in document order, the records are scanned in cache
/// order and the first record whose filename is a substring of the element's
/// src attribute wins; that element's alt attribute is set to the record's
/// caption. Substring containment (not equality) is deliberate: documents
/// usually reference images by relative or absolute path while the cache holds
/// bare filenames. Elements without a src attribute are left untouched.
///
/// Fails with `EmptyCache` when the snapshot has no records.
pub fn apply(document: &str, snapshot: &[CaptionRecord]) -> Result<(String, MatchReport)> {
    if snapshot.is_empty() {
        return Err(CaptionError::EmptyCache);
    }

    let mut matched: BTreeSet<&str> = BTreeSet::new();
    let mut annotated = 0usize;

    let rewritten = IMG_TAG_REGEX.replace_all(document, |caps: &Captures| {
        let tag = &caps[0];
        let Some(src) = extract_src(tag) else {
            return tag.to_string();
        };
        match snapshot.iter().find(|r| src.contains(&r.filename)) {
            Some(record) => {
                matched.insert(record.filename.as_str());
                annotated += 1;
                set_alt(tag, &record.caption)
            }
            None => tag.to_string(),
        }
    });

    let unmatched: BTreeSet<String> = snapshot
        .iter()
        .filter(|r| !matched.contains(r.filename.as_str()))
        .map(|r| r.filename.clone())
        .collect();

    debug!(
        annotated,
        unmatched = unmatched.len(),
        "reconciled document against cache"
    );
    crate::metrics::record_reconciliation(annotated, unmatched.len());

    Ok((rewritten.into_owned(), MatchReport { unmatched }))
}

/// Pull the src attribute value out of a single img tag, if present.
fn extract_src(tag: &str) -> Option<&str> {
    let caps = SRC_ATTR_REGEX.captures(tag)?;
    caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)).map(|m| m.as_str())
}

/// Replace the tag's alt attribute with the caption, or insert one when the
/// tag has none. The result is always double-quoted, so re-running the
/// rewrite yields the identical tag. Insertion goes at the end of the tag,
/// after the src attribute, so a later src scan still finds the real one
/// first.
fn set_alt(tag: &str, caption: &str) -> String {
    let replacement = format!(r#"alt="{}""#, escape_attr(caption));
    if ALT_ATTR_REGEX.is_match(tag) {
        ALT_ATTR_REGEX
            .replace(tag, NoExpand(replacement.as_str()))
            .into_owned()
    } else {
        let mut out = tag.to_string();
        let close = if out.ends_with("/>") { 2 } else { 1 };
        out.insert_str(out.len() - close, &format!(" {replacement}"));
        out
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
