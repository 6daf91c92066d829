//! `If-Match` parsing and `ETag` rendering for user versions.
//!
//! Tokens may be quoted (`"3"`) or bare (`3`), optionally as a
//! comma-separated list; `*` matches any existing user. Weak tags
//! (`W/"3"`) are ignored, so a header holding only weak tags never matches.

use actix_web::HttpRequest;
use actix_web::http::header::{self, ETag, EntityTag};

use crate::domain::{Version, VersionPrecondition};

/// Parse the request's `If-Match` header.
pub fn if_match(req: &HttpRequest) -> VersionPrecondition {
    match req.headers().get(header::IF_MATCH) {
        None => VersionPrecondition::Absent,
        Some(value) => match value.to_str() {
            Ok(raw) => parse_if_match(raw),
            Err(_) => VersionPrecondition::OneOf(Vec::new()),
        },
    }
}

fn parse_if_match(raw: &str) -> VersionPrecondition {
    if raw.trim() == "*" {
        return VersionPrecondition::Any;
    }

    let tokens = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty() && !item.starts_with("W/"))
        .map(unquote)
        .map(str::to_owned)
        .collect();
    VersionPrecondition::OneOf(tokens)
}

fn unquote(item: &str) -> &str {
    item.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(item)
}

/// Strong `ETag` header carrying `version`.
pub fn etag(version: Version) -> ETag {
    ETag(EntityTag::new_strong(version.token()))
}
