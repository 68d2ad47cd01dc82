//! File-system route extraction

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ContextConfig;
use crate::core::{RouteKind, RouteRecord};

lazy_static! {
    // [id], [...slug], [[...slug]]
    static ref DYNAMIC_SEGMENT: Regex = Regex::new(r"\[+(?:\.\.\.)?([^\[\]]+)\]+").unwrap();
}

/// Filename stems that name the route they live in rather than a segment
const ROUTE_FILES: &[&str] = &["page", "route", "layout"];

/// Derive the route for a file under the routing root, or `None` when the
/// file lies outside it.
pub fn extract_route(path: &str, config: &ContextConfig) -> Option<RouteRecord> {
    let routing_root = config.routing_root.trim_matches('/');
    let rest = if routing_root.is_empty() {
        path
    } else {
        path.strip_prefix(routing_root)?.strip_prefix('/')?
    };

    let (dir, filename) = match rest.rsplit_once('/') {
        Some((dir, filename)) => (dir, filename),
        None => ("", rest),
    };
    let stem = filename.split('.').next().unwrap_or(filename);

    let api_root = config.api_root.trim_matches('/');
    let under_api = !api_root.is_empty()
        && path
            .strip_prefix(api_root)
            .is_some_and(|r| r.starts_with('/'));
    let kind = if under_api || stem == "route" {
        RouteKind::Api
    } else if stem == "layout" {
        RouteKind::Layout
    } else {
        RouteKind::Page
    };

    let raw = if ROUTE_FILES.contains(&stem) {
        dir.to_string()
    } else if dir.is_empty() {
        stem.to_string()
    } else {
        format!("{}/{}", dir, stem)
    };

    let is_dynamic = raw.contains('[');
    let rewritten = DYNAMIC_SEGMENT.replace_all(&raw, ":$1");

    Some(RouteRecord {
        route_path: format!("/{}", rewritten),
        file: path.to_string(),
        kind,
        is_dynamic,
    })
}
