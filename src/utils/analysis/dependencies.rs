//! Import/export extraction and specifier resolution
//!
//! Extraction is textual, not semantic. The patterns do not understand
//! comments, template literals or regex literals, so an import-shaped string
//! inside any of those is reported as a real import, and a dynamic
//! `import("x")` is never reported. Callers treat results as advisory.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ContextConfig;
use crate::core::DEFAULT_EXPORT;

lazy_static! {
    // import x from "m" / import { a, b } from 'm' / import type T from "m" / import "m"
    static ref IMPORT: Regex =
        Regex::new(r#"\bimport\s+(?:[\w*{}\s,$]+?\s+from\s+)?["']([^"'\n]+)["']"#).unwrap();
    // export const|function|class|interface|type|enum Name
    static ref NAMED_EXPORT: Regex = Regex::new(
        r"\bexport\s+(?:declare\s+)?(?:async\s+)?(?:abstract\s+)?(?:const|let|var|function\*?|class|interface|type|enum)\s+([A-Za-z_$][\w$]*)"
    ).unwrap();
    static ref DEFAULT: Regex = Regex::new(r"\bexport\s+default\b").unwrap();
}

/// Extracts module specifiers from import statements, in textual order.
/// Duplicates are kept.
pub fn extract_imports(content: &str) -> Vec<String> {
    IMPORT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts exported declaration names, plus `"default"` for a default export.
pub fn extract_exports(content: &str) -> Vec<String> {
    let mut exports: Vec<String> = NAMED_EXPORT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    if DEFAULT.is_match(content) {
        exports.push(DEFAULT_EXPORT.to_string());
    }
    exports
}

/// Outcome of resolving one raw specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Project-local path; a known file when one matched, otherwise the
    /// lexically normalized path
    Local(String),
    /// Package import or a path escaping the project root
    External,
}

/// Heuristic resolution of a specifier written in `importer` to a
/// root-relative path.
///
/// Alias and relative specifiers are joined and normalized, then matched
/// against `known` as written, with each configured extension, and as a
/// directory `index` file.
pub fn resolve_import(
    specifier: &str,
    importer: &str,
    config: &ContextConfig,
    known: &HashSet<&str>,
) -> Resolution {
    let joined = if !config.alias_prefix.is_empty() && specifier.starts_with(&config.alias_prefix)
    {
        let rest = &specifier[config.alias_prefix.len()..];
        if config.alias_target.is_empty() {
            rest.to_string()
        } else {
            format!("{}/{}", config.alias_target.trim_end_matches('/'), rest)
        }
    } else if is_relative(specifier) {
        match importer.rsplit_once('/') {
            Some((dir, _)) => format!("{}/{}", dir, specifier),
            None => specifier.to_string(),
        }
    } else {
        return Resolution::External;
    };

    let Some(base) = normalize(&joined) else {
        return Resolution::External;
    };

    if known.contains(base.as_str()) {
        return Resolution::Local(base);
    }
    for ext in &config.extensions {
        let candidate = format!("{}.{}", base, ext);
        if known.contains(candidate.as_str()) {
            return Resolution::Local(candidate);
        }
    }
    for ext in &config.extensions {
        let candidate = if base.is_empty() {
            format!("index.{}", ext)
        } else {
            format!("{}/index.{}", base, ext)
        };
        if known.contains(candidate.as_str()) {
            return Resolution::Local(candidate);
        }
    }

    Resolution::Local(base)
}

fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Collapse `.` and `..` segments. Returns `None` when the path climbs above
/// the root.
fn normalize(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known<'a>(paths: &[&'a str]) -> HashSet<&'a str> {
        paths.iter().copied().collect()
    }

    #[test]
    fn test_extract_imports_in_order_with_duplicates() {
        let code = r#"
            import React from "react";
            import { Button } from '@/components/ui/button';
            import type { Booking } from "../types/booking";
            import "./globals.css";
            import * as z from "zod";
            import {
                formatDate,
                formatPrice,
            } from "@/lib/format";
            import React2 from "react";
        "#;
        let imports = extract_imports(code);
        assert_eq!(
            imports,
            vec![
                "react",
                "@/components/ui/button",
                "../types/booking",
                "./globals.css",
                "zod",
                "@/lib/format",
                "react",
            ]
        );
    }

    #[test]
    fn test_dynamic_import_is_not_extracted() {
        let imports = extract_imports(r#"const Map = await import("./map");"#);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_import_in_comment_is_a_known_false_positive() {
        // Textual extraction: commented-out imports still count.
        let imports = extract_imports("// import { old } from './legacy'");
        assert_eq!(imports, vec!["./legacy"]);
    }

    #[test]
    fn test_extract_exports() {
        let code = r#"
            export const supabase = createClient();
            export function formatPrice(cents: number) {}
            export async function fetchDrivers() {}
            export class InvoiceBuilder {}
            export interface Driver { id: string }
            export type BookingStatus = "open" | "closed";
            export enum Currency { EUR, USD }
            export default function Page() {}
            const notExported = 1;
        "#;
        let exports = extract_exports(code);
        for name in [
            "supabase",
            "formatPrice",
            "fetchDrivers",
            "InvoiceBuilder",
            "Driver",
            "BookingStatus",
            "Currency",
            "default",
        ] {
            assert!(exports.contains(&name.to_string()), "missing {}", name);
        }
        assert!(!exports.contains(&"notExported".to_string()));
        assert!(!exports.contains(&"Page".to_string()));
    }

    #[test]
    fn test_resolve_relative_and_alias() {
        let config = ContextConfig::default();
        let files = known(&["lib/utils.ts", "components/ui/button.tsx", "lib/db/index.ts"]);

        assert_eq!(
            resolve_import("./utils", "lib/format.ts", &config, &files),
            Resolution::Local("lib/utils.ts".into())
        );
        assert_eq!(
            resolve_import("@/components/ui/button", "app/page.tsx", &config, &files),
            Resolution::Local("components/ui/button.tsx".into())
        );
        assert_eq!(
            resolve_import("../lib/db", "app/page.tsx", &config, &files),
            Resolution::Local("lib/db/index.ts".into())
        );
    }

    #[test]
    fn test_resolve_untracked_local_keeps_normalized_path() {
        let config = ContextConfig::default();
        let files = known(&["app/page.tsx"]);
        assert_eq!(
            resolve_import("./globals.css", "app/layout.tsx", &config, &files),
            Resolution::Local("app/globals.css".into())
        );
    }

    #[test]
    fn test_resolve_external_and_escaping() {
        let config = ContextConfig::default();
        let files = known(&[]);
        assert_eq!(
            resolve_import("react", "app/page.tsx", &config, &files),
            Resolution::External
        );
        assert_eq!(
            resolve_import("../../outside", "app/page.tsx", &config, &files),
            Resolution::External
        );
    }

    #[test]
    fn test_alias_target_directory() {
        let config = ContextConfig {
            alias_target: "src".into(),
            ..ContextConfig::default()
        };
        let files = known(&["src/lib/db.ts"]);
        assert_eq!(
            resolve_import("@/lib/db", "src/app/page.tsx", &config, &files),
            Resolution::Local("src/lib/db.ts".into())
        );
    }
}
