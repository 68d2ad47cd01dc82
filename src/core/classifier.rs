//! Path-based file classification
//!
//! Rules are checked in a fixed order and the first match wins, since the
//! prefixes overlap (`app/api/users/route.ts` is both under the routing root
//! and an API handler).

use super::Role;
use crate::config::ContextConfig;

/// Pages-router API directory, recognized alongside the configured API root
const PAGES_API_ROOT: &str = "pages/api";

/// Classify a root-relative, forward-slash path into a semantic role.
///
/// A leading `src/` is ignored so `src/components/x.tsx` and
/// `components/x.tsx` classify the same way. The API root comes from
/// `config.api_root` and is matched against both forms of the path.
pub fn classify(path: &str, config: &ContextConfig) -> Role {
    let full = path.trim_start_matches("./");
    let path = full.strip_prefix("src/").unwrap_or(full);
    let slashed = format!("/{}", path);
    let basename = path.rsplit('/').next().unwrap_or(path);
    let api_roots = [config.api_root.trim_matches('/'), PAGES_API_ROOT];

    if slashed.contains("/page.") {
        Role::Page
    } else if slashed.contains("/route.")
        || is_under(full, &api_roots)
        || is_under(path, &api_roots)
    {
        Role::ApiRoute
    } else if is_under(path, &["components"]) {
        Role::Component
    } else if is_under(path, &["hooks"]) || is_hook_name(basename) {
        Role::Hook
    } else if is_under(path, &["lib", "utils"]) {
        Role::Utility
    } else if is_under(path, &["types"]) || path.ends_with(".d.ts") {
        Role::Type
    } else if path.contains("config") {
        Role::Config
    } else if path.contains(".test.") || path.contains(".spec.") || path.contains("__tests__") {
        Role::Test
    } else {
        Role::Other
    }
}

fn is_under(path: &str, roots: &[&str]) -> bool {
    roots.iter().filter(|root| !root.is_empty()).any(|root| {
        path.strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// `useAuth.ts`, `use-toast.ts` and `use_store.ts` are hooks; `user.ts` is not.
fn is_hook_name(basename: &str) -> bool {
    basename
        .strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(path: &str) -> Role {
        classify(path, &ContextConfig::default())
    }

    #[test]
    fn test_page_and_api_routes() {
        assert_eq!(role("app/page.tsx"), Role::Page);
        assert_eq!(role("app/bookings/[id]/page.tsx"), Role::Page);
        assert_eq!(role("app/api/bookings/route.ts"), Role::ApiRoute);
        assert_eq!(role("app/webhooks/route.ts"), Role::ApiRoute);
        assert_eq!(role("app/api/helpers.ts"), Role::ApiRoute);
    }

    #[test]
    fn test_page_marker_wins_over_directory_roots() {
        // components/ would match rule 3, but the page marker is checked first
        assert_eq!(role("components/page.tsx"), Role::Page);
    }

    #[test]
    fn test_directory_roots() {
        assert_eq!(role("components/ui/button.tsx"), Role::Component);
        assert_eq!(role("hooks/useBookings.ts"), Role::Hook);
        assert_eq!(role("lib/supabase.ts"), Role::Utility);
        assert_eq!(role("utils/format.ts"), Role::Utility);
        assert_eq!(role("types/database.ts"), Role::Type);
        assert_eq!(role("src/components/nav.tsx"), Role::Component);
    }

    #[test]
    fn test_hook_naming_convention() {
        assert_eq!(role("app/useThing.ts"), Role::Hook);
        assert_eq!(role("misc/use-toast.ts"), Role::Hook);
        assert_eq!(role("misc/user.ts"), Role::Other);
    }

    #[test]
    fn test_suffix_markers() {
        assert_eq!(role("global.d.ts"), Role::Type);
        assert_eq!(role("next.config.ts"), Role::Config);
        assert_eq!(role("checkout.test.ts"), Role::Test);
        assert_eq!(role("pricing.spec.tsx"), Role::Test);
    }

    #[test]
    fn test_unknown_paths_are_other() {
        assert_eq!(role(""), Role::Other);
        assert_eq!(role("middleware.ts"), Role::Other);
        assert_eq!(role("componentsx/a.ts"), Role::Other);
    }

    #[test]
    fn test_configured_api_root() {
        let config = ContextConfig {
            routing_root: "web/app".to_string(),
            api_root: "web/app/api".to_string(),
            ..ContextConfig::default()
        };
        assert_eq!(classify("web/app/api/helpers.ts", &config), Role::ApiRoute);
        assert_eq!(classify("pages/api/legacy.ts", &config), Role::ApiRoute);
        // default root no longer applies once overridden
        assert_eq!(classify("app/api/helpers.ts", &config), Role::Other);
    }

    #[test]
    fn test_api_root_under_src() {
        let config = ContextConfig {
            api_root: "src/app/api".to_string(),
            ..ContextConfig::default()
        };
        assert_eq!(classify("src/app/api/helpers.ts", &config), Role::ApiRoute);
    }
}
