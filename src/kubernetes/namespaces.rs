// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Namespace universe computation
//!
//! Resolves include/exclude specifications (exact names, globs, comma-separated
//! lists) against the namespaces present in the cluster.

use anyhow::{Context, Result, anyhow};
use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client};

use super::list_all;

/// Namespace include/exclude patterns, parsed from comma-separated specs
///
/// Supports:
/// - Exact names: "default"
/// - Glob patterns: "team-*", "prod-?"
/// - Comma-separated lists: "prod, staging"
#[derive(Debug, Clone, Default)]
pub struct IncludeExcludeLists {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl IncludeExcludeLists {
    pub fn from_specs(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: split_spec(include),
            exclude: split_spec(exclude),
        }
    }
}

fn split_spec(spec: Option<&str>) -> Vec<String> {
    spec.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Fetch the names of all namespaces in the cluster
pub async fn list_namespace_names(client: &Client) -> Result<Vec<String>> {
    let api: Api<Namespace> = Api::all(client.clone());
    let namespaces = list_all(&api).await.context("Failed to list namespaces")?;

    Ok(namespaces
        .into_iter()
        .filter_map(|ns| ns.metadata.name)
        .collect())
}

/// Resolve the namespace universe to scan
///
/// With an empty include list, every namespace not matching an exclude
/// pattern is selected. Otherwise each include pattern is resolved against
/// the available namespaces (exact names must exist, globs collect all
/// matches) and excludes are applied on top.
///
/// Returns an error if:
/// - An exact include is requested but the namespace doesn't exist
/// - Include patterns were given and nothing matched
pub fn resolve_namespaces(
    available: &[String],
    lists: &IncludeExcludeLists,
) -> Result<Vec<String>> {
    let mut selected = Vec::new();

    if lists.include.is_empty() {
        selected.extend(available.iter().cloned());
    } else {
        for pattern in &lists.include {
            // Check if it's a glob pattern
            if pattern.contains('*') || pattern.contains('?') {
                // Glob matching - collect all matches
                for ns in available {
                    if glob_match(pattern, ns) && !selected.contains(ns) {
                        selected.push(ns.clone());
                    }
                }
            } else {
                // Exact match
                if available.contains(pattern) {
                    if !selected.contains(pattern) {
                        selected.push(pattern.clone());
                    }
                } else {
                    return Err(anyhow!("Namespace '{}' not found", pattern));
                }
            }
        }

        if selected.is_empty() {
            return Err(anyhow!(
                "No namespaces matched include patterns {:?}",
                lists.include
            ));
        }
    }

    selected.retain(|ns| {
        !lists
            .exclude
            .iter()
            .any(|pattern| pattern == ns || glob_match(pattern, ns))
    });

    Ok(selected)
}

/// Simple glob pattern matching (supports * and ?)
/// Uses an efficient iterative algorithm without allocations
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0; // pattern index
    let mut ti = 0; // text index
    let mut star_pi = None; // position of last '*' in pattern
    let mut star_ti = 0; // position in text when we saw last '*'

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            // Character match or '?' wildcard
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            // '*' wildcard - remember position and try matching zero chars
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if let Some(sp) = star_pi {
            // Mismatch, but we have a previous '*' - backtrack
            // Try matching one more character with the '*'
            pi = sp + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            // Mismatch and no '*' to backtrack to
            return false;
        }
    }

    // Check remaining pattern characters (must all be '*')
    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_namespaces() -> Vec<String> {
        vec![
            "default".to_string(),
            "kube-system".to_string(),
            "kube-public".to_string(),
            "team-a".to_string(),
            "team-b".to_string(),
        ]
    }

    #[test]
    fn test_empty_include_selects_all() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::default();

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result, namespaces);
    }

    #[test]
    fn test_exact_include() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("default"), None);

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result, vec!["default"]);
    }

    #[test]
    fn test_exact_include_not_found() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("nonexistent"), None);

        let result = resolve_namespaces(&namespaces, &lists);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_glob_include() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("team-*"), None);

        let mut result = resolve_namespaces(&namespaces, &lists).unwrap();
        result.sort();
        assert_eq!(result, vec!["team-a", "team-b"]);
    }

    #[test]
    fn test_glob_include_no_matches() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("prod-*"), None);

        let result = resolve_namespaces(&namespaces, &lists);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No namespaces matched")
        );
    }

    #[test]
    fn test_comma_separated_include_with_spaces() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("  default  ,  team-a  "), None);

        let mut result = resolve_namespaces(&namespaces, &lists).unwrap();
        result.sort();
        assert_eq!(result, vec!["default", "team-a"]);
    }

    #[test]
    fn test_mixed_exact_and_glob_deduplicates() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("team-a, team-*"), None);

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result.iter().filter(|&ns| ns == "team-a").count(), 1);
    }

    #[test]
    fn test_exclude_exact() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(None, Some("kube-system"));

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert!(!result.contains(&"kube-system".to_string()));
        assert!(result.contains(&"default".to_string()));
    }

    #[test]
    fn test_exclude_glob() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(None, Some("kube-*"));

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result, vec!["default", "team-a", "team-b"]);
    }

    #[test]
    fn test_exclude_applies_to_includes() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(Some("team-*"), Some("team-b"));

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result, vec!["team-a"]);
    }

    #[test]
    fn test_unknown_exclude_is_ignored() {
        let namespaces = cluster_namespaces();
        let lists = IncludeExcludeLists::from_specs(None, Some("does-not-exist"));

        let result = resolve_namespaces(&namespaces, &lists).unwrap();
        assert_eq!(result.len(), namespaces.len());
    }

    #[test]
    fn test_glob_match_simple() {
        assert!(glob_match("team-*", "team-a"));
        assert!(glob_match("team-*", "team-b"));
        assert!(!glob_match("team-*", "kube-system"));
    }

    #[test]
    fn test_glob_match_question() {
        assert!(glob_match("team-?", "team-a"));
        assert!(!glob_match("team-?", "team-ab"));
        assert!(!glob_match("team-?", "team-"));
    }

    #[test]
    fn test_glob_match_multiple_wildcards() {
        assert!(glob_match("*-*", "kube-system"));
        assert!(glob_match("*-*", "team-a"));
        assert!(!glob_match("*-*", "default"));
    }

    #[test]
    fn test_glob_match_trailing_star() {
        assert!(glob_match("kube*", "kube"));
        assert!(glob_match("kube*", "kube-system"));
        assert!(glob_match("kube*", "kubernetes-dashboard"));
    }

    #[test]
    fn test_from_specs_drops_empty_parts() {
        let lists = IncludeExcludeLists::from_specs(Some("a,,b,  ,c"), None);
        assert_eq!(lists.include, vec!["a", "b", "c"]);
    }
}
