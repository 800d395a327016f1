// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Candidate filter policy: label exclusion and age inclusion window

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

/// Filter policy applied when enumerating candidate config maps
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Parsed key=value selectors; a resource carrying any of them is skipped
    exclude_labels: Vec<(String, String)>,
    /// Only include resources at least this old
    older_than: Option<Duration>,
    /// Only include resources at most this old
    newer_than: Option<Duration>,
}

impl FilterOptions {
    pub fn new(
        exclude_labels: &[String],
        older_than: Option<Duration>,
        newer_than: Option<Duration>,
    ) -> Result<Self> {
        let exclude_labels = exclude_labels
            .iter()
            .map(|raw| {
                raw.split_once('=')
                    .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                    .filter(|(key, _)| !key.is_empty())
                    .ok_or_else(|| anyhow!("Invalid label selector '{}', expected key=value", raw))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exclude_labels,
            older_than,
            newer_than,
        })
    }

    /// True if the resource carries any of the excluded key=value labels
    pub fn has_excluded_label(&self, labels: Option<&BTreeMap<String, String>>) -> bool {
        let Some(labels) = labels else {
            return false;
        };

        self.exclude_labels
            .iter()
            .any(|(key, value)| labels.get(key).is_some_and(|v| v == value))
    }

    /// True if the resource age satisfies the configured inclusion window
    ///
    /// With no bounds configured everything is included. A missing creation
    /// timestamp is included as well, absence of the field is not an error.
    pub fn has_included_age(&self, creation: Option<&Time>, now: DateTime<Utc>) -> bool {
        if self.older_than.is_none() && self.newer_than.is_none() {
            return true;
        }

        let Some(created) = creation else {
            return true;
        };

        let age = now
            .signed_duration_since(created.0)
            .to_std()
            .unwrap_or(Duration::ZERO);

        if let Some(min_age) = self.older_than
            && age < min_age
        {
            return false;
        }

        if let Some(max_age) = self.newer_than
            && age > max_age
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn created_ago(now: DateTime<Utc>, age: TimeDelta) -> Time {
        Time(now - age)
    }

    #[test]
    fn test_new_parses_selectors() {
        let filter = FilterOptions::new(
            &["app=nginx".to_string(), "tier = cache".to_string()],
            None,
            None,
        )
        .unwrap();

        assert!(filter.has_excluded_label(Some(&labels(&[("app", "nginx")]))));
        assert!(filter.has_excluded_label(Some(&labels(&[("tier", "cache")]))));
    }

    #[test]
    fn test_new_rejects_malformed_selector() {
        let result = FilterOptions::new(&["not-a-selector".to_string()], None, None);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("expected key=value")
        );
    }

    #[test]
    fn test_excluded_label_requires_exact_value() {
        let filter = FilterOptions::new(&["app=nginx".to_string()], None, None).unwrap();

        assert!(filter.has_excluded_label(Some(&labels(&[("app", "nginx")]))));
        assert!(!filter.has_excluded_label(Some(&labels(&[("app", "apache")]))));
        assert!(!filter.has_excluded_label(Some(&labels(&[("component", "nginx")]))));
    }

    #[test]
    fn test_excluded_label_no_labels() {
        let filter = FilterOptions::new(&["app=nginx".to_string()], None, None).unwrap();
        assert!(!filter.has_excluded_label(None));
    }

    #[test]
    fn test_no_selectors_excludes_nothing() {
        let filter = FilterOptions::default();
        assert!(!filter.has_excluded_label(Some(&labels(&[("app", "nginx")]))));
    }

    #[test]
    fn test_age_unrestricted() {
        let filter = FilterOptions::default();
        let now = Utc::now();

        assert!(filter.has_included_age(Some(&created_ago(now, TimeDelta::days(100))), now));
        assert!(filter.has_included_age(None, now));
    }

    #[test]
    fn test_age_older_than() {
        let filter =
            FilterOptions::new(&[], Some(Duration::from_secs(24 * 3600)), None).unwrap();
        let now = Utc::now();

        assert!(filter.has_included_age(Some(&created_ago(now, TimeDelta::days(2))), now));
        assert!(!filter.has_included_age(Some(&created_ago(now, TimeDelta::hours(1))), now));
    }

    #[test]
    fn test_age_newer_than() {
        let filter =
            FilterOptions::new(&[], None, Some(Duration::from_secs(24 * 3600))).unwrap();
        let now = Utc::now();

        assert!(filter.has_included_age(Some(&created_ago(now, TimeDelta::hours(1))), now));
        assert!(!filter.has_included_age(Some(&created_ago(now, TimeDelta::days(2))), now));
    }

    #[test]
    fn test_age_window_both_bounds() {
        let filter = FilterOptions::new(
            &[],
            Some(Duration::from_secs(3600)),
            Some(Duration::from_secs(7 * 24 * 3600)),
        )
        .unwrap();
        let now = Utc::now();

        assert!(filter.has_included_age(Some(&created_ago(now, TimeDelta::days(3))), now));
        assert!(!filter.has_included_age(Some(&created_ago(now, TimeDelta::minutes(5))), now));
        assert!(!filter.has_included_age(Some(&created_ago(now, TimeDelta::days(30))), now));
    }

    #[test]
    fn test_age_missing_timestamp_with_bounds() {
        let filter = FilterOptions::new(&[], Some(Duration::from_secs(3600)), None).unwrap();
        assert!(filter.has_included_age(None, Utc::now()));
    }

    #[test]
    fn test_age_future_timestamp_counts_as_zero() {
        let filter = FilterOptions::new(&[], Some(Duration::from_secs(3600)), None).unwrap();
        let now = Utc::now();

        // Clock skew can put creation in the future; treat as brand new
        assert!(!filter.has_included_age(Some(&Time(now + TimeDelta::minutes(5))), now));
    }

    #[test]
    fn test_humantime_flag_parsing_roundtrip() {
        let older = humantime::parse_duration("7d").unwrap();
        let filter = FilterOptions::new(&[], Some(older), None).unwrap();
        let now = Utc::now();

        assert!(filter.has_included_age(Some(&created_ago(now, TimeDelta::days(8))), now));
        assert!(!filter.has_included_age(Some(&created_ago(now, TimeDelta::days(6))), now));
    }
}
