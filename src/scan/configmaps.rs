// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Unused config map detection for a single namespace
//!
//! References are gathered from every attachment mechanism a pod spec offers:
//! volumes, projected volume sources, container env vars, container envFrom
//! imports and init-container env vars. Whatever the candidate lister returns
//! beyond that union is unused.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{ConfigMap, Pod};
use kube::{Api, Client};
use tracing::debug;

use super::diff::{dedup_and_sort, difference};
use super::exceptions::ExceptionResource;
use super::filters::FilterOptions;
use crate::kubernetes::list_all;

/// Resource kind label used in reports; consumers key on the exact string
pub const CONFIG_MAP_KIND: &str = "ConfigMap";

/// Label marking a config map as in use regardless of references
pub const USED_LABEL: &str = "k8prune/used";

/// Config map names referenced by the pods of one namespace, grouped by
/// attachment mechanism
///
/// Buckets may overlap and contain duplicates; `env_from_containers` mirrors
/// `env_from` and is kept as its own bucket. Everything collapses into one
/// deduplicated union before the difference is taken.
#[derive(Debug, Default)]
pub struct ReferenceSet {
    pub volumes: Vec<String>,
    pub projected: Vec<String>,
    pub env: Vec<String>,
    pub env_from: Vec<String>,
    pub env_from_containers: Vec<String>,
    pub init_env: Vec<String>,
}

impl ReferenceSet {
    /// Walk every pod spec and record each config map reference
    ///
    /// Partially populated specs are fine; absent fields contribute nothing.
    /// Exceptions matching the namespace are merged in afterwards.
    pub fn collect(pods: &[Pod], exceptions: &[ExceptionResource], namespace: &str) -> Self {
        let mut refs = Self::default();

        for pod in pods {
            let Some(spec) = &pod.spec else {
                continue;
            };

            for volume in spec.volumes.iter().flatten() {
                if let Some(source) = &volume.config_map {
                    refs.volumes.push(source.name.clone());
                }
                if let Some(projected) = &volume.projected {
                    for source in projected.sources.iter().flatten() {
                        if let Some(config_map) = &source.config_map {
                            refs.projected.push(config_map.name.clone());
                        }
                    }
                }
            }

            for container in &spec.containers {
                for env in container.env.iter().flatten() {
                    if let Some(key_ref) = env
                        .value_from
                        .as_ref()
                        .and_then(|source| source.config_map_key_ref.as_ref())
                    {
                        refs.env.push(key_ref.name.clone());
                    }
                }
                for env_from in container.env_from.iter().flatten() {
                    if let Some(source) = &env_from.config_map_ref {
                        refs.env_from.push(source.name.clone());
                        refs.env_from_containers.push(source.name.clone());
                    }
                }
            }

            for init_container in spec.init_containers.iter().flatten() {
                for env in init_container.env.iter().flatten() {
                    if let Some(key_ref) = env
                        .value_from
                        .as_ref()
                        .and_then(|source| source.config_map_key_ref.as_ref())
                    {
                        refs.init_env.push(key_ref.name.clone());
                    }
                }
            }
        }

        for exception in exceptions {
            if exception.matches_namespace(namespace) {
                refs.volumes.push(exception.resource_name.clone());
            }
        }

        refs
    }

    /// Collapse the buckets into the union of used names
    pub fn into_used_names(self) -> Vec<String> {
        let Self {
            volumes,
            projected,
            env,
            env_from,
            env_from_containers,
            init_env,
        } = self;

        let mut used = Vec::new();
        for bucket in [
            volumes,
            projected,
            env,
            env_from,
            env_from_containers,
            init_env,
        ] {
            used.extend(dedup_and_sort(bucket));
        }

        used
    }
}

/// Names of config maps surviving the filter policy, in listing order
pub fn candidate_names(
    configmaps: &[ConfigMap],
    filter: &FilterOptions,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut names = Vec::with_capacity(configmaps.len());

    for configmap in configmaps {
        let metadata = &configmap.metadata;

        if filter.has_excluded_label(metadata.labels.as_ref()) {
            continue;
        }
        if !filter.has_included_age(metadata.creation_timestamp.as_ref(), now) {
            continue;
        }
        if metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(USED_LABEL))
            .is_some_and(|value| value == "true")
        {
            continue;
        }

        if let Some(name) = &metadata.name {
            names.push(name.clone());
        }
    }

    names
}

/// Compute the unused config maps of one namespace
///
/// Any listing failure aborts this namespace only; the caller decides
/// whether the run continues.
pub async fn process_namespace(
    client: &Client,
    namespace: &str,
    filter: &FilterOptions,
    exceptions: &[ExceptionResource],
) -> Result<Vec<String>> {
    let pod_api: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pods = list_all(&pod_api)
        .await
        .with_context(|| format!("Failed to list pods in namespace '{}'", namespace))?;

    let references = ReferenceSet::collect(&pods, exceptions, namespace);

    let configmap_api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let configmaps = list_all(&configmap_api)
        .await
        .with_context(|| format!("Failed to list config maps in namespace '{}'", namespace))?;

    let candidates = candidate_names(&configmaps, filter, Utc::now());
    let unused = difference(&references.into_used_names(), &candidates);

    debug!(
        namespace = %namespace,
        pods = pods.len(),
        configmaps = configmaps.len(),
        unused = unused.len(),
        "Processed namespace"
    );

    Ok(unused)
}
