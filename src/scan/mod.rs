// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Scan orchestration across namespaces
//!
//! Each namespace is processed on its own; a failing namespace is logged and
//! skipped so one broken namespace never aborts the whole run.

mod configmaps;
mod delete;
mod diff;
mod exceptions;
mod filters;

pub use configmaps::{CONFIG_MAP_KIND, USED_LABEL};
pub use exceptions::{ExceptionResource, default_exceptions};
pub use filters::FilterOptions;

use anyhow::Result;
use kube::Client;
use tracing::{error, info};

use crate::kubernetes::{IncludeExcludeLists, list_namespace_names, resolve_namespaces};
use crate::output::ScanReport;

/// Run-time switches
#[derive(Debug, Clone, Copy, Default)]
pub struct Opts {
    pub delete: bool,
    pub no_interactive: bool,
}

/// Scan the selected namespaces for unused config maps
///
/// Returns the aggregated report; namespaces whose listing calls failed
/// contribute no entry.
pub async fn scan_cluster(
    client: &Client,
    lists: &IncludeExcludeLists,
    filter: &FilterOptions,
    exceptions: &[ExceptionResource],
    opts: &Opts,
) -> Result<ScanReport> {
    let available = list_namespace_names(client).await?;
    let namespaces = resolve_namespaces(&available, lists)?;

    info!(count = namespaces.len(), "Scanning namespaces");

    let mut report = ScanReport::default();

    for namespace in &namespaces {
        let mut unused =
            match configmaps::process_namespace(client, namespace, filter, exceptions).await {
                Ok(unused) => unused,
                Err(e) => {
                    error!(
                        namespace = %namespace,
                        error = %e,
                        "Failed to process namespace, skipping"
                    );
                    continue;
                }
            };

        if opts.delete && !unused.is_empty() {
            let outcome =
                delete::delete_config_maps(client, namespace, &unused, opts.no_interactive).await;
            if !outcome.failed.is_empty() {
                error!(
                    namespace = %namespace,
                    failed = ?outcome.failed,
                    "Failed to delete some config maps"
                );
            }
            // The report must reflect what is still in the cluster
            unused = outcome.retained;
        }

        report.record(namespace, CONFIG_MAP_KIND, unused);
    }

    Ok(report)
}
