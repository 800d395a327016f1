//! Guarded deletion of unused config maps

use dialoguer::Confirm;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client, api::DeleteParams};
use tracing::{info, warn};

use super::configmaps::CONFIG_MAP_KIND;

/// What the deletion pass left behind
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    /// Names still present in the cluster (declined or failed)
    pub retained: Vec<String>,
    /// Subset of retained whose delete call failed
    pub failed: Vec<String>,
}

/// Delete the given config maps, asking for per-object confirmation unless
/// `no_interactive` is set
///
/// Declined and failed names are retained; neither aborts the remaining
/// deletions.
pub async fn delete_config_maps(
    client: &Client,
    namespace: &str,
    names: &[String],
    no_interactive: bool,
) -> DeleteOutcome {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let mut outcome = DeleteOutcome::default();

    for name in names {
        if !no_interactive && !confirm_delete(name, namespace) {
            info!(namespace = %namespace, name = %name, "Skipped deletion");
            outcome.retained.push(name.clone());
            continue;
        }

        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => {
                info!(
                    namespace = %namespace,
                    name = %name,
                    "Deleted {}", CONFIG_MAP_KIND
                );
            }
            Err(e) => {
                warn!(
                    namespace = %namespace,
                    name = %name,
                    error = %e,
                    "Failed to delete {}", CONFIG_MAP_KIND
                );
                outcome.retained.push(name.clone());
                outcome.failed.push(name.clone());
            }
        }
    }

    outcome
}

fn confirm_delete(name: &str, namespace: &str) -> bool {
    Confirm::new()
        .with_prompt(format!(
            "Delete {} \"{}\" in namespace \"{}\"?",
            CONFIG_MAP_KIND, name, namespace
        ))
        .default(false)
        .interact()
        // A failed prompt (no TTY) must never delete anything
        .unwrap_or(false)
}
