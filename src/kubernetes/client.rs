use anyhow::{Context, Result, anyhow};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, api::ListParams};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

/// Timeout for connecting to the K8s API
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for reading K8s API responses
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for paginated list requests
const PAGE_SIZE: u32 = 500;

/// Build a client for the given kubeconfig context (or the current one)
pub async fn build_client(context: Option<&str>) -> Result<Client> {
    let kubeconfig = Kubeconfig::read()?;

    let context_name = context
        .map(String::from)
        .or_else(|| kubeconfig.current_context.clone())
        .ok_or_else(|| anyhow!("No context specified and no current context in kubeconfig"))?;

    // Verify context exists
    if !kubeconfig.contexts.iter().any(|c| c.name == context_name) {
        return Err(anyhow!("Context '{}' not found in kubeconfig", context_name));
    }

    let mut config = Config::from_custom_kubeconfig(
        kubeconfig,
        &KubeConfigOptions {
            context: Some(context_name.clone()),
            ..Default::default()
        },
    )
    .await
    .with_context(|| format!("Failed to load kubeconfig for context '{}'", context_name))?;

    // Set timeouts for reliability
    config.connect_timeout = Some(CONNECT_TIMEOUT);
    config.read_timeout = Some(READ_TIMEOUT);

    let client = Client::try_from(config)
        .with_context(|| format!("Failed to create client for context '{}'", context_name))?;

    debug!(context = %context_name, "Created Kubernetes client");

    Ok(client)
}

/// List every object behind an Api handle, following continue tokens
/// so large namespaces are fetched in pages rather than one giant response
pub async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, kube::Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    let mut all_items: Vec<K> = Vec::new();
    let mut continue_token: Option<String> = None;
    let mut page_count = 0u32;

    loop {
        let mut params = ListParams::default().limit(PAGE_SIZE);
        if let Some(ref token) = continue_token {
            params = params.continue_token(token);
        }

        let list = api.list(&params).await?;
        all_items.extend(list.items);
        page_count += 1;

        match list.metadata.continue_ {
            Some(token) if !token.is_empty() => continue_token = Some(token),
            _ => break,
        }
    }

    if page_count > 1 {
        debug!(
            pages = page_count,
            total_items = all_items.len(),
            "Pagination complete"
        );
    }

    Ok(all_items)
}
