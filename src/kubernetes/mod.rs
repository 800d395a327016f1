mod client;
mod namespaces;

pub use client::{build_client, list_all};
pub use namespaces::{IncludeExcludeLists, list_namespace_names, resolve_namespaces};
