use serde::{Deserialize, Serialize};

/// A config map that is always treated as in use, regardless of references
///
/// A namespace of "*" matches every namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionResource {
    pub resource_name: String,
    pub namespace: String,
}

impl ExceptionResource {
    pub fn matches_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace || self.namespace == "*"
    }
}

/// Cluster-managed config maps that must never be reported as unused
pub fn default_exceptions() -> Vec<ExceptionResource> {
    vec![
        ExceptionResource {
            resource_name: "aws-auth".to_string(),
            namespace: "kube-system".to_string(),
        },
        ExceptionResource {
            resource_name: "kube-root-ca.crt".to_string(),
            namespace: "*".to_string(),
        },
    ]
}
