//! Label selectors identifying the objects of one cluster

use oshinko_common::{CLUSTER_LABEL, ROLE_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label keys used to tag cluster objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorLabels {
    /// Key holding the cluster name
    pub cluster: String,
    /// Key holding the application role
    pub role: String,
}

impl Default for SelectorLabels {
    fn default() -> Self {
        Self {
            cluster: CLUSTER_LABEL.to_string(),
            role: ROLE_LABEL.to_string(),
        }
    }
}

/// Equality-based label selector
///
/// Every requirement must hold for an object to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    requirements: BTreeMap<String, String>,
}

impl Selector {
    /// Select the objects of cluster `name`, optionally narrowed to one role.
    /// An empty role is treated as no role.
    pub fn for_cluster(labels: &SelectorLabels, name: &str, role: Option<&str>) -> Self {
        let selector = Self::default().with(labels.cluster.as_str(), name);

        match role.filter(|r| !r.is_empty()) {
            Some(role) => selector.with(labels.role.as_str(), role),
            None => selector,
        }
    }

    /// Add an extra `key == value` requirement
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.insert(key.into(), value.into());
        self
    }

    pub fn requirements(&self) -> &BTreeMap<String, String> {
        &self.requirements
    }

    /// Whether an object carrying `labels` is selected
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|(k, v)| labels.get(k) == Some(v))
    }
}

/// Renders the API server's label-selector syntax, e.g. `cluster-name=spark1,role=master`
impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .requirements
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>();
        f.write_str(&parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_matches_cluster_name() {
        let selector = Selector::for_cluster(&SelectorLabels::default(), "spark1", None);

        assert!(selector.matches(&labels(&[("cluster-name", "spark1")])));
        assert!(!selector.matches(&labels(&[("cluster-name", "spark2")])));
        assert!(!selector.matches(&labels(&[("app", "spark1")])));
    }

    #[test]
    fn test_role_narrows_selection() {
        let selector =
            Selector::for_cluster(&SelectorLabels::default(), "spark1", Some("master"));

        assert!(selector.matches(&labels(&[("cluster-name", "spark1"), ("role", "master")])));
        assert!(!selector.matches(&labels(&[("cluster-name", "spark1"), ("role", "worker")])));
        assert!(!selector.matches(&labels(&[("cluster-name", "spark1")])));
    }

    #[test]
    fn test_empty_role_is_ignored() {
        let with_empty = Selector::for_cluster(&SelectorLabels::default(), "spark1", Some(""));
        let without = Selector::for_cluster(&SelectorLabels::default(), "spark1", None);
        assert_eq!(with_empty, without);
        assert_eq!(with_empty.requirements().len(), 1);
    }

    #[test]
    fn test_display_label_selector() {
        let selector =
            Selector::for_cluster(&SelectorLabels::default(), "spark1", Some("worker"));
        assert_eq!(selector.to_string(), "cluster-name=spark1,role=worker");
    }

    #[test]
    fn test_extra_requirement() {
        let selector =
            Selector::for_cluster(&SelectorLabels::default(), "spark1", None).with("app", "spark");

        assert!(selector.matches(&labels(&[("cluster-name", "spark1"), ("app", "spark")])));
        assert!(!selector.matches(&labels(&[("cluster-name", "spark1")])));
        assert_eq!(selector.to_string(), "app=spark,cluster-name=spark1");
    }

    #[test]
    fn test_custom_label_keys() {
        let keys = SelectorLabels {
            cluster: "oshinko-cluster".into(),
            role: "oshinko-type".into(),
        };
        let selector = Selector::for_cluster(&keys, "spark1", None);
        assert!(selector.matches(&labels(&[("oshinko-cluster", "spark1")])));
        assert_eq!(selector.to_string(), "oshinko-cluster=spark1");
    }

    #[test]
    fn test_name_passed_through_verbatim() {
        let selector = Selector::for_cluster(&SelectorLabels::default(), "Not A Name!", None);
        assert_eq!(selector.to_string(), "cluster-name=Not A Name!");
    }
}
