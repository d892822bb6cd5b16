use crate::{
    cidr::CidrParseError,
    external_ip::{ExternalIPConfig, ExternalIPMatcher},
    seq::null_as_empty,
    NetworkType, CONFIG_API_GROUP,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use kube::core::TypeMeta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};


/// Holds cluster-wide network configuration: IP address pools for pods and
/// services, the network plugin, and external IP handling.
///
/// There is a single instance per cluster, named `cluster`. Consumers should
/// prefer `status` over `spec`, since it reflects what is actually deployed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Network {
    /// The `apiVersion`/`kind` envelope. Both keys must be present to be
    /// retained; a document carrying only one of them decodes to `None`.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    pub spec: NetworkSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NetworkStatus>,
}

/// The desired network configuration. Most fields are immutable after
/// installation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// Address pools from which pod IPs are allocated.
    #[serde(deserialize_with = "null_as_empty")]
    pub cluster_network: Vec<ClusterNetworkEntry>,

    /// Address pool for service IPs. Only one entry is supported.
    #[serde(deserialize_with = "null_as_empty")]
    pub service_network: Vec<String>,

    pub network_type: NetworkType,

    #[serde(rename = "externalIP", default, skip_serializing_if = "Option::is_none")]
    pub external_ip: Option<ExternalIPConfig>,
}

/// The network configuration observed in the cluster. Only written by the
/// network operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cluster_network: Vec<ClusterNetworkEntry>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub service_network: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,

    /// The MTU for inter-pod networking.
    #[serde(
        rename = "clusterNetworkMTU",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cluster_network_mtu: Option<u32>,
}

/// A contiguous block of addresses from which pod IPs are allocated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    pub cidr: String,

    /// The prefix length of the block handed to each node.
    pub host_prefix: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    #[serde(default)]
    pub metadata: ListMeta,

    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<Network>,
}

// === impl Network ===

impl Network {
    pub const CANONICAL_NAME: &'static str = "cluster";

    /// Builds the canonical `cluster` object.
    pub fn new(spec: NetworkSpec) -> Self {
        Self {
            types: Some(Self::type_meta()),
            metadata: ObjectMeta {
                name: Some(Self::CANONICAL_NAME.to_string()),
                ..ObjectMeta::default()
            },
            spec,
            status: None,
        }
    }

    pub fn type_meta() -> TypeMeta {
        TypeMeta {
            api_version: <Self as k8s_openapi::Resource>::API_VERSION.to_string(),
            kind: <Self as k8s_openapi::Resource>::KIND.to_string(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.metadata.name.as_deref() == Some(Self::CANONICAL_NAME)
    }

    pub fn with_status(mut self, status: NetworkStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl k8s_openapi::Resource for Network {
    const API_VERSION: &'static str = "config.openshift.io/v1";
    const GROUP: &'static str = CONFIG_API_GROUP;
    const KIND: &'static str = "Network";
    const VERSION: &'static str = "v1";
    const URL_PATH_SEGMENT: &'static str = "networks";
    type Scope = k8s_openapi::ClusterResourceScope;
}

impl k8s_openapi::ListableResource for Network {
    const LIST_KIND: &'static str = "NetworkList";
}

impl k8s_openapi::Metadata for Network {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

// === impl NetworkSpec ===

impl NetworkSpec {
    /// Compiles the external IP configuration. A spec without one places no
    /// restrictions on external IPs.
    pub fn external_ip_matcher(&self) -> Result<ExternalIPMatcher, CidrParseError> {
        match self.external_ip.as_ref() {
            Some(config) => ExternalIPMatcher::try_from(config),
            None => Ok(ExternalIPMatcher::unrestricted()),
        }
    }
}

// === impl NetworkList ===

impl NetworkList {
    pub fn type_meta() -> TypeMeta {
        TypeMeta {
            api_version: <Network as k8s_openapi::Resource>::API_VERSION.to_string(),
            kind: <Network as k8s_openapi::ListableResource>::LIST_KIND.to_string(),
        }
    }
}

impl FromIterator<Network> for NetworkList {
    fn from_iter<T: IntoIterator<Item = Network>>(iter: T) -> Self {
        Self {
            types: Some(Self::type_meta()),
            metadata: ListMeta::default(),
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for NetworkList {
    type Item = Network;
    type IntoIter = std::vec::IntoIter<Network>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
