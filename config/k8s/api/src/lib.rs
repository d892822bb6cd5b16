#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod cidr;
pub mod codec;
pub mod external_ip;
pub mod network;
mod network_type;
mod seq;

pub use self::{
    cidr::{Cidr, CidrParseError},
    external_ip::{ExternalIPConfig, ExternalIPMatcher, ExternalIPPolicy},
    network::{ClusterNetworkEntry, Network, NetworkList, NetworkSpec, NetworkStatus},
    network_type::NetworkType,
};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
pub use kube::core::{Resource, ResourceExt, TypeMeta};

/// The API group that owns cluster configuration resources.
pub const CONFIG_API_GROUP: &str = "config.openshift.io";
