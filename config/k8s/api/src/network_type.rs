use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt, hash, str::FromStr};

/// Names the network plugin deployed in the cluster.
///
/// Values the cluster network operator does not know are carried verbatim, so
/// a document naming a newer plugin survives a decode/encode cycle unchanged.
#[derive(Clone, Debug)]
pub enum NetworkType {
    OpenShiftSdn,
    OvnKubernetes,
    Other(String),
}

// === impl NetworkType ===

impl NetworkType {
    pub const OPENSHIFT_SDN: &'static str = "OpenShiftSDN";
    pub const OVN_KUBERNETES: &'static str = "OVNKubernetes";

    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenShiftSdn => Self::OPENSHIFT_SDN,
            Self::OvnKubernetes => Self::OVN_KUBERNETES,
            Self::Other(name) => name,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

// Equality follows the wire form, so `Other("OpenShiftSDN")` and
// `OpenShiftSdn` are the same plugin.
impl PartialEq for NetworkType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for NetworkType {}

impl hash::Hash for NetworkType {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl From<String> for NetworkType {
    fn from(name: String) -> Self {
        match name.as_str() {
            Self::OPENSHIFT_SDN => Self::OpenShiftSdn,
            Self::OVN_KUBERNETES => Self::OvnKubernetes,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for NetworkType {
    fn from(name: &str) -> Self {
        match name {
            Self::OPENSHIFT_SDN => Self::OpenShiftSdn,
            Self::OVN_KUBERNETES => Self::OvnKubernetes,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl FromStr for NetworkType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl de::Visitor<'_> for Visitor {
            type Value = NetworkType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a network plugin name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(NetworkType::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(NetworkType::from(value))
            }
        }
        deserializer.deserialize_string(Visitor)
    }
}

impl schemars::JsonSchema for NetworkType {
    fn schema_name() -> String {
        "NetworkType".to_owned()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        schemars::schema::SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_plugins() {
        assert_eq!(NetworkType::from("OpenShiftSDN"), NetworkType::OpenShiftSdn);
        assert_eq!(
            NetworkType::from("OVNKubernetes".to_string()),
            NetworkType::OvnKubernetes
        );
        assert!(NetworkType::OpenShiftSdn.is_known());
    }

    #[test]
    fn unknown_plugins_are_preserved() {
        let nt = "Calico".parse::<NetworkType>().unwrap();
        assert_eq!(nt, NetworkType::Other("Calico".to_string()));
        assert!(!nt.is_known());
        assert_eq!(nt.to_string(), "Calico");

        // Matching is exact; a differently-cased name is a different plugin.
        let nt = NetworkType::from("openshiftsdn");
        assert!(!nt.is_known());
        assert_eq!(nt.as_str(), "openshiftsdn");
    }

    #[test]
    fn equality_follows_the_wire_form() {
        assert_eq!(
            NetworkType::Other("OpenShiftSDN".to_string()),
            NetworkType::OpenShiftSdn
        );
        assert_ne!(NetworkType::OpenShiftSdn, NetworkType::OvnKubernetes);
    }

    #[test]
    fn serializes_as_a_plain_string() {
        assert_eq!(
            serde_json::to_string(&NetworkType::OvnKubernetes).unwrap(),
            r#""OVNKubernetes""#
        );
        assert_eq!(
            serde_json::from_str::<NetworkType>(r#""Kuryr""#).unwrap(),
            NetworkType::Other("Kuryr".to_string())
        );
        assert!(serde_json::from_str::<NetworkType>("7").is_err());
    }
}
