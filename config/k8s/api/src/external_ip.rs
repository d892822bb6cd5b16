use crate::{
    cidr::{Cidr, CidrParseError},
    seq::null_as_empty,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tracing::trace;

/// Configures the IP blocks relevant to a Service's `externalIPs`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIPConfig {
    /// Restrictions on user-specified external IPs.
    ///
    /// When unset, any external IP is allowed. When set to an empty policy,
    /// no external IP is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ExternalIPPolicy>,

    /// Blocks from which external IPs are automatically assigned to
    /// `LoadBalancer` services. Automatically assigned IPs are not subject to
    /// the policy. Only one entry is expected.
    #[serde(
        rename = "autoAssignCIDRs",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub auto_assign_cidrs: Vec<String>,
}

/// Configures exactly which external IPs a Service may request.
///
/// Rejected blocks take precedence over allowed blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ExternalIPPolicy {
    #[serde(rename = "allowedCIDRs", deserialize_with = "null_as_empty")]
    pub allowed_cidrs: Vec<String>,

    #[serde(
        rename = "rejectedCIDRs",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rejected_cidrs: Vec<String>,
}

/// A parsed [`ExternalIPConfig`], ready to evaluate addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExternalIPMatcher {
    policy: Option<PolicyMatch>,
    auto_assign: Vec<Cidr>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PolicyMatch {
    allowed: Vec<Cidr>,
    rejected: Vec<Cidr>,
}

// === impl ExternalIPConfig ===

impl ExternalIPConfig {
    /// Checks whether a user-specified external IP is permitted.
    pub fn allows(&self, ip: IpAddr) -> Result<bool, CidrParseError> {
        match self.policy.as_ref() {
            None => Ok(true),
            Some(policy) => policy.allows(ip),
        }
    }
}

// === impl ExternalIPPolicy ===

impl ExternalIPPolicy {
    pub fn allows(&self, ip: IpAddr) -> Result<bool, CidrParseError> {
        PolicyMatch::try_from(self).map(|policy| policy.allows(ip))
    }
}

// === impl ExternalIPMatcher ===

impl ExternalIPMatcher {
    /// A matcher with no policy and no automatically assigned blocks.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn allows(&self, ip: IpAddr) -> bool {
        match self.policy.as_ref() {
            None => true,
            Some(policy) => policy.allows(ip),
        }
    }

    /// Checks whether the address falls in a block reserved for automatic
    /// assignment. The policy is never consulted.
    pub fn is_auto_assignable(&self, ip: IpAddr) -> bool {
        self.auto_assign.iter().any(|cidr| cidr.contains(&ip))
    }
}

impl TryFrom<&ExternalIPConfig> for ExternalIPMatcher {
    type Error = CidrParseError;

    fn try_from(config: &ExternalIPConfig) -> Result<Self, Self::Error> {
        let policy = config
            .policy
            .as_ref()
            .map(PolicyMatch::try_from)
            .transpose()?;
        let auto_assign = parse_all(&config.auto_assign_cidrs)?;
        Ok(Self {
            policy,
            auto_assign,
        })
    }
}

// === impl PolicyMatch ===

impl PolicyMatch {
    fn allows(&self, ip: IpAddr) -> bool {
        if let Some(cidr) = self.rejected.iter().find(|cidr| cidr.contains(&ip)) {
            trace!(%ip, %cidr, "Rejected external IP");
            return false;
        }

        match self.allowed.iter().find(|cidr| cidr.contains(&ip)) {
            Some(cidr) => {
                trace!(%ip, %cidr, "Allowed external IP");
                true
            }
            None => {
                trace!(%ip, "External IP not in any allowed CIDR");
                false
            }
        }
    }
}

impl TryFrom<&ExternalIPPolicy> for PolicyMatch {
    type Error = CidrParseError;

    fn try_from(policy: &ExternalIPPolicy) -> Result<Self, Self::Error> {
        Ok(Self {
            allowed: parse_all(&policy.allowed_cidrs)?,
            rejected: parse_all(&policy.rejected_cidrs)?,
        })
    }
}

fn parse_all(cidrs: &[String]) -> Result<Vec<Cidr>, CidrParseError> {
    cidrs.iter().map(|cidr| cidr.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn policy(allowed: &[&str], rejected: &[&str]) -> ExternalIPPolicy {
        ExternalIPPolicy {
            allowed_cidrs: allowed.iter().map(ToString::to_string).collect(),
            rejected_cidrs: rejected.iter().map(ToString::to_string).collect(),
        }
    }

    #[rstest]
    #[case::rejected_despite_allowed("10.1.2.3", false)]
    #[case::rejected_block_start("10.1.0.0", false)]
    #[case::allowed("10.2.0.1", true)]
    #[case::outside_allowed("192.168.0.1", false)]
    #[case::other_family("fd00::1", false)]
    fn rejection_takes_precedence(#[case] ip: &str, #[case] expected: bool) {
        let policy = policy(&["10.0.0.0/8"], &["10.1.0.0/16"]);
        assert_eq!(policy.allows(ip.parse().unwrap()), Ok(expected));
    }

    #[test]
    fn unset_policy_is_unrestricted() {
        let config = ExternalIPConfig::default();
        assert_eq!(config.allows("203.0.113.9".parse().unwrap()), Ok(true));

        let matcher = ExternalIPMatcher::try_from(&config).unwrap();
        assert_eq!(matcher, ExternalIPMatcher::unrestricted());
        assert!(matcher.allows("fd00::1".parse().unwrap()));
    }

    #[test]
    fn empty_policy_allows_nothing() {
        let config = ExternalIPConfig {
            policy: Some(ExternalIPPolicy::default()),
            ..Default::default()
        };
        assert_eq!(config.allows("203.0.113.9".parse().unwrap()), Ok(false));
        assert_eq!(config.allows("fd00::1".parse().unwrap()), Ok(false));
    }

    #[test]
    fn single_addresses() {
        let policy = policy(&["192.0.2.10", "192.0.2.0/24"], &["192.0.2.66"]);
        assert_eq!(policy.allows("192.0.2.10".parse().unwrap()), Ok(true));
        assert_eq!(policy.allows("192.0.2.66".parse().unwrap()), Ok(false));
    }

    #[test]
    fn auto_assigned_blocks_ignore_policy() {
        let config = ExternalIPConfig {
            policy: Some(policy(&[], &["198.51.100.0/24"])),
            auto_assign_cidrs: vec!["198.51.100.0/24".to_string()],
        };
        let matcher = ExternalIPMatcher::try_from(&config).unwrap();

        let ip = "198.51.100.20".parse().unwrap();
        assert!(!matcher.allows(ip));
        assert!(matcher.is_auto_assignable(ip));
        assert!(!matcher.is_auto_assignable("198.51.101.1".parse().unwrap()));
    }

    #[test]
    fn invalid_cidrs() {
        let config = ExternalIPConfig {
            policy: None,
            auto_assign_cidrs: vec!["198.51.100.0/99".to_string()],
        };
        assert!(ExternalIPMatcher::try_from(&config).is_err());
        // The policy check alone does not look at automatically assigned blocks.
        assert_eq!(config.allows("198.51.100.1".parse().unwrap()), Ok(true));

        let policy = policy(&["10.0.0.0/8"], &["bogus"]);
        assert!(policy.allows("10.0.0.1".parse().unwrap()).is_err());
    }
}
