use std::{fmt, net::IpAddr, str::FromStr};

/// An IP network, or a single address, as written in a CIDR field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Cidr {
    Addr(IpAddr),
    Net(ipnet::IpNet),
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("not a valid CIDR or IP address: {0}")]
pub struct CidrParseError(String);

// === impl Cidr ===

impl Cidr {
    #[inline]
    pub fn contains(&self, addr: &IpAddr) -> bool {
        match self {
            Self::Net(net) => net.contains(addr),
            Self::Addr(this) => this == addr,
        }
    }
}

impl FromStr for Cidr {
    type Err = CidrParseError;

    /// Accepts `addr/len` blocks and bare addresses, ignoring surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse()
            .map(Self::Net)
            .or_else(|_| s.parse().map(Self::Addr))
            .map_err(|_| CidrParseError(s.to_string()))
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addr(addr) => write!(f, "{addr}"),
            Self::Net(net) => write!(f, "{net}"),
        }
    }
}
