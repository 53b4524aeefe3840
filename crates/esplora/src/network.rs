use std::fmt;
use std::str;

use bitcoin::Network;
use serde::{Deserialize, Serialize};

/// Base URL of the mainnet explorer API.
pub const MAINNET_EXPLORER_BASE: &str = "https://blockstream.info/api";

/// Base URL of the testnet explorer API.
pub const TESTNET_EXPLORER_BASE: &str = "https://blockstream.info/testnet/api";

/// Network selector.
///
/// One flag picks both the address network and the explorer endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// Bitcoin mainnet.
    Mainnet,
    /// Bitcoin testnet3.
    #[default]
    Testnet,
}

impl NetworkKind {
    /// Explorer API base for this network.
    pub fn explorer_base(self) -> &'static str {
        match self {
            Self::Mainnet => MAINNET_EXPLORER_BASE,
            Self::Testnet => TESTNET_EXPLORER_BASE,
        }
    }

    /// Address and consensus parameters for this network.
    pub fn to_bitcoin(self) -> Network {
        match self {
            Self::Mainnet => Network::Bitcoin,
            Self::Testnet => Network::Testnet,
        }
    }

    /// Wire name, as used in config files and requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl From<NetworkKind> for Network {
    fn from(kind: NetworkKind) -> Self {
        kind.to_bitcoin()
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for NetworkKind {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | "bitcoin" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(UnknownNetwork(s.to_owned())),
        }
    }
}

/// Error for unrecognized network names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}', expected mainnet or testnet")]
pub struct UnknownNetwork(pub String);
