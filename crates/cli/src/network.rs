use clap::ValueEnum;
use ordkit_esplora::NetworkKind;

/// CLI argument type for network selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for NetworkKind {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => NetworkKind::Mainnet,
            NetworkArg::Testnet => NetworkKind::Testnet,
        }
    }
}
