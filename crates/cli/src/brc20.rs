use anyhow::Result;
use clap::Subcommand;
use ordkit_brc20_fmt::Brc20Operation;
use ordkit_inscriber::{InscriberConfig, InscriptionRequest};

use crate::inscribe::{FundingArgs, prepare_and_print};

#[derive(Debug, Subcommand)]
pub(crate) enum Brc20Command {
    /// Deploy a new ticker
    Deploy {
        /// 4 or 5 character ticker
        tick: String,
        /// Maximum supply
        max: u128,
        /// Per-mint limit
        #[arg(long)]
        lim: Option<u128>,
        /// Decimal precision, 18 when omitted
        #[arg(long)]
        dec: Option<u8>,
        #[command(flatten)]
        funding: FundingArgs,
    },

    /// Mint tokens of a deployed ticker
    Mint {
        /// 4 or 5 character ticker
        tick: String,
        /// Amount to mint
        amount: u128,
        #[command(flatten)]
        funding: FundingArgs,
    },

    /// Inscribe a transferable balance
    Transfer {
        /// 4 or 5 character ticker
        tick: String,
        /// Amount to transfer
        amount: u128,
        #[command(flatten)]
        funding: FundingArgs,
    },
}

pub(crate) fn handle_command(command: Brc20Command, config: InscriberConfig) -> Result<()> {
    let (op, funding) = match command {
        Brc20Command::Deploy {
            tick,
            max,
            lim,
            dec,
            funding,
        } => (Brc20Operation::deploy(&tick, max, lim, dec)?, funding),
        Brc20Command::Mint {
            tick,
            amount,
            funding,
        } => (Brc20Operation::mint(&tick, amount)?, funding),
        Brc20Command::Transfer {
            tick,
            amount,
            funding,
        } => (Brc20Operation::transfer(&tick, amount)?, funding),
    };

    let req = InscriptionRequest::from_brc20(
        &op,
        funding.fee_rate,
        funding.funding_address.as_str(),
        funding.receive_address(),
        config.network,
    )?;
    let file_name = format!("{}-{}.json", op.op(), op.tick());
    prepare_and_print(&req, &funding, config, &file_name)
}
