//! zks CLI
//!
//! Query a zkSync node over JSON-RPC and wait for transaction confirmation.

use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::time::Duration;
use zksync_provider::types::BlockNumber;
use zksync_provider::utils::config::{ProviderConfig, DEFAULT_RPC_URL};
use zksync_provider::utils::hex::parse_tx_hash;
use zksync_provider::DefaultProvider;

mod commands;

use commands::{BlockSelector, EstimateArgs, LogsArgs, WaitArgs};

/// zks - zkSync node query tool
#[derive(Parser, Debug)]
#[command(name = "zks")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// RPC endpoint URL
    #[arg(short, long, global = true, env = "ZKSYNC_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    request_timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Balance of an address
    Balance {
        address: Address,

        /// Block tag or number
        #[arg(short, long, default_value = "latest")]
        block: BlockNumber,
    },

    /// Transaction count (nonce) of an address
    Nonce {
        address: Address,

        /// Block tag or number
        #[arg(short, long, default_value = "latest")]
        block: BlockNumber,
    },

    /// Block by number/tag or by hash
    Block {
        /// Block tag or number
        #[arg(conflicts_with = "hash")]
        number: Option<BlockNumber>,

        /// Block hash
        #[arg(long)]
        hash: Option<B256>,
    },

    /// Transaction receipt
    Receipt {
        #[arg(value_parser = parse_tx_hash)]
        tx: TxHash,
    },

    /// Transaction by hash
    Tx {
        #[arg(value_parser = parse_tx_hash)]
        tx: TxHash,
    },

    /// Wait until a transaction is mined (or finalized)
    Wait {
        #[arg(value_parser = parse_tx_hash)]
        tx: TxHash,

        /// Also wait for the block to be finalized on L1
        #[arg(long)]
        finalized: bool,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        poll_interval_ms: u64,
    },

    /// Current gas price
    GasPrice,

    /// Estimate gas (or the full zkSync fee) for a call
    Estimate {
        #[arg(long)]
        from: Address,

        #[arg(long)]
        to: Address,

        /// Calldata as hex
        #[arg(long, default_value = "0x")]
        data: Bytes,

        /// Value in wei
        #[arg(long)]
        value: Option<U256>,

        /// Use zks_estimateFee instead of eth_estimateGas
        #[arg(long)]
        fee: bool,
    },

    /// Submit a signed raw transaction
    SendRaw {
        /// Signed transaction bytes as hex
        data: Bytes,
    },

    /// Main contract, L1 chain id, batch number and bridges
    ChainInfo,

    /// List confirmed tokens
    Tokens {
        /// Offset into the token list
        #[arg(long, default_value = "0")]
        from: u32,

        /// Page size
        #[arg(long, default_value = "50")]
        limit: u8,
    },

    /// Price and liquidity of a token
    Token { address: Address },

    /// All token balances of an address
    Balances { address: Address },

    /// Commit/prove/execute details of an L2 block
    BlockDetails { number: u32 },

    /// Proof for an L2 to L1 log of a transaction
    LogProof {
        #[arg(value_parser = parse_tx_hash)]
        tx: TxHash,

        /// Index of the L2 to L1 log in the transaction
        #[arg(long, default_value = "0")]
        index: u64,
    },

    /// Proof for an L2 to L1 message
    MsgProof {
        block: u32,
        sender: Address,
        msg: B256,
    },

    /// Query event logs
    Logs {
        #[arg(long, conflicts_with = "block_hash")]
        from_block: Option<BlockNumber>,

        #[arg(long, conflicts_with = "block_hash")]
        to_block: Option<BlockNumber>,

        #[arg(long)]
        block_hash: Option<B256>,

        /// Emitting contract (repeatable)
        #[arg(long)]
        address: Vec<Address>,

        /// Topic per position, in order (repeatable)
        #[arg(long)]
        topic: Vec<B256>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = ProviderConfig::new(cli.rpc)
        .with_timeout(Duration::from_secs(cli.request_timeout));

    let provider = DefaultProvider::from_config(&config)?;

    // Execute command
    match cli.command {
        Commands::Balance { address, block } => {
            commands::balance(&provider, address, block).await?;
        }

        Commands::Nonce { address, block } => {
            commands::nonce(&provider, address, block).await?;
        }

        Commands::Block { number, hash } => {
            let selector = match hash {
                Some(hash) => BlockSelector::Hash(hash),
                None => BlockSelector::Number(number.unwrap_or_default()),
            };
            commands::block(&provider, selector).await?;
        }

        Commands::Receipt { tx } => {
            commands::receipt(&provider, tx).await?;
        }

        Commands::Tx { tx } => {
            commands::transaction(&provider, tx).await?;
        }

        Commands::Wait {
            tx,
            finalized,
            timeout,
            poll_interval_ms,
        } => {
            let provider = provider.with_poll_interval(Duration::from_millis(poll_interval_ms));
            let args = WaitArgs {
                tx_hash: tx,
                finalized,
                timeout: timeout.map(Duration::from_secs),
            };
            commands::wait(&provider, args).await?;
        }

        Commands::GasPrice => {
            commands::gas_price(&provider).await?;
        }

        Commands::Estimate {
            from,
            to,
            data,
            value,
            fee,
        } => {
            let args = EstimateArgs {
                from,
                to,
                data,
                value,
                full_fee: fee,
            };
            commands::estimate(&provider, args).await?;
        }

        Commands::SendRaw { data } => {
            commands::send_raw(&provider, &data).await?;
        }

        Commands::ChainInfo => {
            commands::chain_info(&provider).await?;
        }

        Commands::Tokens { from, limit } => {
            commands::tokens(&provider, from, limit).await?;
        }

        Commands::Token { address } => {
            commands::token(&provider, address).await?;
        }

        Commands::Balances { address } => {
            commands::balances(&provider, address).await?;
        }

        Commands::BlockDetails { number } => {
            commands::block_details(&provider, number).await?;
        }

        Commands::LogProof { tx, index } => {
            commands::log_proof(&provider, tx, index).await?;
        }

        Commands::MsgProof { block, sender, msg } => {
            commands::msg_proof(&provider, block, sender, msg).await?;
        }

        Commands::Logs {
            from_block,
            to_block,
            block_hash,
            address,
            topic,
        } => {
            let args = LogsArgs {
                from_block,
                to_block,
                block_hash,
                addresses: address,
                topics: topic,
            };
            commands::logs(&provider, args).await?;
        }
    }

    Ok(())
}
