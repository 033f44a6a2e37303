use clap::{Parser, Subcommand};

pub mod beacon;
pub mod distribution;
pub mod ethereum;
pub mod fees;
pub mod instrumentation;
pub mod prices;
pub mod relay;
pub mod rewards;
pub mod service;

#[derive(Parser, Debug)]
#[command(
    name = "watchtower",
    about = "Oracle watchtower - rewards snapshots, price reports and cross-chain price relays",
    long_about = "The watchtower runs unattended next to a node and, for a member of the oracle set, \
    submits reward snapshots, price observations and cross-chain price relays.\n\n\
    Quick Start:\n  \
    watchtower run --ethereum-rpc-url http://localhost:8545 --beacon-url http://localhost:5052 ..."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the watchtower service
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[clap(flatten)]
    pub ethereum_args: ethereum::EthereumCliArgs,

    #[clap(flatten)]
    pub beacon_args: beacon::BeaconCliArgs,

    #[clap(flatten)]
    pub rewards_args: rewards::RewardsCliArgs,

    #[clap(flatten)]
    pub distribution_args: distribution::DistributionCliArgs,

    #[clap(flatten)]
    pub fee_args: fees::FeeCliArgs,

    #[clap(flatten)]
    pub price_args: prices::PriceCliArgs,

    #[clap(flatten)]
    pub relay_args: relay::RelayCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,

    #[clap(flatten)]
    pub instrumentation_args: instrumentation::InstrumentationCliArgs,
}
