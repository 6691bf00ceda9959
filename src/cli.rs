mod schedules;
mod seed;
mod status;
mod store;

use clap::{Parser, Subcommand};

use crate::{
    cli::{schedules::SchedulesArgs, seed::SeedArgs, status::StatusArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: tell whether it is on-peak now and when that changes.
    #[clap(name = "status")]
    Status(Box<StatusArgs>),

    /// List the stored rules of a provider.
    #[clap(name = "schedules")]
    Schedules(Box<SchedulesArgs>),

    /// Write the default rules file.
    #[clap(name = "seed")]
    Seed(SeedArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Status(args) => args.run(),
            Self::Schedules(args) => args.run(),
            Self::Seed(args) => args.run(),
        }
    }
}
