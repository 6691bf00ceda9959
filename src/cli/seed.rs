use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::store::StoreArgs,
    db::{RuleFile, record::RuleRecord, seed::default_rules},
    prelude::*,
};

#[derive(Parser)]
pub struct SeedArgs {
    /// Replace the rules file if it already exists.
    #[clap(long)]
    force: bool,

    #[clap(flatten)]
    store: StoreArgs,
}

impl SeedArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let records = default_rules().iter().map(RuleRecord::from).collect_vec();
        info!(n_records = records.len(), "seeding…");
        RuleFile::write(&self.store.path, records, self.force)
    }
}
