use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;

use crate::{core::zone::OperatingZone, db::RuleFile, prelude::*};

#[derive(Parser)]
pub struct StoreArgs {
    /// TOML file with the tariff rules.
    #[clap(long = "rules-path", env = "RULES_PATH", default_value = "rules.toml")]
    pub path: PathBuf,

    /// IANA time zone in which calendar days and rule start times are interpreted.
    #[clap(long = "time-zone", env = "TIME_ZONE", default_value = "Asia/Bangkok")]
    time_zone: Tz,
}

impl StoreArgs {
    pub fn zone(&self) -> OperatingZone {
        OperatingZone::from(self.time_zone)
    }

    /// Load the rules for the duration of one command.
    pub fn open(&self) -> Result<RuleFile> {
        RuleFile::open(&self.path, self.zone())
    }
}
