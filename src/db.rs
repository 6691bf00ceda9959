pub mod record;
pub mod seed;

use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{provider::Provider, rule::Rule, zone::OperatingZone},
    db::record::RuleRecord,
    prelude::*,
};

/// Source of tariff rules.
pub trait RuleStore {
    /// All rules of the provider, in storage order.
    fn fetch(&self, provider: Provider) -> Result<Vec<Rule>>;
}

impl RuleStore for [Rule] {
    fn fetch(&self, provider: Provider) -> Result<Vec<Rule>> {
        Ok(self.iter().filter(|rule| rule.provider == provider).copied().collect())
    }
}

impl RuleStore for Vec<Rule> {
    fn fetch(&self, provider: Provider) -> Result<Vec<Rule>> {
        self.as_slice().fetch(provider)
    }
}

/// On-disk rule file layout.
#[derive(Default, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

/// Rules loaded from a TOML file.
///
/// Invalid records are reported and left out, so that one broken row does not take down
/// the whole schedule.
#[must_use]
pub struct RuleFile {
    rules: Vec<Rule>,
    n_rejected: usize,
}

impl RuleFile {
    #[instrument(skip_all, fields(path = %path.as_ref().display(), zone = %zone))]
    pub fn open<P: AsRef<Path> + Debug>(path: P, zone: OperatingZone) -> Result<Self> {
        let path = path.as_ref();
        info!("loading the rules…");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the rules from `{}`", path.display()))?;
        let document: RuleDocument = toml::from_str(&contents)
            .with_context(|| format!("failed to parse the rules from `{}`", path.display()))?;
        Ok(Self::from_records(&document.rules, zone))
    }

    pub fn from_records(records: &[RuleRecord], zone: OperatingZone) -> Self {
        let mut rules = Vec::with_capacity(records.len());
        let mut n_rejected = 0;
        for (index, record) in records.iter().enumerate() {
            match record.to_rule(zone) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    warn!(index, provider = %record.provider, "skipping the rule: {error:#}");
                    n_rejected += 1;
                }
            }
        }
        info!(n_rules = rules.len(), n_rejected, "loaded");
        Self { rules, n_rejected }
    }

    #[must_use]
    pub const fn n_rejected(&self) -> usize {
        self.n_rejected
    }

    /// Write the records, refusing to replace an existing file unless `overwrite` is set.
    #[instrument(skip_all, fields(path = %path.display(), n_records = records.len()))]
    pub fn write(path: &Path, records: Vec<RuleRecord>, overwrite: bool) -> Result {
        ensure!(overwrite || !path.exists(), "`{}` already exists", path.display());
        info!("writing the rules…");
        let document = RuleDocument { rules: records };
        fs::write(path, toml::to_string(&document)?)
            .with_context(|| format!("failed to write the rules to `{}`", path.display()))?;
        Ok(())
    }
}

impl RuleStore for RuleFile {
    fn fetch(&self, provider: Provider) -> Result<Vec<Rule>> {
        self.rules.fetch(provider)
    }
}
