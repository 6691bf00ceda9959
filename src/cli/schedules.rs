use chrono::NaiveDate;
use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::store::StoreArgs,
    core::{provider::Provider, rule::Rule, selector::select_day_rules},
    db::{RuleStore, record::RuleRecord},
    prelude::*,
    tables::build_rules_table,
};

#[derive(Parser)]
pub struct SchedulesArgs {
    #[clap(value_enum)]
    provider: Provider,

    /// Only show the rules in force on this date, holidays taking precedence.
    #[clap(long)]
    date: Option<NaiveDate>,

    /// Print JSON instead of a table.
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    store: StoreArgs,
}

impl SchedulesArgs {
    #[instrument(skip_all, fields(provider = %self.provider))]
    pub fn run(self) -> Result {
        let rules = self.list()?;
        if rules.is_empty() {
            warn!("no rules found");
        }
        if self.json {
            let records = rules.iter().map(RuleRecord::from).collect_vec();
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            println!("{}", build_rules_table(&rules));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Rule>> {
        let file = self.store.open()?;
        if file.n_rejected() != 0 {
            warn!(n_rejected = file.n_rejected(), "invalid records are not listed");
        }
        let rules = file.fetch(self.provider)?;
        Ok(match self.date {
            Some(date) => select_day_rules(&rules, self.provider, date).into_iter().collect(),
            None => rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env::temp_dir, fs};

    use chrono::Weekday;

    use super::*;
    use crate::{
        core::rule::AppliesTo,
        db::{RuleFile, seed::default_rules},
    };

    fn write_default_rules(name: &str) -> Result<std::path::PathBuf> {
        let path = temp_dir().join(format!("peaksmart-{name}-{}.toml", std::process::id()));
        RuleFile::write(&path, default_rules().iter().map(RuleRecord::from).collect(), true)?;
        Ok(path)
    }

    #[test]
    fn test_list_all() -> Result {
        let path = write_default_rules("schedules-all")?;
        let args = SchedulesArgs::try_parse_from([
            "schedules",
            "PEA",
            "--rules-path",
            path.to_str().unwrap(),
        ])?;
        let rules = args.list()?;
        fs::remove_file(&path)?;
        assert!(rules.iter().all(|rule| rule.provider == Provider::Pea));
        assert_eq!(rules.len(), 5 * 3 + 2 + 17);
        Ok(())
    }

    #[test]
    fn test_list_date() -> Result {
        let path = write_default_rules("schedules-date")?;
        let args = SchedulesArgs::try_parse_from([
            "schedules",
            "mea",
            "--date",
            "2025-01-06",
            "--rules-path",
            path.to_str().unwrap(),
        ])?;
        let rules = args.list()?;
        fs::remove_file(&path)?;
        assert_eq!(rules.len(), 3);
        assert!(rules.iter().all(|rule| rule.applies_to == AppliesTo::DayOfWeek(Weekday::Mon)));
        assert!(rules.iter().map(|rule| rule.start_time).is_sorted());
        Ok(())
    }

    #[test]
    fn test_list_holiday() -> Result {
        let path = write_default_rules("schedules-holiday")?;
        let args = SchedulesArgs::try_parse_from([
            "schedules",
            "MEA",
            "--date",
            "2025-04-14",
            "--rules-path",
            path.to_str().unwrap(),
        ])?;
        let rules = args.list()?;
        fs::remove_file(&path)?;
        assert_eq!(rules.len(), 1);
        assert!(rules[0].applies_to.is_specific_date());
        assert!(!rules[0].is_peak);
        Ok(())
    }

    #[test]
    fn test_provider_required() {
        assert!(SchedulesArgs::try_parse_from(["schedules"]).is_err());
    }
}
