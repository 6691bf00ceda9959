use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use itertools::Itertools;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    cli::store::StoreArgs,
    core::{
        provider::Provider,
        rule::Period,
        scanner::Horizon,
        status::{Status, StatusQuery},
    },
    db::{RuleStore, record::RuleRecord},
    prelude::*,
    tables::{build_rules_table, build_status_table},
};

/// No provider is configured, so there is nothing to evaluate.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("provider has not been set, pass `--provider` or set `PROVIDER`")]
pub struct MissingProvider;

#[derive(Parser)]
pub struct StatusArgs {
    /// Utility provider whose tariff applies.
    #[clap(long, env = "PROVIDER")]
    provider: Option<Provider>,

    /// Evaluate at this RFC 3339 instant instead of now.
    #[clap(long)]
    at: Option<DateTime<FixedOffset>>,

    /// Number of days after today to search for the next change, up to a year.
    #[clap(
        long = "lookahead-days",
        env = "LOOKAHEAD_DAYS",
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(..=366),
    )]
    lookahead_days: u32,

    /// Print JSON instead of tables.
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    store: StoreArgs,
}

impl StatusArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let status = self.resolve()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&StatusResponse::from(&status))?);
        } else {
            println!("{}", build_status_table(&status));
            println!("{}", build_rules_table(&status.today));
        }
        Ok(())
    }

    fn resolve(&self) -> Result<Status> {
        let provider = self.provider.ok_or(MissingProvider)?;
        let rules = self.store.open()?.fetch(provider)?;
        let now = self.at.map_or_else(Utc::now, |at| at.with_timezone(&Utc));
        Ok(StatusQuery::builder()
            .rules(&rules)
            .provider(provider)
            .now(now)
            .zone(self.store.zone())
            .horizon(Horizon::from(self.lookahead_days))
            .resolve())
    }
}

/// Status as reported to the outside.
#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    provider: Provider,
    is_peak: bool,

    /// `-1` when no change is known within the horizon.
    time_to_next_change_seconds: i64,

    next_period: Period,
    next_change_at: Option<DateTime<FixedOffset>>,
    schedule_for_today: Vec<RuleRecord>,
}

impl From<&Status> for StatusResponse {
    fn from(status: &Status) -> Self {
        Self {
            provider: status.provider,
            is_peak: status.is_peak,
            time_to_next_change_seconds: status.time_to_next_change_seconds(),
            next_period: status.next_period(),
            next_change_at: status.transition.map(|transition| transition.at.fixed_offset()),
            schedule_for_today: status.today.iter().map(RuleRecord::from).collect_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env::temp_dir, fs};

    use super::*;
    use crate::db::{RuleFile, seed::default_rules};

    fn write_default_rules(name: &str) -> Result<std::path::PathBuf> {
        let path = temp_dir().join(format!("peaksmart-{name}-{}.toml", std::process::id()));
        RuleFile::write(&path, default_rules().iter().map(RuleRecord::from).collect(), true)?;
        Ok(path)
    }

    #[test]
    fn test_missing_provider_err() -> Result {
        let path = write_default_rules("missing-provider")?;
        let args = StatusArgs::try_parse_from([
            "status",
            "--rules-path",
            path.to_str().unwrap(),
            "--at",
            "2025-01-02T10:00:00+07:00",
        ])?;
        let args = StatusArgs { provider: None, ..args };
        let error = args.resolve().err().unwrap();
        fs::remove_file(&path)?;
        assert!(error.is::<MissingProvider>());
        Ok(())
    }

    #[test]
    fn test_resolve_ok() -> Result {
        let path = write_default_rules("resolve")?;
        let args = StatusArgs::try_parse_from([
            "status",
            "--provider",
            "MEA",
            "--rules-path",
            path.to_str().unwrap(),
            "--time-zone",
            "Asia/Bangkok",
            "--at",
            "2025-01-02T03:00:00Z",
        ])?;
        let status = args.resolve()?;
        fs::remove_file(&path)?;

        // 10:00 in Bangkok, on-peak until 22:00:
        assert!(status.is_peak);
        assert_eq!(status.time_to_next_change_seconds(), 12 * 3600);

        let response = serde_json::to_value(StatusResponse::from(&status))?;
        assert_eq!(response["provider"], "MEA");
        assert_eq!(response["isPeak"], true);
        assert_eq!(response["timeToNextChangeSeconds"], 43200);
        assert_eq!(response["nextPeriod"], "OFF_PEAK");
        assert_eq!(response["nextChangeAt"], "2025-01-02T22:00:00+07:00");
        assert_eq!(response["scheduleForToday"].as_array().unwrap().len(), 3);
        Ok(())
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = StatusArgs::try_parse_from(["status", "--provider", "EGAT"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookahead_days_bounded() {
        let parse = |days: &str| {
            StatusArgs::try_parse_from(["status", "--provider", "MEA", "--lookahead-days", days])
        };
        assert_eq!(parse("366").unwrap().lookahead_days, 366);
        assert!(parse("367").is_err());
        assert!(parse("4294967295").is_err());
    }

    #[test]
    fn test_no_known_change_response() -> Result {
        let path = write_default_rules("no-known-change")?;
        let args = StatusArgs::try_parse_from([
            "status",
            "--provider",
            "PEA",
            "--rules-path",
            path.to_str().unwrap(),
            "--at",
            "2025-04-13T12:00:00+07:00",
        ])?;
        let response = serde_json::to_value(StatusResponse::from(&args.resolve()?))?;
        fs::remove_file(&path)?;
        assert_eq!(response["isPeak"], false);
        assert_eq!(response["timeToNextChangeSeconds"], -1);
        assert_eq!(response["nextPeriod"], "OFF_PEAK");
        assert!(response.get("nextChangeAt").is_none());
        Ok(())
    }
}
