use std::str::FromStr;

use crate::prelude::*;

#[derive(
    Copy,
    Clone,
    Debug,
    Hash,
    Eq,
    PartialEq,
    clap::ValueEnum,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Provider {
    /// Metropolitan Electricity Authority (Bangkok, Nonthaburi, Samut Prakan).
    #[display("MEA")]
    #[serde(rename = "MEA")]
    #[value(name = "MEA", alias = "mea")]
    Mea,

    /// Provincial Electricity Authority (the rest of the country).
    #[display("PEA")]
    #[serde(rename = "PEA")]
    #[value(name = "PEA", alias = "pea")]
    Pea,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::Mea, Self::Pea];
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MEA" => Ok(Self::Mea),
            "PEA" => Ok(Self::Pea),
            _ => bail!("unknown provider `{s}`, expected `MEA` or `PEA`"),
        }
    }
}
