// src/config.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{PriceError, Result};
use crate::schema::Province;

pub use crate::process::month::MonthLocale;

/// What a raw price of exactly zero means.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    /// Remove the observation entirely, along with any empty price cell.
    #[default]
    Drop,
    /// Keep the observation with an absent price.
    Null,
}

/// Cleaning and filtering rules applied by `normalize`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    pub zero: ZeroPolicy,
    pub locale: MonthLocale,
    /// None lets every year through.
    pub years: Option<BTreeSet<i32>>,
    pub provinces: Vec<Province>,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::variant_a()
    }
}

impl Policy {
    /// English month names, zero prices dropped, all years.
    pub fn variant_a() -> Self {
        Policy {
            zero: ZeroPolicy::Drop,
            locale: MonthLocale::English,
            years: None,
            provinces: Province::ALL.to_vec(),
        }
    }

    /// Indonesian month names, zero prices nulled, 2021–2024 only.
    pub fn variant_b() -> Self {
        Policy {
            zero: ZeroPolicy::Null,
            locale: MonthLocale::Indonesian,
            years: Some((2021..=2024).collect()),
            provinces: Province::ALL.to_vec(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let policy: Policy = serde_yaml::from_str(text)
            .map_err(|e| PriceError::Config(format!("parsing policy: {}", e)))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| PriceError::Config(format!("reading {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded policy file");
        Self::from_yaml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.provinces.is_empty() {
            return Err(PriceError::Config("provinces must not be empty".into()));
        }
        if matches!(&self.years, Some(y) if y.is_empty()) {
            return Err(PriceError::Config(
                "years must not be empty; omit it to allow every year".into(),
            ));
        }
        Ok(())
    }

    pub fn allows_year(&self, year: i32) -> bool {
        self.years.as_ref().map_or(true, |ys| ys.contains(&year))
    }

    pub fn allows_province(&self, column: &str) -> bool {
        Province::from_column(column).is_some_and(|p| self.provinces.contains(&p))
    }
}

/// The two named presets, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    A,
    B,
}

impl Variant {
    pub fn policy(self) -> Policy {
        match self {
            Variant::A => Policy::variant_a(),
            Variant::B => Policy::variant_b(),
        }
    }
}

impl FromStr for Variant {
    type Err = PriceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "variant-a" => Ok(Variant::A),
            "b" | "variant-b" => Ok(Variant::B),
            other => Err(PriceError::Config(format!("unknown variant {:?}", other))),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::A => f.write_str("variant-a"),
            Variant::B => f.write_str("variant-b"),
        }
    }
}
