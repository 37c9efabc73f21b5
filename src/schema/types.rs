// src/schema/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PriceError;

/// The six Java provinces a price column may belong to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Province {
    #[serde(rename = "Banten")]
    Banten,
    #[serde(rename = "DKI Jakarta")]
    DkiJakarta,
    #[serde(rename = "Jawa Barat")]
    JawaBarat,
    #[serde(rename = "Jawa Tengah")]
    JawaTengah,
    #[serde(rename = "DI Yogyakarta")]
    DiYogyakarta,
    #[serde(rename = "Jawa Timur")]
    JawaTimur,
}

impl Province {
    pub const ALL: [Province; 6] = [
        Province::Banten,
        Province::DkiJakarta,
        Province::JawaBarat,
        Province::JawaTengah,
        Province::DiYogyakarta,
        Province::JawaTimur,
    ];

    /// Column header / display name, exactly as it appears in the source file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Province::Banten => "Banten",
            Province::DkiJakarta => "DKI Jakarta",
            Province::JawaBarat => "Jawa Barat",
            Province::JawaTengah => "Jawa Tengah",
            Province::DiYogyakarta => "DI Yogyakarta",
            Province::JawaTimur => "Jawa Timur",
        }
    }

    /// Exact match against a column header.
    pub fn from_column(name: &str) -> Option<Province> {
        Province::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, whitespace-tolerant parse for user input.
impl FromStr for Province {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Province::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| PriceError::Config(format!("unknown province {:?}", s)))
    }
}

/// One (date, region) cell of the source table after melting.
///
/// `province` holds the raw column header; once a `Dataset` has been
/// normalized it is always one of [`Province::ALL`].
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Observation {
    pub date: NaiveDate,
    pub month: String,
    pub day: u32,
    pub year: i32,
    pub province: String,
    pub price: Option<f64>,
}
