// src/dataset.rs

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::Policy;
use crate::schema::{Observation, Province};

/// The normalized, read-only long table a session queries against.
///
/// Built once by [`crate::process::normalize`]; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
    policy: Policy,
}

impl Dataset {
    pub(crate) fn new(observations: Vec<Observation>, policy: Policy) -> Self {
        Self {
            observations,
            policy,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct month names present, January first.
    pub fn months(&self) -> Vec<&'static str> {
        let present: BTreeSet<u32> = self.observations.iter().map(|o| o.date.month()).collect();
        present
            .into_iter()
            .filter_map(|m| self.policy.locale.name(m))
            .collect()
    }

    pub fn provinces(&self) -> &[Province] {
        &self.policy.provinces
    }

    /// Exact match on `month` and `province`. An empty series is a valid answer.
    pub fn query(&self, month: &str, province: Province) -> Series<'_> {
        let rows: Vec<&Observation> = self
            .observations
            .iter()
            .filter(|o| o.month == month && o.province == province.as_str())
            .collect();
        debug!(month, %province, matches = rows.len(), "query");
        Series { rows }
    }

    /// Query plus summary, with the empty case made explicit.
    pub fn select(&self, month: &str, province: Province) -> QueryOutcome<'_> {
        let series = self.query(month, province);
        if series.is_empty() {
            return QueryOutcome::Empty {
                month: month.to_string(),
                province,
            };
        }
        QueryOutcome::Found(Summary::new(month, province, series))
    }
}

/// Observations matching one (month, province) selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series<'a> {
    rows: Vec<&'a Observation>,
}

impl<'a> Series<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn average_price(&self) -> Option<f64> {
        average_price(self.iter())
    }
}

/// Arithmetic mean of the present prices; None when there are none.
pub fn average_price<'a, I>(observations: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let (sum, count) = observations
        .into_iter()
        .filter_map(|o| o.price)
        .fold((0.0, 0usize), |(s, n), p| (s + p, n + 1));
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub day: u32,
    pub price: f64,
}

/// Everything the presentation layer needs for one non-empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary<'a> {
    pub month: String,
    pub province: Province,
    /// None when every matching observation has an absent price.
    pub average_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// One line per year, x = day of month.
    pub by_year: BTreeMap<i32, Vec<ChartPoint>>,
    pub series: Series<'a>,
}

impl<'a> Summary<'a> {
    fn new(month: &str, province: Province, series: Series<'a>) -> Self {
        let mut by_year: BTreeMap<i32, Vec<ChartPoint>> = BTreeMap::new();
        for o in series.iter() {
            if let Some(price) = o.price {
                by_year.entry(o.year).or_default().push(ChartPoint { day: o.day, price });
            }
        }
        for points in by_year.values_mut() {
            points.sort_by_key(|p| p.day);
        }

        let prices: Vec<f64> = series.iter().filter_map(|o| o.price).collect();
        Summary {
            month: month.to_string(),
            province,
            average_price: series.average_price(),
            min_price: prices.iter().copied().reduce(f64::min),
            max_price: prices.iter().copied().reduce(f64::max),
            by_year,
            series,
        }
    }
}

/// Result of [`Dataset::select`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome<'a> {
    Found(Summary<'a>),
    /// No observation matched; show a notice instead of a chart.
    Empty { month: String, province: Province },
}

impl QueryOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, QueryOutcome::Empty { .. })
    }
}
