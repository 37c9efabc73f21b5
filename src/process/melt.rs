use chrono::Datelike;
use tracing::{debug, info};

use super::month::MonthLocale;
use super::raw_table::RawTable;
use crate::config::{Policy, ZeroPolicy};
use crate::dataset::Dataset;
use crate::schema::Observation;

/// Wide → long: one observation per (row, column), column by column.
///
/// No cleaning happens here; every column in the table is emitted, so the
/// result always has `num_rows() * num_columns()` entries.
pub fn melt(raw: &RawTable, locale: MonthLocale) -> Vec<Observation> {
    let mut out = Vec::with_capacity(raw.num_rows() * raw.num_columns());
    for (col_idx, column) in raw.columns.iter().enumerate() {
        for row in &raw.rows {
            let month = locale
                .name(row.date.month())
                .map(str::to_string)
                .unwrap_or_default();
            out.push(Observation {
                date: row.date,
                month,
                day: row.date.day(),
                year: row.date.year(),
                province: column.clone(),
                price: row.prices.get(col_idx).copied().flatten(),
            });
        }
    }
    out
}

/// Melt `raw` and apply `policy` in order: zero handling, province set, years.
///
/// Zero prices become absent. Under `ZeroPolicy::Drop` every observation
/// without a price is then removed; under `ZeroPolicy::Null` it is kept.
#[tracing::instrument(level = "info", skip_all, fields(zero = ?policy.zero, locale = ?policy.locale))]
pub fn normalize(raw: &RawTable, policy: &Policy) -> Dataset {
    let melted = melt(raw, policy.locale);
    let melted_len = melted.len();

    let mut zeros = 0usize;
    let observations: Vec<Observation> = melted
        .into_iter()
        .filter_map(|mut obs| {
            if obs.price == Some(0.0) {
                zeros += 1;
                obs.price = None;
            }
            // DROP removes every observation without a price, empty cells included
            match (policy.zero, obs.price) {
                (ZeroPolicy::Drop, None) => None,
                _ => Some(obs),
            }
        })
        .filter(|obs| policy.allows_province(&obs.province))
        .filter(|obs| policy.allows_year(obs.year))
        .collect();

    debug!(melted = melted_len, zeros, "applied zero policy");
    info!(
        observations = observations.len(),
        discarded = melted_len - observations.len(),
        "normalized dataset"
    );
    Dataset::new(observations, policy.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::load_from_reader;
    use crate::process::tests::{init_test_logging, SAMPLE};
    use crate::schema::Province;
    use anyhow::Result;

    #[test]
    fn melt_emits_rows_times_columns() -> Result<()> {
        let raw = load_from_reader(SAMPLE.as_bytes())?;
        let long = melt(&raw, MonthLocale::English);
        assert_eq!(long.len(), raw.num_rows() * raw.num_columns());
        assert_eq!(long.len(), 6 * 7);

        // column-major: first block is all of Banten
        assert!(long[..6].iter().all(|o| o.province == "Banten"));
        assert_eq!(long[0].month, "July");
        assert_eq!(long[0].day, 1);
        assert_eq!(long[0].year, 2020);
        Ok(())
    }

    #[test]
    fn indonesian_month_names() -> Result<()> {
        let raw = load_from_reader(SAMPLE.as_bytes())?;
        let long = melt(&raw, MonthLocale::Indonesian);
        assert_eq!(long[0].month, "Juli");
        assert!(long.iter().any(|o| o.month == "Agustus"));
        assert!(long.iter().all(|o| o.month != "July"));
        Ok(())
    }

    #[test]
    fn normalize_drops_unknown_regions() -> Result<()> {
        init_test_logging();
        let raw = load_from_reader(SAMPLE.as_bytes())?;
        let ds = normalize(&raw, &Policy::variant_a());
        assert!(ds
            .observations()
            .iter()
            .all(|o| Province::from_column(&o.province).is_some()));
        Ok(())
    }

    #[test]
    fn drop_and_null_agree_on_non_zero_values() -> Result<()> {
        let raw = load_from_reader(SAMPLE.as_bytes())?;
        let drop = Policy::variant_a();
        let null = Policy {
            zero: ZeroPolicy::Null,
            ..Policy::variant_a()
        };
        let dropped = normalize(&raw, &drop);
        let nulled = normalize(&raw, &null);

        // four zero cells inside the six provinces
        assert_eq!(nulled.len(), 6 * 6);
        assert_eq!(dropped.len(), 6 * 6 - 4);

        let present: Vec<_> = nulled
            .observations()
            .iter()
            .filter(|o| o.price.is_some())
            .cloned()
            .collect();
        assert_eq!(present, dropped.observations().to_vec());
        assert_eq!(
            nulled.observations().iter().filter(|o| o.price.is_none()).count(),
            4
        );
        Ok(())
    }

    #[test]
    fn drop_also_removes_empty_cells_null_keeps_them() -> Result<()> {
        let text = "Tanggal;Banten;Jawa Timur\n01/03/2022;;4500\n02/03/2022;0;4600\n";
        let raw = load_from_reader(text.as_bytes())?;

        let dropped = normalize(&raw, &Policy::variant_a());
        assert!(dropped.observations().iter().all(|o| o.province == "Jawa Timur"));
        assert_eq!(dropped.len(), 2);

        let nulled = normalize(
            &raw,
            &Policy {
                zero: ZeroPolicy::Null,
                ..Policy::variant_a()
            },
        );
        assert_eq!(nulled.len(), 4);
        assert_eq!(
            nulled
                .observations()
                .iter()
                .filter(|o| o.province == "Banten" && o.price.is_none())
                .count(),
            2
        );
        Ok(())
    }

    #[test]
    fn year_restriction_excludes_2020() -> Result<()> {
        let raw = load_from_reader(SAMPLE.as_bytes())?;
        let ds = normalize(&raw, &Policy::variant_b());
        assert!(!ds.is_empty());
        assert!(ds.observations().iter().all(|o| o.year != 2020));
        assert!(ds.observations().iter().all(|o| (2021..=2024).contains(&o.year)));
        Ok(())
    }
}
