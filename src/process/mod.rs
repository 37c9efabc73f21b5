// src/process/mod.rs
use csv::ReaderBuilder;
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info};

pub mod date_parser;
pub mod melt;
pub mod month;
pub mod raw_table;
pub mod utils;

pub use melt::{melt, normalize};
pub use raw_table::{RawRow, RawTable, DATE_COLUMN};

use crate::error::{PriceError, Result};

/// Open `path` and parse it as a `;`-separated wide price table.
///
/// - Header must start with `Tanggal`, followed by one column per region.
/// - Every row must carry exactly as many fields as the header.
/// - Dates are day-first; a bad date is a `Parse` error.
/// - Price cells must be empty or a non-negative number.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| PriceError::ingest(path, format!("opening file: {}", e)))?;
    let table = parse_table(BufReader::new(file), path)?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded price table"
    );
    Ok(table)
}

/// Same as [`load`], for a source that is already in memory.
pub fn load_from_reader<R: Read>(reader: R) -> Result<RawTable> {
    parse_table(reader, Path::new("<reader>"))
}

fn parse_table<R: Read>(reader: R, origin: &Path) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true) // field counts are checked below with a better message
        .from_reader(reader);

    // 1) Header: Tanggal + region columns
    let header = rdr
        .headers()
        .map_err(|e| PriceError::ingest(origin, format!("reading header: {}", e)))?
        .clone();
    let mut names = header.iter().map(utils::clean_str);
    match names.next().map(utils::strip_bom) {
        Some(first) if first == DATE_COLUMN => {}
        Some(first) => {
            return Err(PriceError::ingest(
                origin,
                format!("first column must be {:?}, found {:?}", DATE_COLUMN, first),
            ))
        }
        None => return Err(PriceError::ingest(origin, "empty file")),
    }
    let columns: Vec<String> = names.map(str::to_string).collect();
    if columns.is_empty() {
        return Err(PriceError::ingest(origin, "no price columns after Tanggal"));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(PriceError::ingest(origin, format!("duplicate column {:?}", dup)));
    }
    debug!(?columns, "header parsed");

    // 2) Data rows
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record =
            result.map_err(|e| PriceError::ingest(origin, format!("CSV parse error: {}", e)))?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != columns.len() + 1 {
            return Err(PriceError::ingest(
                origin,
                format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    columns.len() + 1,
                    record.len()
                ),
            ));
        }

        let raw_date = record.get(0).map(utils::clean_str).unwrap_or_default();
        let date = date_parser::parse_day_first(raw_date).ok_or_else(|| PriceError::Parse {
            line,
            value: raw_date.to_string(),
        })?;

        let prices = record
            .iter()
            .skip(1)
            .zip(&columns)
            .map(|(cell, column)| {
                utils::parse_price(cell).map_err(|bad| {
                    PriceError::ingest(
                        origin,
                        format!("line {}: column {:?} has non-price value {:?}", line, column, bad),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        rows.push(RawRow { date, prices });
    }

    Ok(RawTable { columns, rows })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub(crate) fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,padiprice=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Small two-year extract in the shape of the published price file.
    pub(crate) const SAMPLE: &str = "\
Tanggal;Banten;DKI Jakarta;Jawa Barat;Jawa Tengah;DI Yogyakarta;Jawa Timur;Bali
01/07/2020;4800;5100;4700;4600;4650;4550;5200
02/07/2020;0;5150;4750;4620;0;4560;5210
01/07/2021;4000;5200;4800;4700;4700;4600;5300
02/07/2021;5000;0;4850;4710;4720;4610;5310
03/07/2021;6000;5250;0;4720;4730;4620;5320
15/08/2021;5100;5300;4900;4730;4740;4630;5330
";

    #[test]
    fn test_load_sample_file() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(SAMPLE.as_bytes())?;

        let table = load(tmp.path())?;

        assert_eq!(table.num_rows(), 6);
        assert_eq!(
            table.columns,
            vec![
                "Banten",
                "DKI Jakarta",
                "Jawa Barat",
                "Jawa Tengah",
                "DI Yogyakarta",
                "Jawa Timur",
                "Bali"
            ]
        );
        assert_eq!(table.rows[0].date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
        assert_eq!(table.rows[1].prices[0], Some(0.0));
        assert_eq!(table.rows[5].date, NaiveDate::from_ymd_opt(2021, 8, 15).unwrap());
        Ok(())
    }

    #[test]
    fn missing_file_is_ingest_error() {
        let err = load("/definitely/not/here/datahargapadijawa.csv").unwrap_err();
        assert!(matches!(err, PriceError::Ingest { .. }), "{err}");
    }

    #[test]
    fn bom_and_empty_cells() -> Result<()> {
        let text = "\u{feff}Tanggal;Banten;Jawa Timur\n01/01/2022;;4500\n";
        let table = load_from_reader(text.as_bytes())?;
        assert_eq!(table.rows[0].prices, vec![None, Some(4500.0)]);
        Ok(())
    }

    #[test]
    fn malformed_shapes_are_ingest_errors() {
        let cases = [
            "",
            "Date;Banten\n01/01/2022;1\n",
            "Tanggal\n01/01/2022\n",
            "Tanggal;Banten;Banten\n01/01/2022;1;2\n",
            "Tanggal;Banten;Jawa Timur\n01/01/2022;4500\n",
            "Tanggal;Banten\n01/01/2022;mahal\n",
            "Tanggal;Banten\n01/01/2022;-5\n",
        ];
        for text in cases {
            let res = load_from_reader(text.as_bytes());
            assert!(
                matches!(res, Err(PriceError::Ingest { .. })),
                "expected ingest error for {:?}, got {:?}",
                text,
                res
            );
        }
    }

    #[test]
    fn bad_date_is_parse_error_with_line() {
        let text = "Tanggal;Banten\n01/01/2022;4500\n2022/13/01;4600\n";
        match load_from_reader(text.as_bytes()) {
            Err(PriceError::Parse { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "2022/13/01");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
