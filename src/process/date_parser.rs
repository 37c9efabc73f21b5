use chrono::NaiveDate;

/// Day-first parse of a `Tanggal` cell.
///
/// Accepts `D/M/YYYY`, `D-M-YYYY`, `D.M.YYYY` (one or two digit day and
/// month) and ISO `YYYY-MM-DD`. A trailing time part (`"01/07/2021 00:00"`)
/// is ignored. Returns None on anything else, including impossible dates.
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let s = s.split_whitespace().next()?;
    let sep = s.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    // ISO year-first form is only recognised with '-' and a 4-digit lead.
    let (day, month, year) = if sep == '-' && parts[0].len() == 4 {
        (parts[2], parts[1], parts[0])
    } else {
        (parts[0], parts[1], parts[2])
    };
    if day.len() > 2 || month.len() > 2 || year.len() != 4 {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn day_comes_before_month() {
        assert_eq!(parse_day_first("03/07/2021"), ymd(2021, 7, 3));
        assert_eq!(parse_day_first("3/7/2021"), ymd(2021, 7, 3));
        assert_eq!(parse_day_first("13-01-2022"), ymd(2022, 1, 13));
        assert_eq!(parse_day_first("31.12.2023"), ymd(2023, 12, 31));
    }

    #[test]
    fn iso_and_trailing_time() {
        assert_eq!(parse_day_first("2024-02-29"), ymd(2024, 2, 29));
        assert_eq!(parse_day_first(" 01/07/2021 00:00:00"), ymd(2021, 7, 1));
    }

    #[test]
    fn rejects_bad_dates() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("kemarin"), None);
        assert_eq!(parse_day_first("07/13/2021"), None);
        assert_eq!(parse_day_first("29/02/2023"), None);
        assert_eq!(parse_day_first("01/07/21"), None);
        assert_eq!(parse_day_first("01/07"), None);
        assert_eq!(parse_day_first("2021/07/01"), None);
    }
}
