/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Strip a UTF-8 byte-order mark some spreadsheet exports put on the first header.
pub fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Parse one price cell.
///
/// - empty cell          → `Ok(None)`
/// - `4500`, `4500.5`    → `Ok(Some(..))`
/// - `4500,5` (decimal comma, no dot) → `Ok(Some(4500.5))`
/// - negative, NaN, text → `Err(cleaned cell)`
///
/// Zero is returned as `Some(0.0)`; the zero policy decides what it means.
pub fn parse_price(raw: &str) -> Result<Option<f64>, String> {
    let c = clean_str(raw);
    if c.is_empty() {
        return Ok(None);
    }
    let v: f64 = if c.contains(',') && !c.contains('.') {
        c.replacen(',', ".", 1).parse()
    } else {
        c.parse()
    }
    .map_err(|_| c.to_string())?;

    if !v.is_finite() || v < 0.0 {
        return Err(c.to_string());
    }
    Ok(Some(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_space() {
        assert_eq!(clean_str("  \" 4500 \" "), "4500");
        assert_eq!(clean_str("Banten"), "Banten");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn parse_price_variants() {
        assert_eq!(parse_price(""), Ok(None));
        assert_eq!(parse_price("  "), Ok(None));
        assert_eq!(parse_price("0"), Ok(Some(0.0)));
        assert_eq!(parse_price("4500"), Ok(Some(4500.0)));
        assert_eq!(parse_price("4500.5"), Ok(Some(4500.5)));
        assert_eq!(parse_price("4500,5"), Ok(Some(4500.5)));
    }

    #[test]
    fn parse_price_rejects_garbage() {
        assert_eq!(parse_price("-10"), Err("-10".to_string()));
        assert_eq!(parse_price("n/a"), Err("n/a".to_string()));
        assert_eq!(parse_price("NaN"), Err("NaN".to_string()));
        assert_eq!(parse_price("4.500,00"), Err("4.500,00".to_string()));
    }

    #[test]
    fn bom_is_removed() {
        assert_eq!(strip_bom("\u{feff}Tanggal"), "Tanggal");
        assert_eq!(strip_bom("Tanggal"), "Tanggal");
    }
}
