// src/report.rs

use std::fmt::Write;

use crate::dataset::{QueryOutcome, Summary};

/// `4950.4` → `"Rp 4.950"`: whole rupiah, `.` between thousands.
pub fn format_rupiah(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Notice shown instead of a chart when nothing matched.
pub fn no_data_notice(month: &str, province: &str) -> String {
    format!("Tidak ada data untuk {} pada bulan {}.", province, month)
}

pub fn render_text(outcome: &QueryOutcome<'_>) -> String {
    match outcome {
        QueryOutcome::Empty { month, province } => no_data_notice(month, province.as_str()),
        QueryOutcome::Found(summary) => render_summary(summary),
    }
}

fn render_summary(s: &Summary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Harga Harian Padi di {} pada Bulan {}", s.province, s.month);
    match s.average_price {
        Some(avg) => {
            let _ = writeln!(out, "Rata-rata harga: {}", format_rupiah(avg));
        }
        None => {
            let _ = writeln!(out, "Rata-rata harga: tidak tersedia");
        }
    }
    if let (Some(lo), Some(hi)) = (s.min_price, s.max_price) {
        let _ = writeln!(
            out,
            "Terendah: {}  Tertinggi: {}",
            format_rupiah(lo),
            format_rupiah(hi)
        );
    }
    for (year, points) in &s.by_year {
        let line = points
            .iter()
            .map(|p| format!("{:>2}: {}", p.day, format_rupiah(p.price)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Tahun {}: {}", year, line);
    }
    out
}

pub fn render_json(outcome: &QueryOutcome<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
