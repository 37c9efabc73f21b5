use serde::{Deserialize, Serialize};

static ENGLISH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static INDONESIAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Language used for the derived `month` field.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthLocale {
    #[default]
    English,
    Indonesian,
}

impl MonthLocale {
    fn table(self) -> &'static [&'static str; 12] {
        match self {
            MonthLocale::English => &ENGLISH,
            MonthLocale::Indonesian => &INDONESIAN,
        }
    }

    /// Name for calendar month `month` (1–12); None outside that range.
    pub fn name(self, month: u32) -> Option<&'static str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.table().get(idx).copied()
    }

    /// Calendar month number (1–12) for a name in this locale, ignoring case.
    pub fn parse(self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.table()
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .map(|i| i as u32 + 1)
    }

    /// Canonical spelling of a user-typed month, e.g. `"juli"` → `"Juli"`.
    pub fn canonical(self, name: &str) -> Option<&'static str> {
        self.parse(name).and_then(|m| self.name(m))
    }
}
