use std::fmt;
use std::str::FromStr;

use time::{Date, Month};

/// Simple "YYYYMMDD" snapshot-date utility with safe ordering and conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapDate {
    pub year: u16,
    pub month: u8, // 1..=12
    pub day: u8,   // 1..=31
}

impl SnapDate {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        assert!((1..=12).contains(&month), "Month must be 1..=12");
        assert!((1..=31).contains(&day), "Day must be 1..=31");
        Self { year, month, day }
    }

    /// Parse the compact filename form, e.g. "20240521".
    pub fn parse_compact(s: &str) -> Result<Self, String> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err("expected YYYYMMDD".into());
        }
        let year: u16 = s[0..4].parse().map_err(|_| "invalid year")?;
        let month: u8 = s[4..6].parse().map_err(|_| "invalid month")?;
        let day: u8 = s[6..8].parse().map_err(|_| "invalid day")?;
        if !(1..=12).contains(&month) {
            return Err("month must be 01..12".into());
        }
        if !(1..=31).contains(&day) {
            return Err("day must be 01..31".into());
        }
        Ok(Self { year, month, day })
    }

    /// The compact form used in snapshot filenames.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Calendar validation happens here, not in the parser: "20240230" parses
    /// but fails conversion.
    pub fn to_date(self) -> Result<Date, String> {
        let month = Month::try_from(self.month).map_err(|e| e.to_string())?;
        Date::from_calendar_date(self.year as i32, month, self.day).map_err(|e| e.to_string())
    }
}

impl fmt::Display for SnapDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for SnapDate {
    type Err = String;
    /// Accepts both "YYYY-MM-DD" and the compact "YYYYMMDD".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('-') {
            return Self::parse_compact(s);
        }
        let parts: Vec<_> = s.split('-').collect();
        if parts.len() != 3 {
            return Err("expected YYYY-MM-DD".into());
        }
        let year: u16 = parts[0].parse().map_err(|_| "invalid year")?;
        let month: u8 = parts[1].parse().map_err(|_| "invalid month")?;
        let day: u8 = parts[2].parse().map_err(|_| "invalid day")?;
        if !(1..=12).contains(&month) {
            return Err("month must be 01..12".into());
        }
        if !(1..=31).contains(&day) {
            return Err("day must be 01..31".into());
        }
        Ok(Self { year, month, day })
    }
}

impl From<Date> for SnapDate {
    fn from(d: Date) -> Self {
        Self {
            year: d.year().clamp(0, u16::MAX as i32) as u16,
            month: d.month() as u8,
            day: d.day(),
        }
    }
}
