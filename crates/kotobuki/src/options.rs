//! Render options and locale-aware date/time formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Options shared by every render. Holds no mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Locale used by the `date` and `time` placeholder transforms
    pub locale: Locale,
    /// Base path prepended to relative image references
    pub asset_base: Option<String>,
}

impl RenderOptions {
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_asset_base(mut self, asset_base: impl Into<String>) -> Self {
        self.asset_base = Some(asset_base.into());
        self
    }

    /// Resolve an image reference against `asset_base`.
    ///
    /// Absolute references (`scheme:` or `//host`) and references without a
    /// configured base are returned unchanged.
    pub fn asset_url(&self, reference: &str) -> String {
        let Some(base) = self.asset_base.as_deref() else {
            return reference.to_string();
        };
        if reference.is_empty() || reference.starts_with("//") || has_scheme(reference) {
            return reference.to_string();
        }
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }
}

fn has_scheme(reference: &str) -> bool {
    match reference.find(':') {
        Some(pos) if pos > 0 => reference[..pos]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

/// Locale for calendar and clock formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }

    /// Format the calendar date of `input`, or `None` if it has no date part
    pub fn format_date(&self, input: &str) -> Option<String> {
        let date = parse_moment(input)?.date?;
        Some(match self {
            Locale::ZhCn => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            Locale::EnUs => date.format("%B %-d, %Y").to_string(),
        })
    }

    /// Format the clock time of `input`, or `None` if it has no time part
    pub fn format_time(&self, input: &str) -> Option<String> {
        let time = parse_moment(input)?.time?;
        Some(match self {
            Locale::ZhCn => time.format("%H:%M").to_string(),
            Locale::EnUs => time.format("%-I:%M %p").to_string(),
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "zh-cn" | "zh" => Ok(Locale::ZhCn),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

struct Moment {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse a date, time or date-time string. Offsets are kept as wall-clock
/// time so formatting never depends on the host time zone.
fn parse_moment(input: &str) -> Option<Moment> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        let local = dt.naive_local();
        return Some(Moment {
            date: Some(local.date()),
            time: Some(local.time()),
        });
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Moment {
                date: Some(dt.date()),
                time: Some(dt.time()),
            });
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(Moment {
                date: Some(date),
                time: None,
            });
        }
    }
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(input, format) {
            return Some(Moment {
                date: None,
                time: Some(time),
            });
        }
    }
    None
}
