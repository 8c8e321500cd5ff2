use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{DashboardError, Result};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Validate that `tz_name` is a recognised IANA timezone identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.parse::<Tz>().is_ok()
}

/// Turn a timezone setting into a [`Tz`].
///
/// `"auto"` resolves to the system timezone (UTC when the system name is not
/// a known IANA zone); any other value must be a valid IANA name.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    if name.eq_ignore_ascii_case("auto") {
        let system = get_system_timezone();
        return Ok(system.parse::<Tz>().unwrap_or_else(|_| {
            warn!("system timezone \"{}\" not recognised, using UTC", system);
            Tz::UTC
        }));
    }
    name.parse::<Tz>()
        .map_err(|_| DashboardError::Config(format!("unknown timezone \"{}\"", name)))
}

// ── Day / month boundaries ────────────────────────────────────────────────────

/// Midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// The last representable instant of `day` (23:59:59.999999999).
pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| start_of_day(day))
}

/// First day of the calendar month containing `ts`.
pub fn month_start(ts: NaiveDateTime) -> NaiveDate {
    let date = ts.date();
    date.with_day(1).unwrap_or(date)
}

// ── PostDateParser ────────────────────────────────────────────────────────────

const NAIVE_DATETIME_FMTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Parses the `Post_Date` column into wall-clock timestamps.
///
/// Values carrying a UTC offset (`Z`, `+02:00`) are converted into the
/// parser's timezone; naive values are taken as already local. Date-only
/// values land on midnight.
#[derive(Debug, Clone, Copy)]
pub struct PostDateParser {
    tz: Tz,
}

impl PostDateParser {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Parse `raw`, returning `None` when no supported format matches.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Some(dt) = self.parse_with_offset(s) {
            return Some(dt);
        }

        for fmt in NAIVE_DATETIME_FMTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
        }

        for fmt in DATE_FMTS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(start_of_day(date));
            }
        }

        None
    }

    fn parse_with_offset(&self, s: &str) -> Option<NaiveDateTime> {
        let normalised = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
            Some(stripped) => format!("{}+00:00", stripped),
            None => s.to_string(),
        };

        let parsed = DateTime::parse_from_rfc3339(&normalised)
            .or_else(|_| DateTime::parse_from_str(&normalised, "%Y-%m-%d %H:%M:%S%.f%:z"))
            .ok()?;
        Some(parsed.with_timezone(&self.tz).naive_local())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
