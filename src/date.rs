//! UTC timestamp values.
//!
//! `HostValue::Date` carries a calendar timestamp that serializes as a
//! fixed-format UTC string. The serializer formats dates through an
//! explicit hook on [`StringifyOptions`](crate::StringifyOptions), with
//! [`format_utc`] as the default.

/// A UTC calendar timestamp with second precision.
///
/// Months and days are 1-based. No calendar validation is performed; the
/// value serializes exactly as constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcDate {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl UtcDate {
    /// Create a timestamp. Months and days are 1-based.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Default date formatting: `YYYY-MM-DDTHH:mm:SSZ`, zero padded.
///
/// The serializer quotes and escapes the result, so an alternate formatter
/// cannot produce invalid JSON.
pub fn format_utc(d: &UtcDate) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        d.year, d.month, d.day, d.hour, d.minute, d.second
    )
}
