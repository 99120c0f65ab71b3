use chrono::{Datelike, Local, NaiveDate};

use crate::errors::InternalError;
use crate::types::internal::QueryParams;

/// Inclusive day range used by every statistics query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Row-value predicate over the day columns of the telemetry facts
    pub const SQL_PREDICATE: &'static str = "(log_year, log_month, log_day) >= (:startYear, :startMonth, :startDay) \
         and (log_year, log_month, log_day) <= (:endYear, :endMonth, :endDay)";

    /// Fill in missing bounds: start defaults to 1970-01-01, end to today
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self::resolve_at(start, end, Local::now().date_naive())
    }

    pub fn resolve_at(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            start: start.unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()),
            end: end.unwrap_or(today),
        }
    }

    /// Parse a `YYYY-MM-DD` day
    pub fn parse_day(value: &str) -> Result<NaiveDate, InternalError> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|e| InternalError::parse("day", format!("'{}': {}", value, e)))
    }

    /// Parse optional `YYYY-MM-DD` bounds and resolve them
    pub fn from_days(start: Option<&str>, end: Option<&str>) -> Result<Self, InternalError> {
        let start = start.filter(|s| !s.trim().is_empty()).map(Self::parse_day).transpose()?;
        let end = end.filter(|s| !s.trim().is_empty()).map(Self::parse_day).transpose()?;
        Ok(Self::resolve(start, end))
    }

    /// Bind `startYear` .. `endDay`
    pub fn bind(&self, params: &mut QueryParams) {
        params
            .insert("startYear", self.start.year())
            .insert("startMonth", self.start.month() as i32)
            .insert("startDay", self.start.day() as i32)
            .insert("endYear", self.end.year())
            .insert("endMonth", self.end.month() as i32)
            .insert("endDay", self.end.day() as i32);
    }

    /// `yyyymmdd` key of the first day
    pub fn start_key(&self) -> i32 {
        day_key(self.start)
    }

    /// `yyyymmdd` key of the last day
    pub fn end_key(&self) -> i32 {
        day_key(self.end)
    }
}

fn day_key(day: NaiveDate) -> i32 {
    day.year() * 10000 + day.month() as i32 * 100 + day.day() as i32
}
