// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date parsing and formatting helpers shared by validation, autofill and
//! document generation.

use crate::error::DomainError;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

const ISO_DATE: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

const DAY_FIRST_DATE: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[day padding:none]/[month padding:none]/[year]");

/// Parses a `YYYY-MM-DD` date. A trailing time part (`YYYY-MM-DDT...`) is
/// ignored.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the input is not a calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    let date_part: &str = match trimmed.split_once('T') {
        Some((date, _)) => date,
        None => trimmed,
    };
    Date::parse(date_part, ISO_DATE).map_err(|_| DomainError::InvalidDate {
        value: value.to_string(),
    })
}

/// Normalizes a date coming from an external payload to `YYYY-MM-DD`.
///
/// Accepts ISO dates, `DD/MM/YYYY`, RFC 3339 timestamps and RFC 2822
/// timestamps. Anything else yields an empty string.
#[must_use]
pub fn normalize_date_input(value: &str) -> String {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let parsed: Option<Date> = Date::parse(trimmed, ISO_DATE)
        .or_else(|_| Date::parse(trimmed, DAY_FIRST_DATE))
        .or_else(|_| OffsetDateTime::parse(trimmed, &Rfc3339).map(OffsetDateTime::date))
        .or_else(|_| OffsetDateTime::parse(trimmed, &Rfc2822).map(OffsetDateTime::date))
        .ok();
    parsed.map_or_else(String::new, format_iso_date)
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The current local date, falling back to UTC when the local offset cannot
/// be determined.
#[must_use]
pub fn today_local() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Renders a stored ISO date as `DD/MM/YYYY`.
///
/// Blank input renders as `FECHA NO ESPECIFICADA`; input that is not an ISO
/// date is returned unchanged.
#[must_use]
pub fn format_display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::from("FECHA NO ESPECIFICADA");
    }
    parse_iso_date(value).map_or_else(
        |_| value.to_string(),
        |date| {
            format!(
                "{:02}/{:02}/{:04}",
                date.day(),
                u8::from(date.month()),
                date.year()
            )
        },
    )
}

const fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "enero",
        Month::February => "febrero",
        Month::March => "marzo",
        Month::April => "abril",
        Month::May => "mayo",
        Month::June => "junio",
        Month::July => "julio",
        Month::August => "agosto",
        Month::September => "septiembre",
        Month::October => "octubre",
        Month::November => "noviembre",
        Month::December => "diciembre",
    }
}

/// Renders a date in long Spanish form, e.g. `16 de octubre de 2026`.
#[must_use]
pub fn format_long_date(date: Date) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        month_name(date.month()),
        date.year()
    )
}
