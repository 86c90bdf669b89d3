use crate::{Result, truncate_long};
use anyhow::Context;
use time::{Date, PrimitiveDateTime, Time, macros::format_description};

/// Textual decoding of temporal values, as handed over by drivers that return
/// dates and timestamps as strings.
pub trait Parse {
    fn parse(value: impl AsRef<str>) -> Result<Self>
    where
        Self: Sized;
}

impl Parse for Date {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        Date::parse(value, format_description!("[year]-[month]-[day]"))
            .with_context(|| format!("Cannot parse `{}` as time::Date", truncate_long!(value)))
    }
}

impl Parse for Time {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        Time::parse(
            value,
            format_description!("[hour]:[minute]:[second].[subsecond]"),
        )
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]:[second]")))
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]")))
        .with_context(|| format!("Cannot parse `{}` as time::Time", truncate_long!(value)))
    }
}

impl Parse for PrimitiveDateTime {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                value,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                value,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                value,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                value,
                format_description!("[year]-[month]-[day] [hour]:[minute]"),
            )
        })
        .with_context(|| {
            format!(
                "Cannot parse `{}` as time::PrimitiveDateTime",
                truncate_long!(value)
            )
        })
    }
}
