//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or numeric strings for counters and progress.
//! - Accept booleans, `0`/`1`, or their string forms for job flags.
//!
//! Invariants / assumptions:
//! - Splunk may return `"123"` or `123` depending on endpoint/version.
//! - Errors are generic parse errors and never echo response bodies.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    U64(u64),
    I64(i64),
    F64(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    U64(u64),
    String(String),
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::U64(v) => Ok(v),
        NumberOrString::I64(v) => u64::try_from(v).map_err(D::Error::custom),
        NumberOrString::F64(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
        NumberOrString::F64(v) => Err(D::Error::custom(format!("expected integer, got {}", v))),
        NumberOrString::String(s) => s.trim().parse::<u64>().map_err(D::Error::custom),
    }
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::U64(v) => Ok(v as f64),
        NumberOrString::I64(v) => Ok(v as f64),
        NumberOrString::F64(v) => Ok(v),
        NumberOrString::String(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
    }
}

pub fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::U64(0) => Ok(false),
        Flag::U64(1) => Ok(true),
        Flag::U64(v) => Err(D::Error::custom(format!("invalid flag value {}", v))),
        Flag::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value '{}'", other))),
        },
    }
}
