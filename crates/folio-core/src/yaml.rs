/*
 * yaml.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * YAML loading for front matter.
 */

//! YAML loading for front matter.
//!
//! Front matter ends up in the page as `JSON.stringify` output, so values
//! are loaded the way a JavaScript YAML loader sees them rather than as
//! plain serde data:
//!
//! - Duplicate keys in a mapping are an error
//! - `<<` merge keys are resolved in place; keys written in the mapping
//!   itself win over merged ones
//! - Unquoted timestamps become ISO-8601 UTC strings (`2024-01-15` becomes
//!   `2024-01-15T00:00:00.000Z`); quoted ones stay as written
//! - Integral floats become integers (`1.0` becomes `1`) and non-finite
//!   floats become `null`
//! - Integer-like keys come first in ascending order, then the remaining
//!   keys in document order
//!
//! Errors carry the position serde_yaml reports.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};

const MERGE_KEY: &str = "<<";

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Load a single YAML document as JSON data.
pub fn load(text: &str) -> Result<Value, serde_yaml::Error> {
    ValueSeed { source: text }.deserialize(serde_yaml::Deserializer::from_str(text))
}

#[derive(Clone, Copy)]
struct ValueSeed<'de> {
    /// The whole document; borrowed strings are located inside it
    source: &'de str,
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'de> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> ValueSeed<'de> {
    /// Whether `v`, a slice of the source, sits between matching quotes.
    fn is_quoted(&self, v: &str) -> bool {
        let base = self.source.as_ptr() as usize;
        let start = v.as_ptr() as usize;
        if start < base || start + v.len() > base + self.source.len() {
            return false;
        }
        let start = start - base;
        let bytes = self.source.as_bytes();
        match start.checked_sub(1).and_then(|i| bytes.get(i)) {
            Some(&quote @ (b'"' | b'\'')) => bytes.get(start + v.len()) == Some(&quote),
            _ => false,
        }
    }
}

impl<'de> Visitor<'de> for ValueSeed<'de> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a YAML value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(number_from_f64(v))
    }

    fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Value, E> {
        if !self.is_quoted(v) {
            if let Some(iso) = timestamp_to_iso(v) {
                return Ok(Value::String(iso));
            }
        }
        Ok(Value::String(v.to_string()))
    }

    // Strings that could not be borrowed had escapes or were block
    // scalars, so they were never plain timestamps.
    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = access.next_element_seed(self)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::new();
        // Keys written in this mapping, as opposed to merged into it
        let mut own_keys = HashSet::new();

        while let Some(key) = access.next_key_seed(self)? {
            let value = access.next_value_seed(self)?;

            let key = key_to_string(key).map_err(<A::Error as de::Error>::custom)?;
            if key == MERGE_KEY {
                merge_into(&mut map, value).map_err(<A::Error as de::Error>::custom)?;
                continue;
            }
            if !own_keys.insert(key.clone()) {
                return Err(<A::Error as de::Error>::custom(format!(
                    "duplicate entry with key \"{key}\""
                )));
            }
            map.insert(key, value);
        }

        Ok(Value::Object(js_property_order(map)))
    }
}

fn number_from_f64(v: f64) -> Value {
    if !v.is_finite() {
        return Value::Null;
    }
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        return Value::from(v as i64);
    }
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Property name for a mapping key, as `String(key)` would give it.
fn key_to_string(key: Value) -> Result<String, &'static str> {
    match key {
        Value::String(s) => Ok(s),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => Err("complex mapping keys are not supported"),
    }
}

/// Apply a `<<` entry: copy keys that are not set yet.
fn merge_into(map: &mut Map<String, Value>, source: Value) -> Result<(), &'static str> {
    const UNMERGEABLE: &str = "cannot merge mappings; the provided source object is unacceptable";

    let sources = match source {
        Value::Object(source) => vec![source],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(source) => Ok(source),
                _ => Err(UNMERGEABLE),
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(UNMERGEABLE),
    };

    for source in sources {
        for (key, value) in source {
            if !map.contains_key(&key) {
                map.insert(key, value);
            }
        }
    }
    Ok(())
}

/// Reorder keys the way JavaScript enumerates object properties.
fn js_property_order(map: Map<String, Value>) -> Map<String, Value> {
    if !map.keys().any(|key| array_index(key).is_some()) {
        return map;
    }

    let (mut indexed, named): (Vec<_>, Vec<_>) = map
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());
    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.into_iter().chain(named).collect()
}

/// The numeric value of a canonical array index key (`0`, `12`, not `012`).
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Convert a YAML 1.1 timestamp to `Date.prototype.toISOString` form.
fn timestamp_to_iso(text: &str) -> Option<String> {
    let timestamp = Timestamp::parse(text)?;
    Some(format_iso(timestamp.epoch_millis()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timestamp {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millis: i64,
    /// Offset from UTC in minutes
    offset: i64,
}

impl Timestamp {
    fn parse(text: &str) -> Option<Self> {
        let mut cursor = Cursor::new(text);

        let year = cursor.digits(4, 4)?;
        cursor.expect(b'-')?;
        // A bare date needs two-digit month and day
        let date_only = text.len() == 10;
        let (min, max) = if date_only { (2, 2) } else { (1, 2) };
        let month = cursor.digits(min, max)?;
        cursor.expect(b'-')?;
        let day = cursor.digits(min, max)?;

        let mut timestamp = Timestamp {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millis: 0,
            offset: 0,
        };
        if cursor.is_done() {
            return date_only.then_some(timestamp);
        }

        if !cursor.eat(b'T') && !cursor.eat(b't') && cursor.skip_blanks() == 0 {
            return None;
        }
        timestamp.hour = cursor.digits(1, 2)?;
        cursor.expect(b':')?;
        timestamp.minute = cursor.digits(2, 2)?;
        cursor.expect(b':')?;
        timestamp.second = cursor.digits(2, 2)?;

        if cursor.eat(b'.') {
            let fraction = cursor.take_while(|b| b.is_ascii_digit());
            let mut millis = fraction.chars().take(3).collect::<String>();
            while millis.len() < 3 {
                millis.push('0');
            }
            timestamp.millis = millis.parse().ok()?;
        }

        cursor.skip_blanks();
        if cursor.eat(b'Z') {
            // UTC
        } else if let Some(sign) = cursor.sign() {
            let hours = cursor.digits(1, 2)?;
            let minutes = if cursor.eat(b':') {
                cursor.digits(2, 2)?
            } else {
                0
            };
            timestamp.offset = sign * (hours * 60 + minutes);
        }

        cursor.is_done().then_some(timestamp)
    }

    fn epoch_millis(&self) -> i64 {
        // Out-of-range fields roll over, as with `Date.UTC`
        let month_index = self.month - 1;
        let year = self.year + month_index.div_euclid(12);
        let month = month_index.rem_euclid(12) + 1;
        let days = days_from_civil(year, month, 1) + self.day - 1;

        let seconds = days * 86_400 + self.hour * 3_600 + self.minute * 60 + self.second
            - self.offset * 60;
        seconds * 1_000 + self.millis
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        self.eat(byte).then_some(())
    }

    fn sign(&mut self) -> Option<i64> {
        if self.eat(b'+') {
            Some(1)
        } else if self.eat(b'-') {
            Some(-1)
        } else {
            None
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(|&b| pred(b)) {
            self.pos += 1;
        }
        // Only ASCII bytes are ever taken
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default()
    }

    fn skip_blanks(&mut self) -> usize {
        self.take_while(|b| b == b' ' || b == b'\t').len()
    }

    fn digits(&mut self, min: usize, max: usize) -> Option<i64> {
        let start = self.pos;
        while self.pos - start < max && self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if self.pos - start < min {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn format_iso(epoch_millis: i64) -> String {
    let days = epoch_millis.div_euclid(86_400_000);
    let millis_of_day = epoch_millis.rem_euclid(86_400_000);
    let (year, month, day) = civil_from_days(days);

    let hour = millis_of_day / 3_600_000;
    let minute = millis_of_day / 60_000 % 60;
    let second = millis_of_day / 1_000 % 60;
    let millis = millis_of_day % 1_000;

    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{year:06}")
    };
    format!("{year}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}Z")
}
