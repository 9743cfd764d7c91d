//! Data point building and line protocol serialization

use std::{collections::BTreeMap, fmt};

use crate::{Error, Result};

/// Incrementally constructs a [`DataPoint`].
///
/// Create this via [`DataPoint::builder`].
#[derive(Debug)]
pub struct DataPointBuilder {
    measurement: String,
    // Keeping the tags sorted improves performance on the server side
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, FieldValue>,
    timestamp: Option<i64>,
}

impl DataPointBuilder {
    fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: Default::default(),
            fields: Default::default(),
            timestamp: Default::default(),
        }
    }

    /// Sets a tag, replacing any existing tag of the same name.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Sets a field, replacing any existing field of the same name.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets the timestamp, replacing any existing timestamp.
    ///
    /// The value is interpreted in the write precision configured for the client.
    pub fn timestamp(mut self, value: i64) -> Self {
        self.timestamp = Some(value);
        self
    }

    /// Constructs the data point; a point needs at least one field and finite floats
    pub fn build(self) -> Result<DataPoint> {
        if self.fields.is_empty() {
            return Err(Error::validation(format!(
                "data point '{}' has no fields",
                self.measurement
            )));
        }
        if let Some((name, _)) = self
            .fields
            .iter()
            .find(|(_, value)| matches!(value, FieldValue::F64(v) if !v.is_finite()))
        {
            return Err(Error::validation(format!(
                "field '{name}' of data point '{}' is not a finite number",
                self.measurement
            )));
        }
        let Self {
            measurement,
            tags,
            fields,
            timestamp,
        } = self;
        Ok(DataPoint {
            measurement,
            tags,
            fields,
            timestamp,
        })
    }
}

/// A single point of information to send to InfluxDB.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    measurement: String,
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, FieldValue>,
    timestamp: Option<i64>,
}

impl DataPoint {
    /// Create a builder to incrementally construct a `DataPoint`.
    pub fn builder(measurement: impl Into<String>) -> DataPointBuilder {
        DataPointBuilder::new(measurement)
    }

    /// Serialize to a line of line protocol
    ///
    /// `default_tags` are added unless the point sets a tag with the same name.
    pub fn to_line_protocol(&self, default_tags: &BTreeMap<String, String>) -> String {
        LineProtocol {
            point: self,
            default_tags,
        }
        .to_string()
    }
}

struct LineProtocol<'a> {
    point: &'a DataPoint,
    default_tags: &'a BTreeMap<String, String>,
}

impl fmt::Display for LineProtocol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.point;
        write!(f, "{}", Escaped(&point.measurement, MEASUREMENT_DELIMITERS))?;

        let mut tags: BTreeMap<&str, &str> = self
            .default_tags
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        tags.extend(point.tags.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for (k, v) in tags {
            write!(
                f,
                ",{}={}",
                Escaped(k, KEY_DELIMITERS),
                Escaped(v, KEY_DELIMITERS)
            )?;
        }

        for (i, (k, v)) in point.fields.iter().enumerate() {
            let d = if i == 0 { " " } else { "," };
            write!(f, "{}{}={}", d, Escaped(k, KEY_DELIMITERS), v)?;
        }

        if let Some(ts) = point.timestamp {
            write!(f, " {ts}")?;
        }

        Ok(())
    }
}

const MEASUREMENT_DELIMITERS: &[char] = &[',', ' ', '\n'];
const KEY_DELIMITERS: &[char] = &[',', '=', ' ', '\n'];
const STRING_FIELD_DELIMITERS: &[char] = &['"', '\\'];

/// Writes a string with every delimiter escaped by a backslash
struct Escaped<'a>(&'a str, &'static [char]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;

        for (idx, delim) in self.0.match_indices(self.1) {
            let s = &self.0[last..idx];
            match delim {
                "\n" => write!(f, r#"{s}\n"#)?,
                _ => write!(f, r#"{s}\{delim}"#)?,
            }
            last = idx + delim.len();
        }

        f.write_str(&self.0[last..])
    }
}

/// Possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A true or false value
    Bool(bool),
    /// A 64-bit floating point number
    F64(f64),
    /// A 64-bit signed integer number
    I64(i64),
    /// A 64-bit unsigned integer number
    U64(u64),
    /// A string value
    String(String),
}

impl From<bool> for FieldValue {
    fn from(other: bool) -> Self {
        Self::Bool(other)
    }
}

impl From<f64> for FieldValue {
    fn from(other: f64) -> Self {
        Self::F64(other)
    }
}

impl From<i64> for FieldValue {
    fn from(other: i64) -> Self {
        Self::I64(other)
    }
}

impl From<u64> for FieldValue {
    fn from(other: u64) -> Self {
        Self::U64(other)
    }
}

impl From<&str> for FieldValue {
    fn from(other: &str) -> Self {
        Self::String(other.into())
    }
}

impl From<String> for FieldValue {
    fn from(other: String) -> Self {
        Self::String(other)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FieldValue::*;

        match self {
            Bool(v) => write!(f, "{}", if *v { "t" } else { "f" }),
            F64(v) => write!(f, "{v}"),
            I64(v) => write!(f, "{v}i"),
            U64(v) => write!(f, "{v}u"),
            String(v) => write!(f, r#""{}""#, Escaped(v, STRING_FIELD_DELIMITERS)),
        }
    }
}
