//! Byte-size quantities
//!
//! A `DataSize` is a byte count that remembers the unit it was expressed in,
//! so `64MB` prints back as `64MB`. Two sizes are equal when they describe
//! the same number of bytes, regardless of unit.
//!
//! ## String Form
//! ```text
//! <integer>[ ]<unit>      e.g.  "64MB", "256 kB", "16B"
//! ```
//! Units are binary: 1kB = 1024B. The printed form always parses back to the
//! same byte count; a size that is not a whole number of its unit prints in
//! bytes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OptionsError, Result};

/// Unit a `DataSize` is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataSizeUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
}

impl DataSizeUnit {
    const ALL: [DataSizeUnit; 6] = [
        DataSizeUnit::Byte,
        DataSizeUnit::Kilobyte,
        DataSizeUnit::Megabyte,
        DataSizeUnit::Gigabyte,
        DataSizeUnit::Terabyte,
        DataSizeUnit::Petabyte,
    ];

    /// Number of bytes in one of this unit
    pub const fn factor(self) -> u64 {
        match self {
            DataSizeUnit::Byte => 1,
            DataSizeUnit::Kilobyte => 1 << 10,
            DataSizeUnit::Megabyte => 1 << 20,
            DataSizeUnit::Gigabyte => 1 << 30,
            DataSizeUnit::Terabyte => 1 << 40,
            DataSizeUnit::Petabyte => 1 << 50,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            DataSizeUnit::Byte => "B",
            DataSizeUnit::Kilobyte => "kB",
            DataSizeUnit::Megabyte => "MB",
            DataSizeUnit::Gigabyte => "GB",
            DataSizeUnit::Terabyte => "TB",
            DataSizeUnit::Petabyte => "PB",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.suffix() == suffix)
    }
}

/// A quantity of bytes with a display unit
#[derive(Debug, Clone, Copy)]
pub struct DataSize {
    bytes: u64,
    unit: DataSizeUnit,
}

impl DataSize {
    /// `value` units worth of bytes; saturates at `u64::MAX` bytes
    pub const fn of(value: u64, unit: DataSizeUnit) -> Self {
        DataSize {
            bytes: value.saturating_mul(unit.factor()),
            unit,
        }
    }

    pub const fn of_bytes(bytes: u64) -> Self {
        Self::of(bytes, DataSizeUnit::Byte)
    }

    pub const fn to_bytes(&self) -> u64 {
        self.bytes
    }

    pub const fn unit(&self) -> DataSizeUnit {
        self.unit
    }
}

impl PartialEq for DataSize {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for DataSize {}

impl Hash for DataSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for DataSize {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DataSize {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factor = self.unit.factor();
        if self.bytes % factor == 0 {
            write!(f, "{}{}", self.bytes / factor, self.unit.suffix())
        } else {
            // Only reachable for sizes that saturated in `of`
            write!(f, "{}{}", self.bytes, DataSizeUnit::Byte.suffix())
        }
    }
}

impl FromStr for DataSize {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OptionsError::InvalidDataSize(s.to_string());

        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (number, suffix) = trimmed.split_at(split);
        let unit = DataSizeUnit::from_suffix(suffix.trim_start()).ok_or_else(invalid)?;

        let value: u64 = number.parse().map_err(|_| invalid())?;
        value
            .checked_mul(unit.factor())
            .map(|bytes| DataSize { bytes, unit })
            .ok_or_else(invalid)
    }
}

impl Serialize for DataSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DataSizeVisitor;

        impl Visitor<'_> for DataSizeVisitor {
            type Value = DataSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a data size such as \"64MB\" or a byte count")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<DataSize, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<DataSize, E> {
                Ok(DataSize::of_bytes(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<DataSize, E> {
                u64::try_from(v)
                    .map(DataSize::of_bytes)
                    .map_err(|_| E::custom(OptionsError::InvalidDataSize(v.to_string())))
            }
        }

        deserializer.deserialize_any(DataSizeVisitor)
    }
}
