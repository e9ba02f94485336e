//! Symbolic constant substitution.
//!
//! Templates refer to primitive widths and boundary values through tokens
//! such as `int32` or `UINT16_NULL`. The [`SubstitutionTable`] maps them to
//! C++ expressions. Tokens it does not know pass through unchanged.
//!
//! Null values follow the SBE reservation convention: signed integers reserve
//! their most negative value, unsigned integers their most positive value,
//! and floating point types use NaN.

use sbecpp_schema::PrimitiveType;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static CPP_ENTRIES: &[(&str, &str)] = &[
    ("int8", "std::int8_t"),
    ("int16", "std::int16_t"),
    ("int32", "std::int32_t"),
    ("int64", "std::int64_t"),
    ("uint8", "std::uint8_t"),
    ("uint16", "std::uint16_t"),
    ("uint32", "std::uint32_t"),
    ("uint64", "std::uint64_t"),
    ("CHAR_NULL", "0"),
    ("CHAR_MIN", "0x20"),
    ("CHAR_MAX", "0x7e"),
    ("INT8_NULL", "std::numeric_limits<std::int8_t>::min()"),
    ("INT8_MIN", "std::numeric_limits<std::int8_t>::min() + 1"),
    ("INT8_MAX", "std::numeric_limits<std::int8_t>::max()"),
    ("INT16_NULL", "std::numeric_limits<std::int16_t>::min()"),
    ("INT16_MIN", "std::numeric_limits<std::int16_t>::min() + 1"),
    ("INT16_MAX", "std::numeric_limits<std::int16_t>::max()"),
    ("INT32_NULL", "std::numeric_limits<std::int32_t>::min()"),
    ("INT32_MIN", "std::numeric_limits<std::int32_t>::min() + 1"),
    ("INT32_MAX", "std::numeric_limits<std::int32_t>::max()"),
    ("INT64_NULL", "std::numeric_limits<std::int64_t>::min()"),
    ("INT64_MIN", "std::numeric_limits<std::int64_t>::min() + 1"),
    ("INT64_MAX", "std::numeric_limits<std::int64_t>::max()"),
    ("UINT8_NULL", "std::numeric_limits<std::uint8_t>::max()"),
    ("UINT8_MIN", "std::numeric_limits<std::uint8_t>::min()"),
    ("UINT8_MAX", "std::numeric_limits<std::uint8_t>::max() - 1"),
    ("UINT16_NULL", "std::numeric_limits<std::uint16_t>::max()"),
    ("UINT16_MIN", "std::numeric_limits<std::uint16_t>::min()"),
    ("UINT16_MAX", "std::numeric_limits<std::uint16_t>::max() - 1"),
    ("UINT32_NULL", "std::numeric_limits<std::uint32_t>::max()"),
    ("UINT32_MIN", "std::numeric_limits<std::uint32_t>::min()"),
    ("UINT32_MAX", "std::numeric_limits<std::uint32_t>::max() - 1"),
    ("UINT64_NULL", "std::numeric_limits<std::uint64_t>::max()"),
    ("UINT64_MIN", "std::numeric_limits<std::uint64_t>::min()"),
    ("UINT64_MAX", "std::numeric_limits<std::uint64_t>::max() - 1"),
    ("FLOAT_NULL", "std::numeric_limits<float>::quiet_NaN()"),
    ("FLOAT_MIN", "std::numeric_limits<float>::min()"),
    ("FLOAT_MAX", "std::numeric_limits<float>::max()"),
    ("DOUBLE_NULL", "std::numeric_limits<double>::quiet_NaN()"),
    ("DOUBLE_MIN", "std::numeric_limits<double>::min()"),
    ("DOUBLE_MAX", "std::numeric_limits<double>::max()"),
];

static CPP_TABLE: LazyLock<SubstitutionTable> =
    LazyLock::new(|| SubstitutionTable::from_entries(CPP_ENTRIES));

/// Read-only token to literal mapping.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    entries: HashMap<&'static str, &'static str>,
}

impl SubstitutionTable {
    /// Returns the process-wide C++ table.
    #[must_use]
    pub fn cpp() -> &'static Self {
        &CPP_TABLE
    }

    /// Builds a table from `(token, literal)` pairs. Later pairs win.
    #[must_use]
    pub fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    /// Returns the literal for `token`, or `token` itself when unknown.
    #[must_use]
    pub fn lookup<'a>(&self, token: &'a str) -> &'a str {
        self.entries.get(token).copied().unwrap_or(token)
    }

    /// Returns true if `token` has an explicit entry.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Returns the target spelling of a primitive (`int32` ->
    /// `std::int32_t`, `double` -> `double`).
    #[must_use]
    pub fn primitive(&self, prim: PrimitiveType) -> &'static str {
        self.entries
            .get(prim.sbe_name())
            .copied()
            .unwrap_or(prim.sbe_name())
    }

    /// Returns the literal for a primitive's sentinel.
    #[must_use]
    pub fn sentinel(&self, prim: PrimitiveType, sentinel: Sentinel) -> String {
        let token = sentinel_token(prim, sentinel);
        self.lookup(&token).to_string()
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Boundary value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Reserved value meaning "absent".
    Null,
    /// Smallest valid value.
    Min,
    /// Largest valid value.
    Max,
}

impl Sentinel {
    /// Token suffix.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

/// Returns the table token for a primitive sentinel (`INT32_NULL`).
#[must_use]
pub fn sentinel_token(prim: PrimitiveType, sentinel: Sentinel) -> String {
    format!(
        "{}_{}",
        prim.sbe_name().to_ascii_uppercase(),
        sentinel.suffix()
    )
}

/// Numeric value of a sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SentinelValue {
    /// Integer and character sentinels.
    Int(i128),
    /// Floating point sentinels.
    Float(f64),
}

impl fmt::Display for SentinelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:e}"),
        }
    }
}

/// Returns the value a sentinel literal evaluates to.
///
/// Float and double values are widened to `f64`.
#[must_use]
pub fn sentinel_value(prim: PrimitiveType, sentinel: Sentinel) -> SentinelValue {
    use PrimitiveType as P;
    use Sentinel as S;

    let (lo, hi): (i128, i128) = match prim {
        P::Char => {
            return SentinelValue::Int(match sentinel {
                S::Null => 0,
                S::Min => 0x20,
                S::Max => 0x7e,
            });
        }
        P::Float => {
            return SentinelValue::Float(match sentinel {
                S::Null => f64::NAN,
                S::Min => f64::from(f32::MIN_POSITIVE),
                S::Max => f64::from(f32::MAX),
            });
        }
        P::Double => {
            return SentinelValue::Float(match sentinel {
                S::Null => f64::NAN,
                S::Min => f64::MIN_POSITIVE,
                S::Max => f64::MAX,
            });
        }
        P::Int8 => (i8::MIN.into(), i8::MAX.into()),
        P::Int16 => (i16::MIN.into(), i16::MAX.into()),
        P::Int32 => (i32::MIN.into(), i32::MAX.into()),
        P::Int64 => (i64::MIN.into(), i64::MAX.into()),
        P::Uint8 => (0, u8::MAX.into()),
        P::Uint16 => (0, u16::MAX.into()),
        P::Uint32 => (0, u32::MAX.into()),
        P::Uint64 => (0, u64::MAX.into()),
    };

    // Signed types reserve the bottom of the range, unsigned the top.
    let value = match (prim.is_signed(), sentinel) {
        (true, S::Null) => lo,
        (true, S::Min) => lo + 1,
        (true, S::Max) => hi,
        (false, S::Null) => hi,
        (false, S::Min) => lo,
        (false, S::Max) => hi - 1,
    };
    SentinelValue::Int(value)
}
