//! The numeric leaf of the value tree.
//!
//! JSON numbers are parsed losslessly when they fit an `i64` or `f64`; numbers
//! outside that range (huge integer literals, excess-precision decimals) are
//! kept as their original lexeme and only converted on demand, so a
//! parse-then-serialize round trip never changes a number's text.
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use num_cmp::NumCmp;

/// Records that a conversion to a narrower numeric form lost information.
pub type ConversionFlags = u8;

/// The raw lexeme did not fit in an `i64` without truncation.
pub const LOSSY_INT: ConversionFlags = 1 << 0;
/// The raw lexeme did not round-trip exactly through `f64`.
pub const LOSSY_DOUBLE: ConversionFlags = 1 << 1;

#[derive(Debug, Clone)]
pub enum Number {
    Int64(i64),
    Double(f64),
    /// Preserves the exact source lexeme for numbers too large or too precise
    /// for `Int64`/`Double` to represent without loss.
    Raw(Rc<str>),
}

impl Number {
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Number::Int64(value)
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Number::Double(value)
    }

    /// Parses a raw JSON numeric lexeme, choosing the tightest representation
    /// that round-trips exactly.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Self {
        if !lexeme.contains(['.', 'e', 'E']) {
            if let Ok(value) = lexeme.parse::<i64>() {
                return Number::Int64(value);
            }
        }
        if let Ok(value) = lexeme.parse::<f64>() {
            // Reject conversion if printing it back wouldn't reproduce the
            // input (loses precision on very long mantissas).
            if format_f64(value) == lexeme {
                return Number::Double(value);
            }
        }
        Number::Raw(Rc::from(lexeme))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        match self {
            Number::Int64(_) => true,
            Number::Double(v) => v.fract() == 0.0,
            Number::Raw(raw) => !raw.contains(['.', 'e', 'E']),
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int64(v) => Some(*v),
            Number::Double(v) if v.fract() == 0.0 => Some(*v as i64),
            Number::Raw(raw) => raw.parse().ok(),
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Int64(v) => u64::try_from(*v).ok(),
            Number::Double(v) if *v >= 0.0 && v.fract() == 0.0 => Some(*v as u64),
            Number::Raw(raw) => raw.parse().ok(),
        }
    }

    /// Converts to `f64`, returning the conversion flags that record any loss
    /// of precision incurred along the way.
    #[must_use]
    pub fn as_f64_lossy(&self) -> (f64, ConversionFlags) {
        match self {
            Number::Int64(v) => {
                let as_f64 = *v as f64;
                let flags = if as_f64 as i64 == *v { 0 } else { LOSSY_DOUBLE };
                (as_f64, flags)
            }
            Number::Double(v) => (*v, 0),
            Number::Raw(raw) => match raw.parse::<f64>() {
                Ok(value) => {
                    let flags = if format_f64(value) == raw.as_ref() {
                        0
                    } else {
                        LOSSY_DOUBLE
                    };
                    (value, flags)
                }
                Err(_) => {
                    log::warn!("numeric lexeme {:?} could not be converted to f64", raw);
                    (f64::NAN, LOSSY_DOUBLE)
                }
            },
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.as_f64_lossy().0
    }

    /// Structural comparison used by `Value`'s `PartialEq`/`Ord`/`Hash` impls.
    ///
    /// Falls back to a lexeme comparison (after `as_f64_lossy`) when neither
    /// side is exactly representable; per the value tree's invariants this is
    /// logged rather than panicking, since schema validation must still make
    /// forward progress on documents containing such numbers.
    #[must_use]
    pub fn compare(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Int64(a), Number::Int64(b)) => a.cmp(b),
            (Number::Double(a), Number::Double(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Number::Int64(a), Number::Double(b)) | (Number::Double(b), Number::Int64(a)) => {
                let ordering = if NumCmp::num_eq(*a, *b) {
                    Ordering::Equal
                } else if NumCmp::num_lt(*a, *b) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                if matches!(self, Number::Double(_)) {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
            (_, _) => {
                let (a, aflags) = self.as_f64_lossy();
                let (b, bflags) = other.as_f64_lossy();
                if aflags != 0 || bflags != 0 {
                    log::warn!(
                        "comparing numbers with lossy conversion: {:?} vs {:?}",
                        self,
                        other
                    );
                }
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}
impl Eq for Number {}

impl std::hash::Hash for Number {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Numbers that compare equal must hash equal: always hash through the
        // same widened form regardless of which variant stores the value.
        let (value, _) = self.as_f64_lossy();
        value.to_bits().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int64(v) => write!(f, "{}", v),
            Number::Double(v) => write!(f, "{}", format_f64(*v)),
            Number::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

fn format_f64(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e17 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
