//! Rational pitch and ratio collections with classical set-theoretic
//! operations.
//!
//! Eight container types, (set | segment) × (pitch | pitch class | ratio |
//! ratio class). Sets deduplicate on construction and keep first-occurrence
//! order for display; segments preserve order and duplicates. Class variants
//! re-run their octave reduction after every operation, so no element ever
//! leaves the canonical range.

mod canonical;
mod pitch;
mod ratio;

pub use pitch::{PitchClassSegment, PitchClassSet, PitchSegment, PitchSet};
pub use ratio::{RatioClassSegment, RatioClassSet, RatioSegment, RatioSet};

use std::{error::Error, fmt};

use num_bigint::BigInt;
use num_rational::BigRational;

/// One node of the nested construction input accepted by every collection
/// type: an exact rational, a machine integer, a fraction string like
/// `"3/2"` or `"10"`, or a nested list of further entries. Lists are
/// flattened depth-first before the container is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Rational(BigRational),
    Integer(i64),
    Text(String),
    List(Vec<Entry>),
}

impl From<BigRational> for Entry {
    fn from(value: BigRational) -> Self {
        Entry::Rational(value)
    }
}

impl From<i64> for Entry {
    fn from(value: i64) -> Self {
        Entry::Integer(value)
    }
}

impl From<i32> for Entry {
    fn from(value: i32) -> Self {
        Entry::Integer(i64::from(value))
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Text(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Text(value)
    }
}

impl<T: Into<Entry>> From<Vec<T>> for Entry {
    fn from(value: Vec<T>) -> Self {
        Entry::List(value.into_iter().map(Into::into).collect())
    }
}

/// Construction failure of a collection. Nothing is partially built: the
/// first offending value aborts the whole construction.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Ratio collections require strictly positive values.
    NonPositive(BigRational),
    /// A textual entry did not parse as a fraction.
    Unparseable(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NonPositive(value) => {
                write!(f, "ratio collections require strictly positive values, got {value}")
            }
            DomainError::Unparseable(text) => {
                write!(f, "cannot parse {text:?} as a fraction")
            }
        }
    }
}

impl Error for DomainError {}

fn flatten_into(entry: Entry, out: &mut Vec<BigRational>) -> Result<(), DomainError> {
    match entry {
        Entry::Rational(value) => out.push(value),
        Entry::Integer(value) => out.push(BigRational::from_integer(BigInt::from(value))),
        Entry::Text(text) => match text.parse::<BigRational>() {
            Ok(value) => out.push(value),
            Err(_) => return Err(DomainError::Unparseable(text)),
        },
        Entry::List(entries) => {
            for entry in entries {
                flatten_into(entry, out)?;
            }
        }
    }
    Ok(())
}

/// Flattens arbitrarily nested construction input into a flat value list.
pub(crate) fn flatten<I>(items: I) -> Result<Vec<BigRational>, DomainError>
where
    I: IntoIterator,
    I::Item: Into<Entry>,
{
    let mut out = Vec::new();
    for item in items {
        flatten_into(item.into(), &mut out)?;
    }
    Ok(out)
}

pub(crate) fn format_elements(
    f: &mut fmt::Formatter<'_>,
    elements: &[BigRational],
    open: &str,
    close: &str,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{element}")?;
    }
    write!(f, "{close}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flatten_nested() {
        let items = [Entry::from(0), Entry::from(vec![1, 6]), Entry::from("3/2")];
        let values = flatten(items).unwrap();
        let expected: Vec<BigRational> = [(0, 1), (1, 1), (6, 1), (3, 2)]
            .iter()
            .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_flatten_rejects_garbage() {
        let err = flatten(["3/2", "banana"]).unwrap_err();
        assert_eq!(err, DomainError::Unparseable("banana".to_string()));
    }
}
