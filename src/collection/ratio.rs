//! Ratio collections: exact frequency ratios, and ratio classes reduced
//! multiplicatively into one octave.

use std::fmt;

use num_rational::BigRational;
use num_traits::Signed;

use super::pitch::rotate_values;
use super::{canonical, flatten, format_elements, DomainError, Entry};
use crate::util::reduce::{constrain_to_octave, reduce_ratio_class};

fn checked(values: Vec<BigRational>) -> Result<Vec<BigRational>, DomainError> {
    for value in &values {
        if !value.is_positive() {
            return Err(DomainError::NonPositive(value.clone()));
        }
    }
    Ok(values)
}

fn checked_positive(value: &BigRational) -> Result<(), DomainError> {
    if value.is_positive() {
        Ok(())
    } else {
        Err(DomainError::NonPositive(value.clone()))
    }
}

fn dedup(values: Vec<BigRational>) -> Vec<BigRational> {
    let mut elements: Vec<BigRational> = Vec::with_capacity(values.len());
    for value in values {
        if !elements.contains(&value) {
            elements.push(value);
        }
    }
    elements
}

/// An unordered collection of strictly positive frequency ratios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioSet {
    elements: Vec<BigRational>,
}

impl RatioSet {
    /// Builds the set from arbitrarily nested entries; any non-positive
    /// value fails the whole construction.
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Self::from_values(flatten(items)?)
    }

    fn from_values(values: Vec<BigRational>) -> Result<Self, DomainError> {
        Ok(Self::from_positive(checked(values)?))
    }

    fn from_positive(values: Vec<BigRational>) -> Self {
        RatioSet { elements: dedup(values) }
    }

    pub fn elements(&self) -> &[BigRational] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BigRational> {
        self.elements.iter()
    }

    pub fn contains(&self, value: &BigRational) -> bool {
        self.elements.contains(value)
    }

    /// Multiplies every element by `n` (transposition is multiplicative for
    /// ratios); `n` must be strictly positive.
    pub fn transpose(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    /// Mirrors every element about the unison: `x` becomes `1/x`.
    pub fn invert(&self) -> Self {
        Self::from_positive(self.elements.iter().map(|x| x.recip()).collect())
    }

    /// Mirrors every element about `axis`: `x` becomes `axis²/x`; the axis
    /// must be strictly positive.
    pub fn invert_about(&self, axis: &BigRational) -> Result<Self, DomainError> {
        checked_positive(axis)?;
        Ok(Self::from_positive(
            self.elements.iter().map(|x| axis * axis / x).collect(),
        ))
    }

    /// Scales every element by `n`; `n` must be strictly positive.
    pub fn multiply(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    /// The entries of `scale` whose values are not already elements, in
    /// scale order.
    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        )
    }

    /// Ascending by exact value.
    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_positive(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Self::from_values(values)
    }

    /// Every element reduced into `[1/2, 2)` by halving and doubling.
    pub fn constrain_to_octave(&self) -> Self {
        Self::from_positive(self.elements.iter().map(constrain_to_octave).collect())
    }
}

impl fmt::Display for RatioSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "{", "}")
    }
}

/// An unordered collection of ratio classes, each octave-reduced into
/// `[1, 2]` (reciprocal below unity, halved above two).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioClassSet {
    elements: Vec<BigRational>,
}

impl RatioClassSet {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Self::from_values(flatten(items)?)
    }

    fn from_values(values: Vec<BigRational>) -> Result<Self, DomainError> {
        Ok(Self::from_positive(checked(values)?))
    }

    fn from_positive(values: Vec<BigRational>) -> Self {
        RatioClassSet {
            elements: dedup(values.iter().map(reduce_ratio_class).collect()),
        }
    }

    pub fn elements(&self) -> &[BigRational] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BigRational> {
        self.elements.iter()
    }

    pub fn contains(&self, value: &BigRational) -> bool {
        self.elements.contains(value)
    }

    pub fn transpose(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn invert(&self) -> Self {
        Self::from_positive(self.elements.iter().map(|x| x.recip()).collect())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Result<Self, DomainError> {
        checked_positive(axis)?;
        Ok(Self::from_positive(
            self.elements.iter().map(|x| axis * axis / x).collect(),
        ))
    }

    pub fn multiply(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        )
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_positive(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Self::from_values(values)
    }

    /// The most tightly clustered rotation of the sorted set, scored with
    /// each zeroed element as an exponent of two.
    pub fn normal_order(&self) -> Self {
        RatioClassSet {
            elements: canonical::normal_order::<canonical::Multiplicative>(&self.elements),
        }
    }

    /// The lower-scoring of the zeroed normal orders of the set and of its
    /// inversion; a tie favors the original.
    pub fn prime_form(&self) -> Self {
        RatioClassSet {
            elements: canonical::prime_form::<canonical::Multiplicative>(&self.elements),
        }
    }
}

impl fmt::Display for RatioClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "{", "}")
    }
}

/// An ordered sequence of strictly positive frequency ratios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioSegment {
    elements: Vec<BigRational>,
}

impl RatioSegment {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Self::from_values(flatten(items)?)
    }

    fn from_values(values: Vec<BigRational>) -> Result<Self, DomainError> {
        Ok(Self::from_positive(checked(values)?))
    }

    fn from_positive(values: Vec<BigRational>) -> Self {
        RatioSegment { elements: values }
    }

    pub fn elements(&self) -> &[BigRational] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BigRational> {
        self.elements.iter()
    }

    pub fn contains(&self, value: &BigRational) -> bool {
        self.elements.contains(value)
    }

    pub fn transpose(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn invert(&self) -> Self {
        Self::from_positive(self.elements.iter().map(|x| x.recip()).collect())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Result<Self, DomainError> {
        checked_positive(axis)?;
        Ok(Self::from_positive(
            self.elements.iter().map(|x| axis * axis / x).collect(),
        ))
    }

    pub fn multiply(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        )
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_positive(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Self::from_values(values)
    }

    pub fn constrain_to_octave(&self) -> Self {
        Self::from_positive(self.elements.iter().map(constrain_to_octave).collect())
    }

    pub fn retrograde(&self) -> Self {
        Self::from_positive(self.elements.iter().rev().cloned().collect())
    }

    pub fn rotate(&self, n: i64) -> Self {
        Self::from_positive(rotate_values(&self.elements, n))
    }
}

impl fmt::Display for RatioSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "(", ")")
    }
}

/// An ordered sequence of ratio classes reduced into `[1, 2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioClassSegment {
    elements: Vec<BigRational>,
}

impl RatioClassSegment {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Self::from_values(flatten(items)?)
    }

    fn from_values(values: Vec<BigRational>) -> Result<Self, DomainError> {
        Ok(Self::from_positive(checked(values)?))
    }

    fn from_positive(values: Vec<BigRational>) -> Self {
        RatioClassSegment {
            elements: values.iter().map(reduce_ratio_class).collect(),
        }
    }

    pub fn elements(&self) -> &[BigRational] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BigRational> {
        self.elements.iter()
    }

    pub fn contains(&self, value: &BigRational) -> bool {
        self.elements.contains(value)
    }

    pub fn transpose(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn invert(&self) -> Self {
        Self::from_positive(self.elements.iter().map(|x| x.recip()).collect())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Result<Self, DomainError> {
        checked_positive(axis)?;
        Ok(Self::from_positive(
            self.elements.iter().map(|x| axis * axis / x).collect(),
        ))
    }

    pub fn multiply(&self, n: &BigRational) -> Result<Self, DomainError> {
        checked_positive(n)?;
        Ok(Self::from_positive(self.elements.iter().map(|x| n * x).collect()))
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        )
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_positive(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Self::from_values(values)
    }

    pub fn retrograde(&self) -> Self {
        Self::from_positive(self.elements.iter().rev().cloned().collect())
    }

    pub fn rotate(&self, n: i64) -> Self {
        Self::from_positive(rotate_values(&self.elements, n))
    }
}

impl fmt::Display for RatioClassSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "(", ")")
    }
}
