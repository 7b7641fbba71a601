//! Pitch collections: exact rational pitches, and pitch classes reduced
//! modulo twelve.

use std::fmt;

use num_rational::BigRational;
use num_traits::Zero;

use super::{canonical, flatten, format_elements, DomainError, Entry};
use crate::util::reduce::reduce_mod12;

fn dedup(values: Vec<BigRational>) -> Vec<BigRational> {
    let mut elements: Vec<BigRational> = Vec::with_capacity(values.len());
    for value in values {
        if !elements.contains(&value) {
            elements.push(value);
        }
    }
    elements
}

/// An unordered collection of exact rational pitches. Duplicates collapse;
/// first-occurrence order is kept for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitchSet {
    elements: Vec<BigRational>,
}

impl PitchSet {
    /// Builds the set from arbitrarily nested entries.
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Ok(Self::from_values(flatten(items)?))
    }

    fn from_values(values: Vec<BigRational>) -> Self {
        PitchSet { elements: dedup(values) }
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

    /// Adds `n` to every element.
    pub fn transpose(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| x + n).collect())
    }

    /// Mirrors every element about the origin.
    pub fn invert(&self) -> Self {
        self.invert_about(&BigRational::zero())
    }

    /// Mirrors every element about `axis`: `x` becomes `2·axis − x`.
    pub fn invert_about(&self, axis: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| axis + axis - x).collect())
    }

    /// Scales every element by `n`.
    pub fn multiply(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| n * x).collect())
    }

    /// The entries of `scale` whose values are not already elements, in
    /// scale order.
    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Ok(Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        ))
    }

    /// Ascending by exact value.
    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_values(values)
    }

    /// Concatenation with further entries, rebuilt through the construction
    /// rules.
    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Ok(Self::from_values(values))
    }
}

impl fmt::Display for PitchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "{", "}")
    }
}

/// An unordered collection of pitch classes, every element reduced modulo
/// twelve into `[0, 12)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitchClassSet {
    elements: Vec<BigRational>,
}

impl PitchClassSet {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Ok(Self::from_values(flatten(items)?))
    }

    fn from_values(values: Vec<BigRational>) -> Self {
        PitchClassSet {
            elements: dedup(values.iter().map(reduce_mod12).collect()),
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

    pub fn transpose(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| x + n).collect())
    }

    pub fn invert(&self) -> Self {
        self.invert_about(&BigRational::zero())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| axis + axis - x).collect())
    }

    pub fn multiply(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| n * x).collect())
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Ok(Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        ))
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_values(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Ok(Self::from_values(values))
    }

    /// The most tightly clustered rotation of the sorted set under the
    /// binary-weight scoring rule.
    pub fn normal_order(&self) -> Self {
        PitchClassSet {
            elements: canonical::normal_order::<canonical::Additive>(&self.elements),
        }
    }

    /// The lower-scoring of the zeroed normal orders of the set and of its
    /// inversion; a tie favors the original.
    pub fn prime_form(&self) -> Self {
        PitchClassSet {
            elements: canonical::prime_form::<canonical::Additive>(&self.elements),
        }
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "{", "}")
    }
}

/// An ordered sequence of exact rational pitches; order and duplicates are
/// significant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitchSegment {
    elements: Vec<BigRational>,
}

impl PitchSegment {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Ok(Self::from_values(flatten(items)?))
    }

    fn from_values(values: Vec<BigRational>) -> Self {
        PitchSegment { elements: values }
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

    pub fn transpose(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| x + n).collect())
    }

    pub fn invert(&self) -> Self {
        self.invert_about(&BigRational::zero())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| axis + axis - x).collect())
    }

    pub fn multiply(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| n * x).collect())
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Ok(Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        ))
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_values(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Ok(Self::from_values(values))
    }

    /// Element order reversed.
    pub fn retrograde(&self) -> Self {
        Self::from_values(self.elements.iter().rev().cloned().collect())
    }

    /// Cyclic shift by `n` positions, `n` taken modulo the length.
    pub fn rotate(&self, n: i64) -> Self {
        Self::from_values(rotate_values(&self.elements, n))
    }
}

impl fmt::Display for PitchSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "(", ")")
    }
}

/// An ordered sequence of pitch classes reduced modulo twelve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitchClassSegment {
    elements: Vec<BigRational>,
}

impl PitchClassSegment {
    pub fn new<I>(items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        Ok(Self::from_values(flatten(items)?))
    }

    fn from_values(values: Vec<BigRational>) -> Self {
        PitchClassSegment {
            elements: values.iter().map(reduce_mod12).collect(),
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

    pub fn transpose(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| x + n).collect())
    }

    pub fn invert(&self) -> Self {
        self.invert_about(&BigRational::zero())
    }

    pub fn invert_about(&self, axis: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| axis + axis - x).collect())
    }

    pub fn multiply(&self, n: &BigRational) -> Self {
        Self::from_values(self.elements.iter().map(|x| n * x).collect())
    }

    pub fn complement<I>(&self, scale: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let values = flatten(scale)?;
        Ok(Self::from_values(
            values.into_iter().filter(|v| !self.elements.contains(v)).collect(),
        ))
    }

    pub fn sorted(&self) -> Self {
        let mut values = self.elements.clone();
        values.sort();
        Self::from_values(values)
    }

    pub fn concat<I>(&self, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut values = self.elements.clone();
        values.extend(flatten(items)?);
        Ok(Self::from_values(values))
    }

    pub fn retrograde(&self) -> Self {
        Self::from_values(self.elements.iter().rev().cloned().collect())
    }

    pub fn rotate(&self, n: i64) -> Self {
        Self::from_values(rotate_values(&self.elements, n))
    }
}

impl fmt::Display for PitchClassSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(f, &self.elements, "(", ")")
    }
}

pub(super) fn rotate_values(elements: &[BigRational], n: i64) -> Vec<BigRational> {
    if elements.is_empty() {
        return Vec::new();
    }
    let k = n.rem_euclid(elements.len() as i64) as usize;
    elements[k..].iter().chain(&elements[..k]).cloned().collect()
}

#[cfg(test)]
mod test {
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;

    use super::*;

    fn frac(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn fracs(pairs: &[(i64, i64)]) -> Vec<BigRational> {
        pairs.iter().map(|&(n, d)| frac(n, d)).collect()
    }

    #[test]
    fn test_pitch_class_set_construction() {
        let set = PitchClassSet::new([0, 1, 6]).unwrap();
        assert_eq!(set.elements(), fracs(&[(0, 1), (1, 1), (6, 1)]));
        // nested input flattens, duplicates collapse, values reduce mod 12
        let set = PitchClassSet::new([Entry::from(0), Entry::from(vec![13, 6]), Entry::from(18)])
            .unwrap();
        assert_eq!(set.elements(), fracs(&[(0, 1), (1, 1), (6, 1)]));
        let set =
            PitchClassSet::new(["31/2", "10", "33/4", "-5", "36/10", "113/10"]).unwrap();
        assert_eq!(
            set.elements(),
            fracs(&[(7, 2), (10, 1), (33, 4), (7, 1), (18, 5), (113, 10)])
        );
    }

    #[test]
    fn test_pitch_set_keeps_register() {
        let set = PitchSet::new([0, 1, 18]).unwrap();
        assert!(set.contains(&frac(18, 1)));
        assert!(!set.contains(&frac(6, 1)));
    }

    #[test]
    fn test_invert() {
        let set = PitchClassSet::new([0, 1, 3]).unwrap();
        assert_eq!(set.invert().elements(), fracs(&[(0, 1), (11, 1), (9, 1)]));
        assert_eq!(
            set.invert_about(&frac(3, 1)).elements(),
            fracs(&[(6, 1), (5, 1), (3, 1)])
        );
        let set = PitchSet::new([0, 1, 3]).unwrap();
        assert_eq!(set.invert().elements(), fracs(&[(0, 1), (-1, 1), (-3, 1)]));
    }

    #[test]
    fn test_double_inversion_is_identity() {
        let set = PitchClassSet::new(["0", "1/2", "3", "7"]).unwrap();
        assert_eq!(set.invert().invert(), set);
        let axis = frac(5, 3);
        assert_eq!(set.invert_about(&axis).invert_about(&axis), set);
    }

    #[test]
    fn test_transpose_composes_additively() {
        let set = PitchClassSet::new([0, 1, 2]).unwrap();
        assert_eq!(
            set.transpose(&frac(2, 1)).elements(),
            fracs(&[(2, 1), (3, 1), (4, 1)])
        );
        let a = frac(7, 2);
        let b = frac(9, 4);
        assert_eq!(
            set.transpose(&a).transpose(&b),
            set.transpose(&(a.clone() + b))
        );
    }

    #[test]
    fn test_multiply() {
        let set = PitchClassSet::new([0, 1, 3]).unwrap();
        assert_eq!(
            set.multiply(&frac(2, 1)).elements(),
            fracs(&[(0, 1), (2, 1), (6, 1)])
        );
    }

    #[test]
    fn test_complement() {
        let set = PitchClassSet::new([0, 1, 2]).unwrap();
        let complement = set.complement(0..12).unwrap();
        assert_eq!(
            complement.elements(),
            fracs(&[
                (3, 1),
                (4, 1),
                (5, 1),
                (6, 1),
                (7, 1),
                (8, 1),
                (9, 1),
                (10, 1),
                (11, 1)
            ])
        );
    }

    #[test]
    fn test_normal_order() {
        let set = PitchClassSet::new([0, 2, 1]).unwrap();
        assert_eq!(set.normal_order().elements(), fracs(&[(0, 1), (1, 1), (2, 1)]));
    }

    #[test]
    fn test_prime_form() {
        let set = PitchClassSet::new([1, 3, 2]).unwrap();
        assert_eq!(set.prime_form().elements(), fracs(&[(0, 1), (1, 1), (2, 1)]));
        let set = PitchClassSet::new(["31/2", "10", "33/4", "-5", "36/10", "113/10"]).unwrap();
        assert_eq!(
            set.prime_form().elements(),
            fracs(&[(0, 1), (1, 10), (7, 2), (19, 4), (13, 2), (39, 5)])
        );
    }

    #[test]
    fn test_prime_form_invariant_under_transposition() {
        let set = PitchClassSet::new([0, 1, 3, 7]).unwrap();
        let transposed = set.transpose(&frac(5, 3));
        assert_eq!(set.prime_form(), transposed.prime_form());
    }

    #[test]
    fn test_segment_order_operations() {
        let segment = PitchClassSegment::new([0, 1, 2]).unwrap();
        assert_eq!(
            segment.retrograde().elements(),
            fracs(&[(2, 1), (1, 1), (0, 1)])
        );
        assert_eq!(
            segment.rotate(1).elements(),
            fracs(&[(1, 1), (2, 1), (0, 1)])
        );
        assert_eq!(segment.rotate(-1).elements(), fracs(&[(2, 1), (0, 1), (1, 1)]));
        assert_eq!(segment.rotate(3), segment);
        assert_eq!(segment.retrograde().retrograde(), segment);
    }

    #[test]
    fn test_segment_keeps_duplicates() {
        let segment = PitchClassSegment::new([0, 12, 1]).unwrap();
        assert_eq!(segment.elements(), fracs(&[(0, 1), (0, 1), (1, 1)]));
        assert_eq!(segment.len(), 3);
    }

    #[test]
    fn test_display() {
        let set = PitchClassSet::new([0, 1, 6]).unwrap();
        assert_eq!(set.to_string(), "{0, 1, 6}");
        let segment = PitchSegment::new(["1/2", "2"]).unwrap();
        assert_eq!(segment.to_string(), "(1/2, 2)");
    }

    #[test]
    fn test_unparseable_text_fails() {
        assert!(PitchSet::new(["not a pitch"]).is_err());
    }
}
