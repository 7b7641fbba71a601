//! Rotation-based normal-order and prime-form search, shared between the
//! additive (mod-12 pitch class) and multiplicative (mod-2 ratio class)
//! metrics.
//!
//! Rotations are scored by treating each element of the zeroed rotation as
//! an exponent of two and summing `2^element`. Elements may be non-integer
//! rationals, so the score is compared exactly rather than through floating
//! point: every exponent splits into integer and fractional part, the sum
//! becomes `Σ c_r · 2^r` over distinct fractional parts `r` with rational
//! coefficients `c_r`, and two scores are equal iff their coefficient maps
//! are equal (powers of two at distinct rational exponents are linearly
//! independent over the rationals). A nonzero difference is signed by
//! refining certified rational bounds on each `2^r` until the interval
//! excludes zero.

use std::{cmp::Ordering, collections::BTreeMap};

use num_bigint::{BigInt, BigUint};
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::util::reduce::{reduce_mod12, reduce_ratio_class};

/// The distance metric a class collection reduces under.
pub(crate) trait Metric {
    /// Translates a rotation so its first element sits at the identity,
    /// re-applying the class reduction to every element.
    fn zero(rotation: &[BigRational]) -> Vec<BigRational>;
    /// Inversion about the identity, re-reduced.
    fn invert(elements: &[BigRational]) -> Vec<BigRational>;
}

/// Additive mod-12 metric for pitch classes.
pub(crate) struct Additive;

impl Metric for Additive {
    fn zero(rotation: &[BigRational]) -> Vec<BigRational> {
        let first = rotation[0].clone();
        rotation.iter().map(|x| reduce_mod12(&(x - &first))).collect()
    }

    fn invert(elements: &[BigRational]) -> Vec<BigRational> {
        elements.iter().map(|x| reduce_mod12(&(-x))).collect()
    }
}

/// Multiplicative mod-2 metric for ratio classes.
pub(crate) struct Multiplicative;

impl Metric for Multiplicative {
    fn zero(rotation: &[BigRational]) -> Vec<BigRational> {
        let first = rotation[0].clone();
        rotation.iter().map(|x| reduce_ratio_class(&(x / &first))).collect()
    }

    fn invert(elements: &[BigRational]) -> Vec<BigRational> {
        elements.iter().map(|x| reduce_ratio_class(&x.recip())).collect()
    }
}

fn rotated(elements: &[BigRational], n: usize) -> Vec<BigRational> {
    let n = n % elements.len();
    elements[n..].iter().chain(&elements[..n]).cloned().collect()
}

/// The rotation of the sorted collection with the smallest binary weight
/// after zeroing. The candidate starts as the last-enumerated rotation and
/// is replaced only on a strictly smaller score, scanning the remaining
/// rotations first to last.
pub(crate) fn normal_order<M: Metric>(elements: &[BigRational]) -> Vec<BigRational> {
    if elements.len() < 2 {
        return elements.to_vec();
    }
    let mut sorted = elements.to_vec();
    sorted.sort();
    let size = sorted.len();
    let mut candidate = rotated(&sorted, size - 1);
    let mut candidate_weight = BinaryWeight::from_exponents(&M::zero(&candidate));
    for n in 0..size - 1 {
        let rotation = rotated(&sorted, n);
        let weight = BinaryWeight::from_exponents(&M::zero(&rotation));
        if weight < candidate_weight {
            candidate = rotation;
            candidate_weight = weight;
        }
    }
    candidate
}

/// The lower-scoring of the zeroed normal orders of the collection and of
/// its inversion; a tie favors the original.
pub(crate) fn prime_form<M: Metric>(elements: &[BigRational]) -> Vec<BigRational> {
    if elements.is_empty() {
        return Vec::new();
    }
    let original = M::zero(&normal_order::<M>(elements));
    let inverted = M::zero(&normal_order::<M>(&M::invert(elements)));
    let original_weight = BinaryWeight::from_exponents(&original);
    let inverted_weight = BinaryWeight::from_exponents(&inverted);
    if inverted_weight < original_weight {
        inverted
    } else {
        original
    }
}

/// `Σ 2^e` over a list of rational exponents, represented exactly as the
/// coefficient of `2^r` per fractional exponent part `r ∈ [0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BinaryWeight {
    terms: BTreeMap<BigRational, BigRational>,
}

impl BinaryWeight {
    pub(crate) fn from_exponents(exponents: &[BigRational]) -> Self {
        let mut terms: BTreeMap<BigRational, BigRational> = BTreeMap::new();
        for exponent in exponents {
            let whole = exponent.floor();
            let fractional = exponent - &whole;
            let coefficient = pow2_int(&whole.to_integer());
            *terms.entry(fractional).or_insert_with(BigRational::zero) += coefficient;
        }
        BinaryWeight { terms }
    }
}

impl PartialOrd for BinaryWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinaryWeight {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut difference = self.terms.clone();
        for (fractional, coefficient) in &other.terms {
            *difference
                .entry(fractional.clone())
                .or_insert_with(BigRational::zero) -= coefficient;
        }
        difference.retain(|_, coefficient| !coefficient.is_zero());
        if difference.is_empty() {
            return Ordering::Equal;
        }
        sign_at_two(&difference)
    }
}

/// `2^q` as an exact rational, for a (possibly negative) integer `q`.
fn pow2_int(q: &BigInt) -> BigRational {
    let Some(q) = q.to_i64() else {
        panic!("binary-weight exponent out of range");
    };
    let magnitude = BigInt::one() << q.unsigned_abs();
    if q >= 0 {
        BigRational::from_integer(magnitude)
    } else {
        BigRational::new(BigInt::one(), magnitude)
    }
}

/// Decides the sign of a nonzero `Σ c_r · 2^r` over distinct rational
/// `r ∈ [0, 1)`. Linear independence of the `2^r` over the rationals
/// guarantees the sum is nonzero, so the refinement terminates.
fn sign_at_two(terms: &BTreeMap<BigRational, BigRational>) -> Ordering {
    let mut bits: u32 = 16;
    loop {
        let mut low = BigRational::zero();
        let mut high = BigRational::zero();
        for (fractional, coefficient) in terms {
            let (term_low, term_high) = pow2_bounds(fractional, bits);
            if coefficient.is_positive() {
                low += coefficient * &term_low;
                high += coefficient * &term_high;
            } else {
                low += coefficient * &term_high;
                high += coefficient * &term_low;
            }
        }
        if low.is_positive() {
            return Ordering::Greater;
        }
        if high.is_negative() {
            return Ordering::Less;
        }
        bits *= 2;
    }
}

/// Certified bounds `low <= 2^r <= high` with width `2^-bits`, for a
/// rational `r = p/q` in `[0, 1)`. `m = ⌊(2^(p + bits·q))^(1/q)⌋` gives
/// `m/2^bits <= 2^(p/q) < (m+1)/2^bits`.
fn pow2_bounds(r: &BigRational, bits: u32) -> (BigRational, BigRational) {
    if r.is_zero() {
        return (BigRational::one(), BigRational::one());
    }
    let (Some(p), Some(q)) = (r.numer().to_u64(), r.denom().to_u32()) else {
        panic!("binary-weight exponent too fine to compare");
    };
    let shift = p + u64::from(bits) * u64::from(q);
    let root = (BigUint::one() << shift).nth_root(q);
    let scale = BigInt::one() << bits;
    let low = BigRational::new(BigInt::from(root.clone()), scale.clone());
    let high = BigRational::new(BigInt::from(root + BigUint::one()), scale);
    (low, high)
}

#[cfg(test)]
mod test {
    use super::*;

    fn frac(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn fracs(pairs: &[(i64, i64)]) -> Vec<BigRational> {
        pairs.iter().map(|&(n, d)| frac(n, d)).collect()
    }

    #[test]
    fn test_weight_ordering_integers() {
        // 2^0 + 2^1 + 2^3 = 11 < 13 = 2^0 + 2^2 + 2^3
        let lighter = BinaryWeight::from_exponents(&fracs(&[(0, 1), (1, 1), (3, 1)]));
        let heavier = BinaryWeight::from_exponents(&fracs(&[(0, 1), (2, 1), (3, 1)]));
        assert!(lighter < heavier);
    }

    #[test]
    fn test_weight_equality_ignores_order() {
        let a = BinaryWeight::from_exponents(&fracs(&[(1, 2), (2, 1)]));
        let b = BinaryWeight::from_exponents(&fracs(&[(2, 1), (1, 2)]));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_weight_fractional_exponents() {
        // 2^(3/2) > 2^1, and 2^(1/2) + 2^(1/2) is exactly 2^(3/2)
        let a = BinaryWeight::from_exponents(&fracs(&[(3, 2)]));
        let b = BinaryWeight::from_exponents(&fracs(&[(1, 1)]));
        assert!(b < a);
        let c = BinaryWeight::from_exponents(&fracs(&[(1, 2), (1, 2)]));
        assert_eq!(c.cmp(&a), Ordering::Equal);
        // 2^(1/2) + 2^(1/3) < 2^(3/2)
        let d = BinaryWeight::from_exponents(&fracs(&[(1, 2), (1, 3)]));
        assert!(d < a);
    }

    #[test]
    fn test_weight_tenths() {
        // 2^(1/10) < 2^(1/2), close enough to need several refinement rounds
        let a = BinaryWeight::from_exponents(&fracs(&[(1, 10)]));
        let b = BinaryWeight::from_exponents(&fracs(&[(1, 2)]));
        assert!(a < b);
    }

    #[test]
    fn test_normal_order_additive() {
        let elements = fracs(&[(0, 1), (2, 1), (1, 1)]);
        assert_eq!(
            normal_order::<Additive>(&elements),
            fracs(&[(0, 1), (1, 1), (2, 1)])
        );
    }

    #[test]
    fn test_normal_order_tie_keeps_last_rotation() {
        // every rotation of the diminished-seventh set zeroes identically
        let elements = fracs(&[(0, 1), (3, 1), (6, 1), (9, 1)]);
        assert_eq!(
            normal_order::<Additive>(&elements),
            fracs(&[(9, 1), (0, 1), (3, 1), (6, 1)])
        );
    }

    #[test]
    fn test_prime_form_small() {
        assert_eq!(
            prime_form::<Additive>(&fracs(&[(1, 1), (3, 1), (2, 1)])),
            fracs(&[(0, 1), (1, 1), (2, 1)])
        );
        assert_eq!(
            prime_form::<Additive>(&fracs(&[(0, 1), (1, 1), (3, 1)])),
            fracs(&[(0, 1), (1, 1), (3, 1)])
        );
        assert_eq!(
            prime_form::<Additive>(&fracs(&[(0, 1), (3, 1), (6, 1), (9, 1)])),
            fracs(&[(0, 1), (3, 1), (6, 1), (9, 1)])
        );
    }

    #[test]
    fn test_prime_form_singleton_zeroes() {
        assert_eq!(prime_form::<Additive>(&fracs(&[(5, 1)])), fracs(&[(0, 1)]));
        assert_eq!(
            prime_form::<Multiplicative>(&fracs(&[(3, 2)])),
            fracs(&[(1, 1)])
        );
    }

    #[test]
    fn test_normal_order_multiplicative() {
        let elements = fracs(&[(1, 1), (2, 1), (3, 2)]);
        assert_eq!(
            normal_order::<Multiplicative>(&elements),
            fracs(&[(3, 2), (2, 1), (1, 1)])
        );
    }

    #[test]
    fn test_prime_form_multiplicative() {
        let elements = fracs(&[(1, 1), (2, 1), (3, 2)]);
        assert_eq!(
            prime_form::<Multiplicative>(&elements),
            fracs(&[(1, 1), (4, 3), (3, 2)])
        );
        let elements = fracs(&[(3, 2), (5, 4), (7, 4)]);
        assert_eq!(
            prime_form::<Multiplicative>(&elements),
            fracs(&[(1, 1), (7, 6), (6, 5)])
        );
    }
}
