//! Octave reduction for exact rational pitch and ratio values.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

fn two() -> BigRational {
    BigRational::from_integer(BigInt::from(2))
}

/// Reduces a pitch value into the pitch-class range `[0, 12)`.
pub fn reduce_mod12(pitch: &BigRational) -> BigRational {
    let twelve = BigRational::from_integer(BigInt::from(12));
    let quot = (pitch / &twelve).floor();
    pitch - quot * twelve
}

/// Reduces a strictly positive ratio into the ratio-class range `[1, 2]`:
/// ratios below unity are replaced by their reciprocal, then halved while
/// they exceed two. `1` and `2` are distinct classes.
pub fn reduce_ratio_class(ratio: &BigRational) -> BigRational {
    let two = two();
    let mut r = ratio.clone();
    if r < BigRational::one() {
        r = r.recip();
    }
    while two < r {
        r /= &two;
    }
    r
}

/// Constrains a strictly positive ratio into `[1/2, 2)` by halving and
/// doubling.
pub fn constrain_to_octave(ratio: &BigRational) -> BigRational {
    let two = two();
    let half = two.recip();
    let mut r = ratio.clone();
    while two <= r {
        r /= &two;
    }
    while r < half {
        r *= &two;
    }
    r
}

#[cfg(test)]
mod test {
    use super::*;

    fn frac(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_reduce_mod12() {
        let examples = [
            ((31, 2), (7, 2)),
            ((-5, 1), (7, 1)),
            ((113, 10), (113, 10)),
            ((27, 2), (3, 2)),
            ((0, 1), (0, 1)),
            ((24, 1), (0, 1)),
        ];
        for ((n, d), (rn, rd)) in examples {
            assert_eq!(reduce_mod12(&frac(n, d)), frac(rn, rd));
        }
    }

    #[test]
    fn test_reduce_ratio_class() {
        let examples = [
            ((31, 2), (31, 16)),
            ((10, 1), (5, 4)),
            ((33, 4), (33, 32)),
            ((36, 10), (9, 5)),
            ((113, 10), (113, 80)),
            ((1, 5), (5, 4)),
            ((1, 1), (1, 1)),
            ((2, 1), (2, 1)),
        ];
        for ((n, d), (rn, rd)) in examples {
            assert_eq!(reduce_ratio_class(&frac(n, d)), frac(rn, rd));
        }
    }

    #[test]
    fn test_constrain_to_octave() {
        let examples = [
            ((1, 1), (1, 1)),
            ((3, 1), (3, 2)),
            ((1, 5), (4, 5)),
            ((2, 1), (1, 1)),
        ];
        for ((n, d), (rn, rd)) in examples {
            assert_eq!(constrain_to_octave(&frac(n, d)), frac(rn, rd));
        }
    }
}
