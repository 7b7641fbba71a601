//! Trial-division primality and prime factorization for just-intonation
//! ratios.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Is `n` prime? Trial division by odd candidates up to the square root,
/// after handling one and two directly.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    if n.is_even() {
        return *n == two;
    }
    let mut i = BigUint::from(3u32);
    while &i * &i <= *n {
        if (n % &i).is_zero() {
            return false;
        }
        i += 2u32;
    }
    true
}

/// The prime factors of `n` in ascending order with multiplicity. Factors of
/// two and three are stripped by direct division, then odd candidates from
/// five upward are tried after a primality check. Zero and one yield the
/// empty list.
pub fn prime_factors(n: &BigUint) -> Vec<BigUint> {
    let mut factors = Vec::new();
    if n.is_zero() {
        return factors;
    }
    let mut n = n.clone();
    for small in [2u32, 3] {
        let p = BigUint::from(small);
        while (&n % &p).is_zero() {
            factors.push(p.clone());
            n /= &p;
        }
    }
    let mut i = BigUint::from(5u32);
    while !n.is_one() {
        if is_prime(&i) {
            while (&n % &i).is_zero() {
                factors.push(i.clone());
                n /= &i;
            }
        }
        i += 2u32;
    }
    factors
}
