//! The just-intonation decomposition engine.
//!
//! A frequency ratio is factored into primes; each prime moves the pitch
//! through a fixed chain of octave and interval transpositions and
//! increments one comma counter. What remains in the comma vector is how
//! far the tempered destination must be nudged to sound the true ratio.

pub mod label;
pub mod vector;

pub use self::label::{render, LabelError, LabelSequence};
pub use self::vector::{CommaKind, CommaVector, Direction};

use std::{error::Error, fmt};

use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use serde_derive::{Deserialize, Serialize};

use crate::factor::prime_factors;
use crate::notation::{
    interval::{self, NamedInterval},
    NamedPitch, NotationError, PitchInput,
};

/// The largest prime family the engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Limit {
    TwentyThree,
    FortySeven,
}

impl Limit {
    pub fn as_u32(self) -> u32 {
        match self {
            Limit::TwentyThree => 23,
            Limit::FortySeven => 47,
        }
    }
}

/// One row of the prime table: how a single prime factor of the numerator
/// moves the pitch and which comma counter it perturbs. Denominator factors
/// mirror the steps and flip the direction.
struct PrimeStep {
    prime: u32,
    octaves: u8,
    interval: Option<NamedInterval>,
    nudge: Option<(CommaKind, Direction)>,
}

const PRIME_TABLE: &[PrimeStep] = &[
    PrimeStep { prime: 2, octaves: 1, interval: None, nudge: None },
    PrimeStep {
        prime: 3,
        octaves: 1,
        interval: Some(interval::FIFTH),
        nudge: None,
    },
    PrimeStep {
        prime: 5,
        octaves: 2,
        interval: Some(interval::MAJOR_THIRD),
        nudge: Some((CommaKind::Syntonic, Direction::Down)),
    },
    PrimeStep {
        prime: 7,
        octaves: 2,
        interval: Some(interval::MINOR_SEVENTH),
        nudge: Some((CommaKind::Septimal, Direction::Down)),
    },
    PrimeStep {
        prime: 11,
        octaves: 3,
        interval: Some(interval::FOURTH),
        nudge: Some((CommaKind::UndecimalQuarterTone, Direction::Up)),
    },
    PrimeStep {
        prime: 13,
        octaves: 3,
        interval: Some(interval::MAJOR_SIXTH),
        nudge: Some((CommaKind::TridecimalThirdTone, Direction::Down)),
    },
    PrimeStep {
        prime: 17,
        octaves: 4,
        interval: Some(interval::AUGMENTED_UNISON),
        nudge: Some((CommaKind::SeventeenLimit, Direction::Down)),
    },
    PrimeStep {
        prime: 19,
        octaves: 4,
        interval: Some(interval::MINOR_THIRD),
        nudge: Some((CommaKind::NineteenLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 23,
        octaves: 4,
        interval: Some(interval::AUGMENTED_FOURTH),
        nudge: Some((CommaKind::TwentyThreeLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 29,
        octaves: 4,
        interval: Some(interval::MINOR_SEVENTH),
        nudge: Some((CommaKind::TwentyNineLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 31,
        octaves: 4,
        interval: Some(interval::MAJOR_SEVENTH),
        nudge: Some((CommaKind::ThirtyOneLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 37,
        octaves: 5,
        interval: Some(interval::MAJOR_SECOND),
        nudge: Some((CommaKind::ThirtySevenLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 41,
        octaves: 5,
        interval: Some(interval::MAJOR_THIRD),
        nudge: Some((CommaKind::FortyOneLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 43,
        octaves: 5,
        interval: Some(interval::FOURTH),
        nudge: Some((CommaKind::FortyThreeLimit, Direction::Up)),
    },
    PrimeStep {
        prime: 47,
        octaves: 5,
        interval: Some(interval::FIFTH),
        nudge: Some((CommaKind::FortySevenLimit, Direction::Down)),
    },
];

fn prime_step(prime: &BigUint, limit: Limit) -> Result<&'static PrimeStep, JiError> {
    prime
        .to_u32()
        .and_then(|p| PRIME_TABLE.iter().find(|step| step.prime == p))
        .filter(|step| step.prime <= limit.as_u32())
        .ok_or_else(|| JiError::LimitExceeded {
            prime: prime.clone(),
            limit,
        })
}

/// Decomposition failure.
#[derive(Debug, Clone, PartialEq)]
pub enum JiError {
    /// Ratios must be strictly positive.
    NonPositiveRatio(BigRational),
    /// A prime factor above the configured limit. The engine fails rather
    /// than silently truncating the factor.
    LimitExceeded { prime: BigUint, limit: Limit },
    /// The pitch service could not name an accidental.
    Notation(NotationError),
}

impl fmt::Display for JiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JiError::NonPositiveRatio(ratio) => {
                write!(f, "ratios must be strictly positive, got {ratio}")
            }
            JiError::LimitExceeded { prime, limit } => write!(
                f,
                "prime factor {prime} is beyond the {}-limit",
                limit.as_u32()
            ),
            JiError::Notation(error) => write!(f, "{error}"),
        }
    }
}

impl Error for JiError {}

impl From<NotationError> for JiError {
    fn from(error: NotationError) -> Self {
        JiError::Notation(error)
    }
}

/// The result of a decomposition: the tempered destination pitch and the
/// comma vector describing the residual nudges.
#[derive(Clone, Debug, PartialEq)]
pub struct JiBundle {
    pub pitch: NamedPitch,
    pub vector: CommaVector,
}

/// Decomposes `ratio` from `pitch` under the configured prime `limit`.
///
/// Numerator and denominator are factored independently. Every numerator
/// prime transposes the pitch up through its registered octave and interval
/// steps and increments its registered comma counter; every denominator
/// prime applies the mirrored descending steps and increments the opposite
/// direction. The final pitch's accidental becomes the vector's base label.
pub fn decompose(pitch: PitchInput, ratio: &BigRational, limit: Limit) -> Result<JiBundle, JiError> {
    if !ratio.is_positive() {
        return Err(JiError::NonPositiveRatio(ratio.clone()));
    }
    let mut pitch = pitch.into_pitch();
    let numerator_factors = prime_factors(ratio.numer().magnitude());
    let denominator_factors = prime_factors(ratio.denom().magnitude());
    let mut vector = CommaVector::new(pitch.accidental()?);
    for prime in &numerator_factors {
        let step = prime_step(prime, limit)?;
        for _ in 0..step.octaves {
            pitch = pitch.transposed_up(interval::OCTAVE);
        }
        if let Some(just_interval) = step.interval {
            pitch = pitch.transposed_up(just_interval);
        }
        if let Some((kind, direction)) = step.nudge {
            vector.bump(kind, direction);
        }
    }
    for prime in &denominator_factors {
        let step = prime_step(prime, limit)?;
        for _ in 0..step.octaves {
            pitch = pitch.transposed_down(interval::OCTAVE);
        }
        if let Some(just_interval) = step.interval {
            pitch = pitch.transposed_down(just_interval);
        }
        if let Some((kind, direction)) = step.nudge {
            vector.bump(kind, direction.flipped());
        }
    }
    vector.set_diatonic_accidental(pitch.accidental()?);
    Ok(JiBundle { pitch, vector })
}

/// Cents above a unison, as a floating-point presentation value. Never used
/// for exact decisions.
pub fn ratio_cents(ratio: &BigRational) -> f64 {
    1200.0 * ratio.to_f64().unwrap_or(f64::NAN).log2()
}

/// Signed cents separating the just `ratio` from the tempered pitch the
/// decomposition reached, relative to the starting pitch.
pub fn cent_deviation(start: &NamedPitch, bundle: &JiBundle, ratio: &BigRational) -> f64 {
    let traveled = bundle.pitch.semitones_from_middle_c() - start.semitones_from_middle_c();
    ratio_cents(ratio) - 100.0 * traveled.to_f64().unwrap_or(f64::NAN)
}
