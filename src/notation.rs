//! Named pitches: diatonic steps, accidentals with exact rational
//! alterations, and transposition by named intervals.
//!
//! This is the small pitch service the tuning engine consumes. It models
//! what a host notation program would provide — a spelled pitch that can be
//! transposed by named intervals and asked for its accidental — and nothing
//! of the host's own surface (no name parsing, no markup).

pub mod interval;

use std::{error::Error, fmt};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use serde_derive::{Deserialize, Serialize};

use self::interval::{NamedInterval, Quality};

/// A diatonic step letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    const ALL: [Step; 7] = [Step::C, Step::D, Step::E, Step::F, Step::G, Step::A, Step::B];

    fn letter_index(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 1,
            Step::E => 2,
            Step::F => 3,
            Step::G => 4,
            Step::A => 5,
            Step::B => 6,
        }
    }

    fn from_letter_index(index: i32) -> Step {
        Step::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C within one octave.
    fn semitones(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    fn letter(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }
}

/// The named accidental vocabulary the label renderer understands, from
/// double flat to double sharp in quarter-tone increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accidental {
    DoubleFlat,
    ThreeQuartersFlat,
    Flat,
    QuarterFlat,
    Natural,
    QuarterSharp,
    Sharp,
    ThreeQuartersSharp,
    DoubleSharp,
}

impl Accidental {
    /// Exact alteration in semitones.
    pub fn alteration(self) -> BigRational {
        BigRational::new(BigInt::from(self.quarter_steps()), BigInt::from(2))
    }

    fn quarter_steps(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -4,
            Accidental::ThreeQuartersFlat => -3,
            Accidental::Flat => -2,
            Accidental::QuarterFlat => -1,
            Accidental::Natural => 0,
            Accidental::QuarterSharp => 1,
            Accidental::Sharp => 2,
            Accidental::ThreeQuartersSharp => 3,
            Accidental::DoubleSharp => 4,
        }
    }

    /// The accidental naming `alteration` semitones, if any.
    pub fn from_alteration(alteration: &BigRational) -> Option<Accidental> {
        for accidental in [
            Accidental::DoubleFlat,
            Accidental::ThreeQuartersFlat,
            Accidental::Flat,
            Accidental::QuarterFlat,
            Accidental::Natural,
            Accidental::QuarterSharp,
            Accidental::Sharp,
            Accidental::ThreeQuartersSharp,
            Accidental::DoubleSharp,
        ] {
            if accidental.alteration() == *alteration {
                return Some(accidental);
            }
        }
        None
    }

    /// Hyphenated token form, e.g. `double-sharp`.
    pub fn label(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "double-flat",
            Accidental::ThreeQuartersFlat => "three-quarters-flat",
            Accidental::Flat => "flat",
            Accidental::QuarterFlat => "quarter-flat",
            Accidental::Natural => "natural",
            Accidental::QuarterSharp => "quarter-sharp",
            Accidental::Sharp => "sharp",
            Accidental::ThreeQuartersSharp => "three-quarters-sharp",
            Accidental::DoubleSharp => "double-sharp",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accidental::DoubleFlat => write!(f, "double flat"),
            Accidental::ThreeQuartersFlat => write!(f, "three-quarters flat"),
            Accidental::Flat => write!(f, "flat"),
            Accidental::QuarterFlat => write!(f, "quarter flat"),
            Accidental::Natural => write!(f, "natural"),
            Accidental::QuarterSharp => write!(f, "quarter sharp"),
            Accidental::Sharp => write!(f, "sharp"),
            Accidental::ThreeQuartersSharp => write!(f, "three-quarters sharp"),
            Accidental::DoubleSharp => write!(f, "double sharp"),
        }
    }
}

/// A pitch service failure.
#[derive(Debug, Clone, PartialEq)]
pub enum NotationError {
    /// The pitch's alteration has no name in the accidental vocabulary.
    UnsupportedAlteration(BigRational),
    /// Quality and number that do not combine to a named interval.
    InvalidInterval(Quality, u8),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::UnsupportedAlteration(alteration) => {
                write!(f, "no accidental names an alteration of {alteration} semitones")
            }
            NotationError::InvalidInterval(quality, number) => {
                write!(f, "no interval named {quality:?} {number}")
            }
        }
    }
}

impl Error for NotationError {}

/// A notated pitch: diatonic step, exact rational alteration in semitones,
/// and octave. Octave 4 starts at middle C.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPitch {
    pub step: Step,
    #[serde(with = "crate::custom_serde::rational")]
    pub alteration: BigRational,
    pub octave: i32,
}

impl NamedPitch {
    pub fn new(step: Step, alteration: BigRational, octave: i32) -> Self {
        NamedPitch { step, alteration, octave }
    }

    pub fn natural(step: Step, octave: i32) -> Self {
        NamedPitch {
            step,
            alteration: BigRational::zero(),
            octave,
        }
    }

    /// Spells a numbered pitch (semitones above middle C) with the fixed
    /// mixed table: 1 is c-sharp, 3 is e-flat, 6 is f-sharp, 8 is a-flat,
    /// 10 is b-flat.
    pub fn from_number(number: i64) -> Self {
        let octave = 4 + number.div_euclid(12) as i32;
        let (step, quarter_steps) = match number.rem_euclid(12) {
            0 => (Step::C, 0),
            1 => (Step::C, 2),
            2 => (Step::D, 0),
            3 => (Step::E, -2),
            4 => (Step::E, 0),
            5 => (Step::F, 0),
            6 => (Step::F, 2),
            7 => (Step::G, 0),
            8 => (Step::A, -2),
            9 => (Step::A, 0),
            10 => (Step::B, -2),
            _ => (Step::B, 0),
        };
        NamedPitch {
            step,
            alteration: BigRational::new(BigInt::from(quarter_steps), BigInt::from(2)),
            octave,
        }
    }

    /// Semitones above middle C; fractional for microtonal alterations.
    pub fn semitones_from_middle_c(&self) -> BigRational {
        let natural = 12 * (self.octave - 4) + self.step.semitones();
        BigRational::from_integer(BigInt::from(natural)) + &self.alteration
    }

    /// The accidental implied by the current alteration, if nameable.
    pub fn accidental(&self) -> Result<Accidental, NotationError> {
        Accidental::from_alteration(&self.alteration)
            .ok_or_else(|| NotationError::UnsupportedAlteration(self.alteration.clone()))
    }

    /// Transposed up by `interval`.
    pub fn transposed_up(&self, interval: NamedInterval) -> Self {
        self.transposed(interval, 1)
    }

    /// Transposed down by `interval`.
    pub fn transposed_down(&self, interval: NamedInterval) -> Self {
        self.transposed(interval, -1)
    }

    /// Diatonic transposition: the step letter advances by the interval
    /// number, the alteration absorbs whatever the diatonic distance misses
    /// of the interval's tempered size.
    fn transposed(&self, interval: NamedInterval, sign: i32) -> Self {
        let letter_span = i32::from(interval.number()) - 1;
        let letters_old = 7 * self.octave + self.step.letter_index();
        let letters_new = letters_old + sign * letter_span;
        let step_new = Step::from_letter_index(letters_new.rem_euclid(7));
        let octave_new = letters_new.div_euclid(7);
        let natural_old = 12 * self.octave + self.step.semitones();
        let natural_new = 12 * octave_new + step_new.semitones();
        let correction = sign * interval.semitones() - (natural_new - natural_old);
        NamedPitch {
            step: step_new,
            alteration: &self.alteration + BigRational::from_integer(BigInt::from(correction)),
            octave: octave_new,
        }
    }
}

impl fmt::Display for NamedPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step.letter())?;
        if self.alteration.is_integer() {
            let whole = self.alteration.to_integer();
            let mark = if whole >= BigInt::zero() { '#' } else { 'b' };
            let count = whole.magnitude().to_usize().unwrap_or(0);
            for _ in 0..count {
                write!(f, "{mark}")?;
            }
        } else {
            write!(f, "[{}]", self.alteration)?;
        }
        write!(f, "{}", self.octave)
    }
}

/// Tagged pitch parameter for the decomposition engine: either an already
/// constructed pitch or a numbered pitch in semitones above middle C.
#[derive(Clone, Debug, PartialEq)]
pub enum PitchInput {
    Named(NamedPitch),
    Number(i64),
}

impl PitchInput {
    pub fn into_pitch(self) -> NamedPitch {
        match self {
            PitchInput::Named(pitch) => pitch,
            PitchInput::Number(number) => NamedPitch::from_number(number),
        }
    }
}

impl From<NamedPitch> for PitchInput {
    fn from(pitch: NamedPitch) -> Self {
        PitchInput::Named(pitch)
    }
}

impl From<i64> for PitchInput {
    fn from(number: i64) -> Self {
        PitchInput::Number(number)
    }
}
