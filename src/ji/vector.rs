//! The comma vector: paired up/down counters per comma family plus the base
//! diatonic accidental.

use serde_derive::{Deserialize, Serialize};

use crate::notation::Accidental;

/// Direction of a comma nudge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
        }
    }
}

/// The comma families, in label priority order (syntonic first). The
/// families above the twenty-three limit are only reachable under the
/// forty-seven-limit engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommaKind {
    Syntonic,
    Septimal,
    UndecimalQuarterTone,
    TridecimalThirdTone,
    SeventeenLimit,
    NineteenLimit,
    TwentyThreeLimit,
    TwentyNineLimit,
    ThirtyOneLimit,
    ThirtySevenLimit,
    FortyOneLimit,
    FortyThreeLimit,
    FortySevenLimit,
}

impl CommaKind {
    pub const ALL: [CommaKind; 13] = [
        CommaKind::Syntonic,
        CommaKind::Septimal,
        CommaKind::UndecimalQuarterTone,
        CommaKind::TridecimalThirdTone,
        CommaKind::SeventeenLimit,
        CommaKind::NineteenLimit,
        CommaKind::TwentyThreeLimit,
        CommaKind::TwentyNineLimit,
        CommaKind::ThirtyOneLimit,
        CommaKind::ThirtySevenLimit,
        CommaKind::FortyOneLimit,
        CommaKind::FortyThreeLimit,
        CommaKind::FortySevenLimit,
    ];

    /// Label stem, e.g. `syntonic-comma`.
    pub fn label(self) -> &'static str {
        match self {
            CommaKind::Syntonic => "syntonic-comma",
            CommaKind::Septimal => "septimal-comma",
            CommaKind::UndecimalQuarterTone => "undecimal-quarter-tone",
            CommaKind::TridecimalThirdTone => "tridecimal-third-tone",
            CommaKind::SeventeenLimit => "seventeen-limit-schisma",
            CommaKind::NineteenLimit => "nineteen-limit-schisma",
            CommaKind::TwentyThreeLimit => "twenty-three-limit-comma",
            CommaKind::TwentyNineLimit => "twenty-nine-limit-comma",
            CommaKind::ThirtyOneLimit => "thirty-one-limit-comma",
            CommaKind::ThirtySevenLimit => "thirty-seven-limit-comma",
            CommaKind::FortyOneLimit => "forty-one-limit-comma",
            CommaKind::FortyThreeLimit => "forty-three-limit-comma",
            CommaKind::FortySevenLimit => "forty-seven-limit-comma",
        }
    }
}

/// Paired signed counters per comma family plus the base diatonic
/// accidental. One fresh vector belongs to each decomposition; the label
/// renderer reads it and returns a reduced copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommaVector {
    diatonic_accidental: Accidental,
    counts: [[u32; 2]; 13],
}

impl CommaVector {
    pub fn new(diatonic_accidental: Accidental) -> Self {
        CommaVector {
            diatonic_accidental,
            counts: [[0; 2]; 13],
        }
    }

    pub fn diatonic_accidental(&self) -> Accidental {
        self.diatonic_accidental
    }

    pub(crate) fn set_diatonic_accidental(&mut self, accidental: Accidental) {
        self.diatonic_accidental = accidental;
    }

    pub fn count(&self, kind: CommaKind, direction: Direction) -> u32 {
        self.counts[kind as usize][direction as usize]
    }

    pub(crate) fn bump(&mut self, kind: CommaKind, direction: Direction) {
        self.counts[kind as usize][direction as usize] += 1;
    }

    pub(crate) fn set_pair(&mut self, kind: CommaKind, down: u32, up: u32) {
        self.counts[kind as usize] = [down, up];
    }

    /// Is any counter nonzero?
    pub fn has_just_accidentals(&self) -> bool {
        self.counts.iter().flatten().any(|&count| count != 0)
    }
}

impl Default for CommaVector {
    fn default() -> Self {
        CommaVector::new(Accidental::Natural)
    }
}
