//! Named diatonic intervals: quality plus number, with their tempered
//! semitone sizes.

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use super::NotationError;

/// Interval quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

/// A named interval: quality plus diatonic number, unison through octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedInterval {
    quality: Quality,
    number: u8,
}

/// Ascending perfect octave.
pub const OCTAVE: NamedInterval = NamedInterval { quality: Quality::Perfect, number: 8 };
/// Perfect fifth.
pub const FIFTH: NamedInterval = NamedInterval { quality: Quality::Perfect, number: 5 };
/// Perfect fourth.
pub const FOURTH: NamedInterval = NamedInterval { quality: Quality::Perfect, number: 4 };
pub const MAJOR_SECOND: NamedInterval = NamedInterval { quality: Quality::Major, number: 2 };
pub const MAJOR_THIRD: NamedInterval = NamedInterval { quality: Quality::Major, number: 3 };
pub const MAJOR_SIXTH: NamedInterval = NamedInterval { quality: Quality::Major, number: 6 };
pub const MAJOR_SEVENTH: NamedInterval = NamedInterval { quality: Quality::Major, number: 7 };
pub const MINOR_THIRD: NamedInterval = NamedInterval { quality: Quality::Minor, number: 3 };
pub const MINOR_SEVENTH: NamedInterval = NamedInterval { quality: Quality::Minor, number: 7 };
pub const AUGMENTED_UNISON: NamedInterval = NamedInterval { quality: Quality::Augmented, number: 1 };
pub const AUGMENTED_FOURTH: NamedInterval = NamedInterval { quality: Quality::Augmented, number: 4 };

impl NamedInterval {
    /// Checked constructor. Unisons, fourths, fifths and octaves take
    /// perfect quality; seconds, thirds, sixths and sevenths take major or
    /// minor; augmented and diminished apply to any number.
    pub fn new(quality: Quality, number: u8) -> Result<Self, NotationError> {
        if number == 0 || number > 8 {
            return Err(NotationError::InvalidInterval(quality, number));
        }
        let perfect_class = matches!(number, 1 | 4 | 5 | 8);
        let valid = match quality {
            Quality::Perfect => perfect_class,
            Quality::Major | Quality::Minor => !perfect_class,
            Quality::Augmented | Quality::Diminished => true,
        };
        if valid {
            Ok(NamedInterval { quality, number })
        } else {
            Err(NotationError::InvalidInterval(quality, number))
        }
    }

    pub fn quality(self) -> Quality {
        self.quality
    }

    pub fn number(self) -> u8 {
        self.number
    }

    /// Size in tempered semitones.
    pub fn semitones(self) -> i32 {
        let base = [0, 2, 4, 5, 7, 9, 11, 12][usize::from(self.number - 1)];
        let perfect_class = matches!(self.number, 1 | 4 | 5 | 8);
        match self.quality {
            Quality::Perfect | Quality::Major => base,
            Quality::Minor => base - 1,
            Quality::Augmented => base + 1,
            Quality::Diminished => {
                if perfect_class {
                    base - 1
                } else {
                    base - 2
                }
            }
        }
    }
}

impl fmt::Display for NamedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quality = match self.quality {
            Quality::Perfect => 'P',
            Quality::Major => 'M',
            Quality::Minor => 'm',
            Quality::Augmented => 'A',
            Quality::Diminished => 'd',
        };
        write!(f, "{}{}", quality, self.number)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_semitones() {
        let examples = [
            (OCTAVE, 12),
            (FIFTH, 7),
            (FOURTH, 5),
            (MAJOR_SECOND, 2),
            (MAJOR_THIRD, 4),
            (MAJOR_SIXTH, 9),
            (MAJOR_SEVENTH, 11),
            (MINOR_THIRD, 3),
            (MINOR_SEVENTH, 10),
            (AUGMENTED_UNISON, 1),
            (AUGMENTED_FOURTH, 6),
        ];
        for (interval, expected) in examples {
            assert_eq!(interval.semitones(), expected, "{interval}");
        }
    }

    #[test]
    fn test_checked_construction() {
        assert_eq!(NamedInterval::new(Quality::Perfect, 5), Ok(FIFTH));
        assert!(NamedInterval::new(Quality::Perfect, 3).is_err());
        assert!(NamedInterval::new(Quality::Major, 5).is_err());
        assert!(NamedInterval::new(Quality::Major, 0).is_err());
        assert!(NamedInterval::new(Quality::Minor, 9).is_err());
        assert_eq!(
            NamedInterval::new(Quality::Diminished, 5).map(|i| i.semitones()),
            Ok(6)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FIFTH.to_string(), "P5");
        assert_eq!(MINOR_SEVENTH.to_string(), "m7");
        assert_eq!(AUGMENTED_FOURTH.to_string(), "A4");
    }
}
