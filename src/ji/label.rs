//! Renders a comma vector into the ordered accidental label tokens a host
//! notation program prints verbatim.

use std::{error::Error, fmt};

use super::vector::{CommaKind, CommaVector, Direction};

/// Rendering failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// A residual count above three has no spelled-out word.
    UnsupportedMagnitude { kind: CommaKind, count: u32 },
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::UnsupportedMagnitude { kind, count } => write!(
                f,
                "cannot spell {count} residual {}s; counts above three are not supported",
                kind.label()
            ),
        }
    }
}

impl Error for LabelError {}

/// The ordered label tokens for one comma vector, lowest-priority family
/// first. The display form joins tokens with a single space; any finer
/// visual kerning between tokens belongs to the host renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSequence {
    tokens: Vec<String>,
}

impl LabelSequence {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for LabelSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

fn count_word(count: u32) -> Option<&'static str> {
    match count {
        1 => Some("one"),
        2 => Some("two"),
        3 => Some("three"),
        _ => None,
    }
}

/// Collapses paired counters and emits label tokens.
///
/// Per family in priority order: equal counters cancel to zero — the
/// syntonic pair still emits the bare base accidental; unequal counters
/// leave their difference on the larger side and emit a token naming it.
/// Tokens are collected in priority order, then reversed, and a trailing
/// bare `natural` is dropped when any residual remains elsewhere. Returns
/// the reduced vector together with the tokens; the input is not mutated.
pub fn render(vector: &CommaVector) -> Result<(CommaVector, LabelSequence), LabelError> {
    let mut reduced = vector.clone();
    let mut tokens: Vec<String> = Vec::new();
    let base = reduced.diatonic_accidental();
    for kind in CommaKind::ALL {
        let down = reduced.count(kind, Direction::Down);
        let up = reduced.count(kind, Direction::Up);
        if down == up {
            reduced.set_pair(kind, 0, 0);
            if kind == CommaKind::Syntonic {
                tokens.push(base.label().to_string());
            }
            continue;
        }
        let (residual, direction) = if down > up {
            (down - up, Direction::Down)
        } else {
            (up - down, Direction::Up)
        };
        match direction {
            Direction::Down => reduced.set_pair(kind, residual, 0),
            Direction::Up => reduced.set_pair(kind, 0, residual),
        }
        let word = count_word(residual)
            .ok_or(LabelError::UnsupportedMagnitude { kind, count: residual })?;
        if kind == CommaKind::Syntonic {
            tokens.push(format!(
                "{}-{}-{}-{}",
                base.label(),
                word,
                kind.label(),
                direction.suffix()
            ));
        } else {
            tokens.push(format!("{}-{}-{}", word, kind.label(), direction.suffix()));
        }
    }
    tokens.reverse();
    if tokens.last().map(String::as_str) == Some("natural") && reduced.has_just_accidentals() {
        tokens.pop();
    }
    Ok((reduced, LabelSequence { tokens }))
}

#[cfg(test)]
mod test {
    use crate::notation::Accidental;

    use super::*;

    #[test]
    fn test_bare_natural() {
        let vector = CommaVector::default();
        let (reduced, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["natural"]);
        assert!(!reduced.has_just_accidentals());
    }

    #[test]
    fn test_one_syntonic_comma_down() {
        let mut vector = CommaVector::default();
        vector.bump(CommaKind::Syntonic, Direction::Down);
        let (_, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["natural-one-syntonic-comma-down"]);
        assert_eq!(labels.to_string(), "natural-one-syntonic-comma-down");
    }

    #[test]
    fn test_natural_elides_before_other_families() {
        let mut vector = CommaVector::default();
        vector.bump(CommaKind::Septimal, Direction::Down);
        let (reduced, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["one-septimal-comma-down"]);
        assert!(reduced.has_just_accidentals());
        // the input vector is untouched
        assert_eq!(vector.count(CommaKind::Septimal, Direction::Down), 1);
    }

    #[test]
    fn test_non_natural_base_is_kept() {
        let mut vector = CommaVector::new(Accidental::Sharp);
        vector.bump(CommaKind::TridecimalThirdTone, Direction::Down);
        let (_, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["one-tridecimal-third-tone-down", "sharp"]);
        assert_eq!(labels.to_string(), "one-tridecimal-third-tone-down sharp");
    }

    #[test]
    fn test_pairwise_cancellation() {
        let mut vector = CommaVector::default();
        vector.bump(CommaKind::Syntonic, Direction::Down);
        vector.bump(CommaKind::Syntonic, Direction::Up);
        vector.bump(CommaKind::UndecimalQuarterTone, Direction::Up);
        vector.bump(CommaKind::UndecimalQuarterTone, Direction::Up);
        vector.bump(CommaKind::UndecimalQuarterTone, Direction::Down);
        let (reduced, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["one-undecimal-quarter-tone-up"]);
        assert_eq!(reduced.count(CommaKind::Syntonic, Direction::Down), 0);
        assert_eq!(reduced.count(CommaKind::Syntonic, Direction::Up), 0);
        assert_eq!(reduced.count(CommaKind::UndecimalQuarterTone, Direction::Up), 1);
        assert_eq!(reduced.count(CommaKind::UndecimalQuarterTone, Direction::Down), 0);
    }

    #[test]
    fn test_priority_order_is_reversed_in_output() {
        let mut vector = CommaVector::new(Accidental::Flat);
        vector.bump(CommaKind::Syntonic, Direction::Up);
        vector.bump(CommaKind::Septimal, Direction::Down);
        vector.bump(CommaKind::NineteenLimit, Direction::Up);
        let (_, labels) = render(&vector).unwrap();
        assert_eq!(
            labels.tokens(),
            [
                "one-nineteen-limit-schisma-up",
                "one-septimal-comma-down",
                "flat-one-syntonic-comma-up"
            ]
        );
    }

    #[test]
    fn test_spelled_counts() {
        let mut vector = CommaVector::default();
        vector.bump(CommaKind::Syntonic, Direction::Down);
        vector.bump(CommaKind::Syntonic, Direction::Down);
        vector.bump(CommaKind::Syntonic, Direction::Down);
        let (_, labels) = render(&vector).unwrap();
        assert_eq!(labels.tokens(), ["natural-three-syntonic-comma-down"]);
    }

    #[test]
    fn test_count_above_three_fails() {
        let mut vector = CommaVector::default();
        for _ in 0..4 {
            vector.bump(CommaKind::Septimal, Direction::Up);
        }
        assert_eq!(
            render(&vector).unwrap_err(),
            LabelError::UnsupportedMagnitude {
                kind: CommaKind::Septimal,
                count: 4
            }
        );
    }
}
