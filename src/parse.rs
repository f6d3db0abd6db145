//! Symbol Parsing
//!
//! Text forms for notes, pitches, tunings and chord symbols ("F#m7",
//! "Bb13", "C/G"), the upstream interface that hands the resolver a
//! [`Chord`]. Parsing is table-driven; unknown suffixes are errors, not
//! guesses.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::chord::{Chord, ChordType};
use crate::note::{NoteName, Pitch};
use crate::tuning::Tuning;

/// Errors when parsing notes, pitches, tunings or chord symbols.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty.
    #[error("empty input")]
    EmptyInput,

    /// A note name was not recognized.
    #[error("unrecognized note name `{0}`")]
    UnknownNote(String),

    /// A chord-quality suffix was not recognized.
    #[error("unrecognized chord quality `{0}`")]
    UnknownQuality(String),

    /// A pitch had a missing or malformed octave number.
    #[error("invalid octave in `{0}`")]
    InvalidOctave(String),
}

/// Chord-quality suffixes in display order; the first entry for a type is
/// its canonical spelling.
const SUFFIXES: &[(&str, ChordType)] = &[
    ("", ChordType::MAJOR),
    ("maj", ChordType::MAJOR),
    ("m", ChordType::MINOR),
    ("min", ChordType::MINOR),
    ("5", ChordType::POWER),
    ("dim", ChordType::DIMINISHED),
    ("dim7", ChordType::DIMINISHED_SEVENTH),
    ("aug", ChordType::AUGMENTED),
    ("sus2", ChordType::SUSPENDED_SECOND),
    ("sus4", ChordType::SUSPENDED_FOURTH),
    ("6", ChordType::SIXTH),
    ("m6", ChordType::MINOR_SIXTH),
    ("7", ChordType::DOMINANT_SEVENTH),
    ("maj7", ChordType::MAJOR_SEVENTH),
    ("m7", ChordType::MINOR_SEVENTH),
    ("m(maj7)", ChordType::MINOR_MAJOR_SEVENTH),
    ("m7b5", ChordType::HALF_DIMINISHED),
    ("9", ChordType::DOMINANT_NINTH),
    ("maj9", ChordType::MAJOR_NINTH),
    ("m9", ChordType::MINOR_NINTH),
    ("add9", ChordType::ADDED_NINTH),
    ("11", ChordType::DOMINANT_ELEVENTH),
    ("m11", ChordType::MINOR_ELEVENTH),
    ("13", ChordType::DOMINANT_THIRTEENTH),
    ("m13", ChordType::MINOR_THIRTEENTH),
];

lazy_static! {
    static ref SUFFIX_TABLE: HashMap<&'static str, ChordType> =
        SUFFIXES.iter().copied().collect();
}

impl ChordType {
    /// Canonical symbol suffix for this type, if it has one.
    pub fn suffix(self) -> Option<&'static str> {
        SUFFIXES
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(s, _)| *s)
    }
}

/// Split a leading note name (letter plus optional accidental) off `s`,
/// returning the note and the rest.
fn split_note(s: &str) -> Result<(NoteName, &str), ParseError> {
    let mut chars = s.char_indices();
    let (_, letter) = chars.next().ok_or(ParseError::EmptyInput)?;
    let base = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(ParseError::UnknownNote(s.to_string())),
    };
    let (semitone, rest) = match chars.next() {
        Some((i, '#')) => (base + 1, &s[i + 1..]),
        Some((i, 'b')) => (base + 11, &s[i + 1..]),
        Some((i, _)) => (base, &s[i..]),
        None => (base, ""),
    };
    Ok((NoteName::from_semitone(semitone % 12), rest))
}

impl FromStr for NoteName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_note(s)? {
            (note, "") => Ok(note),
            _ => Err(ParseError::UnknownNote(s.to_string())),
        }
    }
}

impl FromStr for Pitch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_note(s)?;
        let octave: i8 = rest
            .parse()
            .map_err(|_| ParseError::InvalidOctave(s.to_string()))?;
        Ok(Pitch::new(name, octave))
    }
}

impl FromStr for Tuning {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pitches: Vec<Pitch> = s
            .split_whitespace()
            .map(Pitch::from_str)
            .collect::<Result<_, _>>()?;
        if pitches.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Ok(Tuning::new(pitches))
    }
}

impl FromStr for Chord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, bass) = match s.split_once('/') {
            Some((body, bass)) => (body, Some(NoteName::from_str(bass)?)),
            None => (s, None),
        };
        let (root, suffix) = split_note(body)?;
        let kind = *SUFFIX_TABLE
            .get(suffix)
            .ok_or_else(|| ParseError::UnknownQuality(suffix.to_string()))?;
        Ok(Chord { root, kind, bass })
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)?;
        match self.kind.suffix() {
            Some(suffix) => write!(f, "{suffix}")?,
            None => write!(f, "?")?,
        }
        if let Some(bass) = self.bass {
            if bass != self.root {
                write!(f, "/{bass}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_names_with_accidentals() {
        assert_eq!("C".parse(), Ok(NoteName::C));
        assert_eq!("F#".parse(), Ok(NoteName::Fs));
        assert_eq!("Bb".parse(), Ok(NoteName::As));
        assert_eq!("Cb".parse(), Ok(NoteName::B));
        assert!("H".parse::<NoteName>().is_err());
    }

    #[test]
    fn pitches_carry_octaves() {
        assert_eq!("E2".parse(), Ok(Pitch::new(NoteName::E, 2)));
        assert_eq!("G#3".parse(), Ok(Pitch::new(NoteName::Gs, 3)));
        assert!("E".parse::<Pitch>().is_err());
    }

    #[test]
    fn tuning_from_text_matches_preset() {
        let tuning: Tuning = "E2 A2 D3 G3 B3 E4".parse().unwrap();
        assert_eq!(tuning, Tuning::guitar_standard());
    }

    #[test]
    fn chord_symbols() {
        let chord: Chord = "F#m7".parse().unwrap();
        assert_eq!(chord.root, NoteName::Fs);
        assert_eq!(chord.kind, ChordType::MINOR_SEVENTH);
        assert_eq!(chord.bass, None);

        let slash: Chord = "C/G".parse().unwrap();
        assert_eq!(slash.kind, ChordType::MAJOR);
        assert_eq!(slash.bass, Some(NoteName::G));

        assert_eq!(
            "Bb13".parse::<Chord>().unwrap().kind,
            ChordType::DOMINANT_THIRTEENTH
        );
        assert_eq!(
            "Xyz".parse::<Chord>(),
            Err(ParseError::UnknownNote("Xyz".to_string()))
        );
        assert_eq!(
            "Cwat".parse::<Chord>(),
            Err(ParseError::UnknownQuality("wat".to_string()))
        );
    }

    #[test]
    fn chord_display_round_trips() {
        for symbol in ["C", "Am", "F#m7", "Bb13", "Dsus4", "C/G", "G#dim7"] {
            let chord: Chord = symbol.parse().unwrap();
            let shown = chord.to_string();
            let reparsed: Chord = shown.parse().unwrap();
            assert_eq!(chord, reparsed);
        }
    }
}
