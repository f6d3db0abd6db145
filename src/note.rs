//! Note Names and Pitches
//!
//! The twelve chromatic pitch classes plus an octave-qualified pitch type
//! used for open-string tunings.

use std::fmt::Display;

/// Number of pitch classes in 12-tone equal temperament.
pub(crate) const SEMITONES: u8 = 12;

/// Twelve chromatic pitch classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteName {
    /// C
    C,
    /// C sharp / D flat
    Cs,
    /// D
    D,
    /// D sharp / E flat
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp / G flat
    Fs,
    /// G
    G,
    /// G sharp / A flat
    Gs,
    /// A
    A,
    /// A sharp / B flat
    As,
    /// B
    B,
}

impl NoteName {
    /// Semitone offset from C (C = 0, B = 11).
    pub const fn semitone(self) -> u8 {
        self as u8
    }

    /// Pitch class for a semitone count; values wrap modulo 12.
    pub const fn from_semitone(semitone: u8) -> NoteName {
        match semitone % SEMITONES {
            0 => NoteName::C,
            1 => NoteName::Cs,
            2 => NoteName::D,
            3 => NoteName::Ds,
            4 => NoteName::E,
            5 => NoteName::F,
            6 => NoteName::Fs,
            7 => NoteName::G,
            8 => NoteName::Gs,
            9 => NoteName::A,
            10 => NoteName::As,
            _ => NoteName::B,
        }
    }

    /// The pitch class `semitones` above (or below, if negative) this one.
    pub fn transpose(self, semitones: i32) -> NoteName {
        let shifted = (self.semitone() as i32 + semitones).rem_euclid(SEMITONES as i32);
        NoteName::from_semitone(shifted as u8)
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        };
        write!(f, "{name}")
    }
}

/// A pitch class qualified with an octave, e.g. the open strings of a tuning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pitch {
    /// Pitch class.
    pub name: NoteName,
    /// Scientific octave number (A4 = 440 Hz, C4 = middle C).
    pub octave: i8,
}

impl Pitch {
    /// Create a pitch from a name and octave.
    pub const fn new(name: NoteName, octave: i8) -> Self {
        Pitch { name, octave }
    }

    /// MIDI note number (C4 = 60). Octave -1 starts at 0.
    pub const fn midi(self) -> i32 {
        (self.octave as i32 + 1) * SEMITONES as i32 + self.name.semitone() as i32
    }

    /// The pitch sounding `frets` semitones above this open string.
    pub fn at_fret(self, frets: u8) -> Pitch {
        let midi = self.midi() + frets as i32;
        Pitch {
            name: NoteName::from_semitone(midi.rem_euclid(SEMITONES as i32) as u8),
            octave: (midi / SEMITONES as i32 - 1) as i8,
        }
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.midi().cmp(&other.midi())
    }
}
