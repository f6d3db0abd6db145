//! Intervals
//!
//! Interval arithmetic over 0-based staff degrees. Degree 0 is a unison,
//! degree 2 a third, degree 7 an octave; compound degrees up to two octaves
//! are covered by the constant table below.

use std::fmt::Display;

use crate::note::SEMITONES;

/// Semitone width of each simple degree (unison, 2nd, .., 7th) in its
/// perfect/major form.
const DEGREE_SEMITONES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Interval quality.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Quality {
    /// Perfect; only valid for unison/fourth/fifth family degrees.
    Perfect,
    /// Major; only valid outside the perfect family.
    Major,
    /// Minor; only valid outside the perfect family.
    Minor,
    /// Augmented; one semitone above perfect/major.
    Augmented,
    /// Diminished; one semitone below perfect/minor.
    Diminished,
}

/// An interval: 0-based staff degree plus quality.
///
/// Constructing an interval whose quality is incompatible with its degree
/// family (e.g. a "major fifth") is a programming error and panics; use
/// [`Interval::try_new`] to get an `Option` instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    number: u8,
    quality: Quality,
}

/// Degrees congruent to 0, 3 or 4 (mod 7) form the perfect family.
const fn is_perfect_family(number: u8) -> bool {
    matches!(number % 7, 0 | 3 | 4)
}

const fn quality_allowed(number: u8, quality: Quality) -> bool {
    if is_perfect_family(number) {
        !matches!(quality, Quality::Major | Quality::Minor)
    } else {
        !matches!(quality, Quality::Perfect)
    }
}

impl Interval {
    /// Create an interval, panicking if `quality` is invalid for `number`.
    pub const fn new(number: u8, quality: Quality) -> Self {
        assert!(
            quality_allowed(number, quality),
            "interval quality incompatible with degree family"
        );
        Interval { number, quality }
    }

    /// Create an interval, or `None` if `quality` is invalid for `number`.
    pub const fn try_new(number: u8, quality: Quality) -> Option<Self> {
        if quality_allowed(number, quality) {
            Some(Interval { number, quality })
        } else {
            None
        }
    }

    /// 0-based staff degree (2 = third, 8 = ninth).
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Quality of the interval.
    pub const fn quality(self) -> Quality {
        self.quality
    }

    /// Width of the interval in semitones.
    pub const fn semitones(self) -> u8 {
        let base =
            DEGREE_SEMITONES[(self.number % 7) as usize] + (self.number / 7) * SEMITONES;
        let adjust: i8 = if is_perfect_family(self.number) {
            match self.quality {
                Quality::Augmented => 1,
                Quality::Diminished => -1,
                _ => 0,
            }
        } else {
            match self.quality {
                Quality::Augmented => 1,
                Quality::Minor => -1,
                Quality::Diminished => -2,
                _ => 0,
            }
        };
        (base as i8 + adjust) as u8
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let q = match self.quality {
            Quality::Perfect => "P",
            Quality::Major => "M",
            Quality::Minor => "m",
            Quality::Augmented => "A",
            Quality::Diminished => "d",
        };
        write!(f, "{q}{}", self.number + 1)
    }
}

/// Perfect unison.
pub const PERFECT_UNISON: Interval = Interval::new(0, Quality::Perfect);
/// Minor second.
pub const MINOR_SECOND: Interval = Interval::new(1, Quality::Minor);
/// Major second.
pub const MAJOR_SECOND: Interval = Interval::new(1, Quality::Major);
/// Minor third.
pub const MINOR_THIRD: Interval = Interval::new(2, Quality::Minor);
/// Major third.
pub const MAJOR_THIRD: Interval = Interval::new(2, Quality::Major);
/// Perfect fourth.
pub const PERFECT_FOURTH: Interval = Interval::new(3, Quality::Perfect);
/// Augmented fourth.
pub const AUGMENTED_FOURTH: Interval = Interval::new(3, Quality::Augmented);
/// Diminished fifth.
pub const DIMINISHED_FIFTH: Interval = Interval::new(4, Quality::Diminished);
/// Perfect fifth.
pub const PERFECT_FIFTH: Interval = Interval::new(4, Quality::Perfect);
/// Augmented fifth.
pub const AUGMENTED_FIFTH: Interval = Interval::new(4, Quality::Augmented);
/// Minor sixth.
pub const MINOR_SIXTH: Interval = Interval::new(5, Quality::Minor);
/// Major sixth.
pub const MAJOR_SIXTH: Interval = Interval::new(5, Quality::Major);
/// Diminished seventh.
pub const DIMINISHED_SEVENTH: Interval = Interval::new(6, Quality::Diminished);
/// Minor seventh.
pub const MINOR_SEVENTH: Interval = Interval::new(6, Quality::Minor);
/// Major seventh.
pub const MAJOR_SEVENTH: Interval = Interval::new(6, Quality::Major);
/// Perfect octave.
pub const PERFECT_OCTAVE: Interval = Interval::new(7, Quality::Perfect);
/// Minor ninth.
pub const MINOR_NINTH: Interval = Interval::new(8, Quality::Minor);
/// Major ninth.
pub const MAJOR_NINTH: Interval = Interval::new(8, Quality::Major);
/// Augmented ninth.
pub const AUGMENTED_NINTH: Interval = Interval::new(8, Quality::Augmented);
/// Perfect eleventh.
pub const PERFECT_ELEVENTH: Interval = Interval::new(10, Quality::Perfect);
/// Augmented eleventh.
pub const AUGMENTED_ELEVENTH: Interval = Interval::new(10, Quality::Augmented);
/// Minor thirteenth.
pub const MINOR_THIRTEENTH: Interval = Interval::new(12, Quality::Minor);
/// Major thirteenth.
pub const MAJOR_THIRTEENTH: Interval = Interval::new(12, Quality::Major);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_interval_widths() {
        assert_eq!(PERFECT_UNISON.semitones(), 0);
        assert_eq!(MAJOR_THIRD.semitones(), 4);
        assert_eq!(MINOR_THIRD.semitones(), 3);
        assert_eq!(PERFECT_FIFTH.semitones(), 7);
        assert_eq!(DIMINISHED_FIFTH.semitones(), 6);
        assert_eq!(AUGMENTED_FIFTH.semitones(), 8);
        assert_eq!(MINOR_SEVENTH.semitones(), 10);
        assert_eq!(DIMINISHED_SEVENTH.semitones(), 9);
    }

    #[test]
    fn compound_interval_widths() {
        assert_eq!(PERFECT_OCTAVE.semitones(), 12);
        assert_eq!(MAJOR_NINTH.semitones(), 14);
        assert_eq!(PERFECT_ELEVENTH.semitones(), 17);
        assert_eq!(MAJOR_THIRTEENTH.semitones(), 21);
    }

    #[test]
    fn try_new_rejects_bad_combinations() {
        assert!(Interval::try_new(4, Quality::Major).is_none());
        assert!(Interval::try_new(2, Quality::Perfect).is_none());
        assert!(Interval::try_new(10, Quality::Minor).is_none());
        assert!(Interval::try_new(3, Quality::Augmented).is_some());
    }

    #[test]
    #[should_panic(expected = "incompatible")]
    fn new_panics_on_major_fifth() {
        let _ = Interval::new(4, Quality::Major);
    }

    #[test]
    fn display_names() {
        assert_eq!(PERFECT_FIFTH.to_string(), "P5");
        assert_eq!(MINOR_SEVENTH.to_string(), "m7");
        assert_eq!(MAJOR_NINTH.to_string(), "M9");
    }
}
