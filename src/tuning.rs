//! Tunings and Instruments
//!
//! Open-string pitch lists for fretted instruments, a read-only preset
//! registry, and the per-instrument options that bound the fretting
//! search.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::note::{NoteName, Pitch};

/// Ordered open-string pitches of an instrument, lowest string first by
/// convention (the resolver re-sorts by absolute pitch internally).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    pitches: Vec<Pitch>,
}

impl Tuning {
    /// Create a tuning from open-string pitches.
    pub fn new(pitches: Vec<Pitch>) -> Self {
        Tuning { pitches }
    }

    /// Open-string pitches in physical order.
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Number of strings.
    pub fn string_count(&self) -> usize {
        self.pitches.len()
    }

    /// Look up a named preset ("guitar", "drop-d", "ukulele", "bass",
    /// "mandolin").
    pub fn preset(name: &str) -> Option<Tuning> {
        PRESETS.get(name).cloned()
    }

    /// Standard six-string guitar, E2 A2 D3 G3 B3 E4.
    pub fn guitar_standard() -> Tuning {
        Tuning::new(vec![
            Pitch::new(NoteName::E, 2),
            Pitch::new(NoteName::A, 2),
            Pitch::new(NoteName::D, 3),
            Pitch::new(NoteName::G, 3),
            Pitch::new(NoteName::B, 3),
            Pitch::new(NoteName::E, 4),
        ])
    }

    /// Drop-D guitar, D2 A2 D3 G3 B3 E4.
    pub fn guitar_drop_d() -> Tuning {
        Tuning::new(vec![
            Pitch::new(NoteName::D, 2),
            Pitch::new(NoteName::A, 2),
            Pitch::new(NoteName::D, 3),
            Pitch::new(NoteName::G, 3),
            Pitch::new(NoteName::B, 3),
            Pitch::new(NoteName::E, 4),
        ])
    }

    /// Soprano ukulele with reentrant high G, G4 C4 E4 A4.
    pub fn ukulele() -> Tuning {
        Tuning::new(vec![
            Pitch::new(NoteName::G, 4),
            Pitch::new(NoteName::C, 4),
            Pitch::new(NoteName::E, 4),
            Pitch::new(NoteName::A, 4),
        ])
    }

    /// Four-string bass, E1 A1 D2 G2.
    pub fn bass() -> Tuning {
        Tuning::new(vec![
            Pitch::new(NoteName::E, 1),
            Pitch::new(NoteName::A, 1),
            Pitch::new(NoteName::D, 2),
            Pitch::new(NoteName::G, 2),
        ])
    }

    /// Mandolin, G3 D4 A4 E5.
    pub fn mandolin() -> Tuning {
        Tuning::new(vec![
            Pitch::new(NoteName::G, 3),
            Pitch::new(NoteName::D, 4),
            Pitch::new(NoteName::A, 4),
            Pitch::new(NoteName::E, 5),
        ])
    }
}

lazy_static! {
    static ref PRESETS: HashMap<&'static str, Tuning> = {
        let mut m = HashMap::new();
        m.insert("guitar", Tuning::guitar_standard());
        m.insert("drop-d", Tuning::guitar_drop_d());
        m.insert("ukulele", Tuning::ukulele());
        m.insert("bass", Tuning::bass());
        m.insert("mandolin", Tuning::mandolin());
        m
    };
}

/// How the resolver treats voicings whose lowest sounding note is not the
/// expected bass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InversionTolerance {
    /// Inverted candidates are discarded.
    NotAllowed,
    /// Inverted candidates survive with a rating penalty.
    #[default]
    NotPreferred,
    /// Inverted candidates carry no penalty.
    Allowed,
}

/// A tuning plus the options bounding the fretting search.
#[derive(Debug, Clone)]
pub struct Instrument {
    /// Open-string tuning.
    pub tuning: Tuning,
    /// Inversion policy for resolved voicings.
    pub inversion_tolerance: InversionTolerance,
    /// Highest fret searched when anchoring the bass note.
    pub max_root_fret: u8,
    /// Largest fret box a hand is assumed to cover; all fretted positions
    /// of a candidate stay within `max_fret_width - 1` of each other.
    pub max_fret_width: u8,
}

impl Instrument {
    /// Start customizing with a builder.
    pub fn builder(tuning: Tuning) -> InstrumentBuilder {
        InstrumentBuilder::new(tuning)
    }

    /// Standard guitar with default search bounds.
    pub fn guitar() -> Instrument {
        InstrumentBuilder::new(Tuning::guitar_standard()).build()
    }

    /// Reentrant ukulele; inversions carry no penalty since the high G
    /// string puts non-root notes below the root in most voicings.
    pub fn ukulele() -> Instrument {
        InstrumentBuilder::new(Tuning::ukulele())
            .inversion_tolerance(InversionTolerance::Allowed)
            .build()
    }
}

/// Builder for [`Instrument`] resolving options.
pub struct InstrumentBuilder {
    tuning: Tuning,
    inversion_tolerance: InversionTolerance,
    max_root_fret: u8,
    max_fret_width: u8,
}

impl InstrumentBuilder {
    /// Start with defaults: inversions not preferred, bass anchored within
    /// the first 11 frets, 4-fret hand box.
    pub fn new(tuning: Tuning) -> Self {
        InstrumentBuilder {
            tuning,
            inversion_tolerance: InversionTolerance::NotPreferred,
            max_root_fret: 11,
            max_fret_width: 4,
        }
    }

    /// Set the inversion policy.
    pub fn inversion_tolerance(mut self, tolerance: InversionTolerance) -> Self {
        self.inversion_tolerance = tolerance;
        self
    }

    /// Set the highest fret searched for the bass anchor.
    pub fn max_root_fret(mut self, fret: u8) -> Self {
        self.max_root_fret = fret;
        self
    }

    /// Set the fret-box width the hand is assumed to cover.
    pub fn max_fret_width(mut self, width: u8) -> Self {
        self.max_fret_width = width;
        self
    }

    /// Finalize the instrument.
    pub fn build(self) -> Instrument {
        Instrument {
            tuning: self.tuning,
            inversion_tolerance: self.inversion_tolerance,
            max_root_fret: self.max_root_fret,
            max_fret_width: self.max_fret_width,
        }
    }
}
