//! Chords
//!
//! A chord is a root pitch class, a packed [`ChordType`] describing its
//! interval structure, and an optional bass note for slash chords.

use crate::interval::{Interval, Quality};
use crate::note::NoteName;

/// Bit width of one degree slot.
const SLOT_BITS: u32 = 3;
const SLOT_MASK: u32 = 0b111;

const SLOT_SECOND: u32 = 0;
const SLOT_THIRD: u32 = 1;
const SLOT_FOURTH: u32 = 2;
const SLOT_FIFTH: u32 = 3;
const SLOT_SIXTH: u32 = 4;
const SLOT_SEVENTH: u32 = 5;

/// Upper-octave marker bits: reinterpret the 2nd/4th/6th slots as 9th/11th/13th.
const FLAG_NINTH: u32 = 1 << 18;
const FLAG_ELEVENTH: u32 = 1 << 19;
const FLAG_THIRTEENTH: u32 = 1 << 20;

const fn quality_code(q: Quality) -> u32 {
    match q {
        Quality::Perfect => 1,
        Quality::Major => 2,
        Quality::Minor => 3,
        Quality::Augmented => 4,
        Quality::Diminished => 5,
    }
}

const fn code_quality(code: u32) -> Option<Quality> {
    match code {
        1 => Some(Quality::Perfect),
        2 => Some(Quality::Major),
        3 => Some(Quality::Minor),
        4 => Some(Quality::Augmented),
        5 => Some(Quality::Diminished),
        _ => None,
    }
}

/// Packed chord-quality bitfield.
///
/// Six 3-bit slots hold at most one quality code per scale degree
/// (2nd..7th); three flag bits mark the 2nd/4th/6th slots as upper-octave
/// extensions (9th/11th/13th). A flag is only ever set while its slot is
/// occupied, so an extension and its simple counterpart are exclusive
/// views of the same slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChordType(u32);

impl ChordType {
    /// The empty structure (root only).
    pub const fn empty() -> Self {
        ChordType(0)
    }

    const fn with_slot(self, slot: u32, q: Quality) -> Self {
        ChordType(self.0 & !(SLOT_MASK << (slot * SLOT_BITS)) | (quality_code(q) << (slot * SLOT_BITS)))
    }

    const fn slot(self, slot: u32) -> Option<Quality> {
        code_quality((self.0 >> (slot * SLOT_BITS)) & SLOT_MASK)
    }

    /// Add a plain second (sus2 and friends).
    pub const fn with_second(self, q: Quality) -> Self {
        self.with_slot(SLOT_SECOND, q)
    }

    /// Add a third.
    pub const fn with_third(self, q: Quality) -> Self {
        self.with_slot(SLOT_THIRD, q)
    }

    /// Add a plain fourth (sus4 and friends).
    pub const fn with_fourth(self, q: Quality) -> Self {
        self.with_slot(SLOT_FOURTH, q)
    }

    /// Add a fifth.
    pub const fn with_fifth(self, q: Quality) -> Self {
        self.with_slot(SLOT_FIFTH, q)
    }

    /// Add a plain sixth.
    pub const fn with_sixth(self, q: Quality) -> Self {
        self.with_slot(SLOT_SIXTH, q)
    }

    /// Add a seventh.
    pub const fn with_seventh(self, q: Quality) -> Self {
        self.with_slot(SLOT_SEVENTH, q)
    }

    /// Add a ninth: occupies the 2nd slot with the upper-octave flag.
    pub const fn with_ninth(self, q: Quality) -> Self {
        ChordType(self.with_slot(SLOT_SECOND, q).0 | FLAG_NINTH)
    }

    /// Add an eleventh: occupies the 4th slot with the upper-octave flag.
    pub const fn with_eleventh(self, q: Quality) -> Self {
        ChordType(self.with_slot(SLOT_FOURTH, q).0 | FLAG_ELEVENTH)
    }

    /// Add a thirteenth: occupies the 6th slot with the upper-octave flag.
    pub const fn with_thirteenth(self, q: Quality) -> Self {
        ChordType(self.with_slot(SLOT_SIXTH, q).0 | FLAG_THIRTEENTH)
    }

    /// Quality of the plain second, if present (extension flag clear).
    pub fn second(self) -> Option<Quality> {
        if self.0 & FLAG_NINTH == 0 {
            self.slot(SLOT_SECOND)
        } else {
            None
        }
    }

    /// Quality of the third, if present.
    pub fn third(self) -> Option<Quality> {
        self.slot(SLOT_THIRD)
    }

    /// Quality of the plain fourth, if present (extension flag clear).
    pub fn fourth(self) -> Option<Quality> {
        if self.0 & FLAG_ELEVENTH == 0 {
            self.slot(SLOT_FOURTH)
        } else {
            None
        }
    }

    /// Quality of the fifth, if present.
    pub fn fifth(self) -> Option<Quality> {
        self.slot(SLOT_FIFTH)
    }

    /// Quality of the plain sixth, if present (extension flag clear).
    pub fn sixth(self) -> Option<Quality> {
        if self.0 & FLAG_THIRTEENTH == 0 {
            self.slot(SLOT_SIXTH)
        } else {
            None
        }
    }

    /// Quality of the seventh, if present.
    pub fn seventh(self) -> Option<Quality> {
        self.slot(SLOT_SEVENTH)
    }

    /// Quality of the ninth, if present.
    pub fn ninth(self) -> Option<Quality> {
        if self.0 & FLAG_NINTH != 0 {
            self.slot(SLOT_SECOND)
        } else {
            None
        }
    }

    /// Quality of the eleventh, if present.
    pub fn eleventh(self) -> Option<Quality> {
        if self.0 & FLAG_ELEVENTH != 0 {
            self.slot(SLOT_FOURTH)
        } else {
            None
        }
    }

    /// Quality of the thirteenth, if present.
    pub fn thirteenth(self) -> Option<Quality> {
        if self.0 & FLAG_THIRTEENTH != 0 {
            self.slot(SLOT_SIXTH)
        } else {
            None
        }
    }

    /// Whether any upper extension (9th/11th/13th) is present.
    pub fn has_extension(self) -> bool {
        self.0 & (FLAG_NINTH | FLAG_ELEVENTH | FLAG_THIRTEENTH) != 0
    }

    /// The intervals of this chord type, ascending by degree. The root's
    /// unison is implied and not included.
    pub fn intervals(self) -> Vec<Interval> {
        let mut out = Vec::with_capacity(6);
        if let Some(q) = self.second() {
            out.push(Interval::new(1, q));
        }
        if let Some(q) = self.third() {
            out.push(Interval::new(2, q));
        }
        if let Some(q) = self.fourth() {
            out.push(Interval::new(3, q));
        }
        if let Some(q) = self.fifth() {
            out.push(Interval::new(4, q));
        }
        if let Some(q) = self.sixth() {
            out.push(Interval::new(5, q));
        }
        if let Some(q) = self.seventh() {
            out.push(Interval::new(6, q));
        }
        if let Some(q) = self.ninth() {
            out.push(Interval::new(8, q));
        }
        if let Some(q) = self.eleventh() {
            out.push(Interval::new(10, q));
        }
        if let Some(q) = self.thirteenth() {
            out.push(Interval::new(12, q));
        }
        out
    }

    /// Major triad.
    pub const MAJOR: Self = Self::empty()
        .with_third(Quality::Major)
        .with_fifth(Quality::Perfect);
    /// Minor triad.
    pub const MINOR: Self = Self::empty()
        .with_third(Quality::Minor)
        .with_fifth(Quality::Perfect);
    /// Diminished triad.
    pub const DIMINISHED: Self = Self::empty()
        .with_third(Quality::Minor)
        .with_fifth(Quality::Diminished);
    /// Augmented triad.
    pub const AUGMENTED: Self = Self::empty()
        .with_third(Quality::Major)
        .with_fifth(Quality::Augmented);
    /// Suspended second.
    pub const SUSPENDED_SECOND: Self = Self::empty()
        .with_second(Quality::Major)
        .with_fifth(Quality::Perfect);
    /// Suspended fourth.
    pub const SUSPENDED_FOURTH: Self = Self::empty()
        .with_fourth(Quality::Perfect)
        .with_fifth(Quality::Perfect);
    /// Power chord (root and fifth).
    pub const POWER: Self = Self::empty().with_fifth(Quality::Perfect);
    /// Major sixth chord.
    pub const SIXTH: Self = Self::MAJOR.with_sixth(Quality::Major);
    /// Minor sixth chord.
    pub const MINOR_SIXTH: Self = Self::MINOR.with_sixth(Quality::Major);
    /// Dominant seventh.
    pub const DOMINANT_SEVENTH: Self = Self::MAJOR.with_seventh(Quality::Minor);
    /// Major seventh.
    pub const MAJOR_SEVENTH: Self = Self::MAJOR.with_seventh(Quality::Major);
    /// Minor seventh.
    pub const MINOR_SEVENTH: Self = Self::MINOR.with_seventh(Quality::Minor);
    /// Minor/major seventh.
    pub const MINOR_MAJOR_SEVENTH: Self = Self::MINOR.with_seventh(Quality::Major);
    /// Diminished seventh.
    pub const DIMINISHED_SEVENTH: Self = Self::DIMINISHED.with_seventh(Quality::Diminished);
    /// Half-diminished seventh (m7b5).
    pub const HALF_DIMINISHED: Self = Self::DIMINISHED.with_seventh(Quality::Minor);
    /// Dominant ninth.
    pub const DOMINANT_NINTH: Self = Self::DOMINANT_SEVENTH.with_ninth(Quality::Major);
    /// Major ninth.
    pub const MAJOR_NINTH: Self = Self::MAJOR_SEVENTH.with_ninth(Quality::Major);
    /// Minor ninth.
    pub const MINOR_NINTH: Self = Self::MINOR_SEVENTH.with_ninth(Quality::Major);
    /// Added ninth (no seventh).
    pub const ADDED_NINTH: Self = Self::MAJOR.with_ninth(Quality::Major);
    /// Dominant eleventh.
    pub const DOMINANT_ELEVENTH: Self = Self::DOMINANT_NINTH.with_eleventh(Quality::Perfect);
    /// Minor eleventh.
    pub const MINOR_ELEVENTH: Self = Self::MINOR_NINTH.with_eleventh(Quality::Perfect);
    /// Dominant thirteenth.
    pub const DOMINANT_THIRTEENTH: Self =
        Self::DOMINANT_ELEVENTH.with_thirteenth(Quality::Major);
    /// Minor thirteenth.
    pub const MINOR_THIRTEENTH: Self = Self::MINOR_ELEVENTH.with_thirteenth(Quality::Major);
}

/// A chord: root pitch class, interval structure, optional slash bass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    /// Root pitch class.
    pub root: NoteName,
    /// Interval structure.
    pub kind: ChordType,
    /// Explicit bass note for slash chords.
    pub bass: Option<NoteName>,
}

impl Chord {
    /// A chord on `root` with no explicit bass.
    pub const fn new(root: NoteName, kind: ChordType) -> Self {
        Chord {
            root,
            kind,
            bass: None,
        }
    }

    /// A slash chord with an explicit bass note.
    pub const fn over(root: NoteName, kind: ChordType, bass: NoteName) -> Self {
        Chord {
            root,
            kind,
            bass: Some(bass),
        }
    }

    /// The pitch classes of the chord, most structurally significant
    /// first: bass (when distinct from the root), root, then one note per
    /// interval ascending by degree. Duplicate pitch classes collapse to
    /// their first occurrence.
    pub fn notes(&self) -> Vec<NoteName> {
        let mut out = Vec::with_capacity(8);
        if let Some(bass) = self.bass {
            out.push(bass);
        }
        if !out.contains(&self.root) {
            out.push(self.root);
        }
        for interval in self.kind.intervals() {
            let note = self.root.transpose(interval.semitones() as i32);
            if !out.contains(&note) {
                out.push(note);
            }
        }
        out
    }

    /// The pitch class expected in the bass: the explicit bass if set,
    /// else the root.
    pub fn bass_note(&self) -> NoteName {
        self.bass.unwrap_or(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Quality;

    #[test]
    fn slots_are_exclusive_views() {
        let t = ChordType::ADDED_NINTH;
        assert_eq!(t.ninth(), Some(Quality::Major));
        assert_eq!(t.second(), None);

        let sus = ChordType::SUSPENDED_SECOND;
        assert_eq!(sus.second(), Some(Quality::Major));
        assert_eq!(sus.ninth(), None);
    }

    #[test]
    fn intervals_sorted_ascending() {
        let degrees: Vec<u8> = ChordType::DOMINANT_THIRTEENTH
            .intervals()
            .iter()
            .map(|i| i.number())
            .collect();
        assert_eq!(degrees, vec![2, 4, 6, 8, 10, 12]);
    }

    #[test]
    fn major_triad_notes() {
        let chord = Chord::new(NoteName::E, ChordType::MAJOR);
        assert_eq!(
            chord.notes(),
            vec![NoteName::E, NoteName::Gs, NoteName::B]
        );
    }

    #[test]
    fn slash_chord_bass_leads() {
        let chord = Chord::over(NoteName::C, ChordType::MAJOR, NoteName::G);
        assert_eq!(
            chord.notes(),
            vec![NoteName::G, NoteName::C, NoteName::E]
        );
    }

    #[test]
    fn bass_equal_to_root_collapses() {
        let chord = Chord::over(NoteName::C, ChordType::MAJOR, NoteName::C);
        assert_eq!(
            chord.notes(),
            vec![NoteName::C, NoteName::E, NoteName::G]
        );
    }

    #[test]
    fn dominant_seventh_structure() {
        let t = ChordType::DOMINANT_SEVENTH;
        assert_eq!(t.third(), Some(Quality::Major));
        assert_eq!(t.fifth(), Some(Quality::Perfect));
        assert_eq!(t.seventh(), Some(Quality::Minor));
        assert!(!t.has_extension());
        assert!(ChordType::DOMINANT_NINTH.has_extension());
    }
}
