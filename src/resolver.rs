//! Fretting Resolver
//!
//! Enumerates every playable way to voice a chord on a fretted
//! instrument: a depth-first search over per-string note choices inside a
//! sliding fret window, repeated for every viable subset of omittable
//! intervals and every choice of bass string, followed by fingering
//! assignment, duplicate pruning, and a final difficulty sort.
//!
//! Degenerate situations (too few strings, unreachable stretches,
//! unfingersable shapes) never error; they produce fewer or zero
//! candidates.

use crate::chord::{Chord, ChordType};
use crate::fingering::{arrange, Fingering};
use crate::interval::{Interval, Quality, PERFECT_FIFTH};
use crate::note::{NoteName, Pitch, SEMITONES};
use crate::rating::{
    INVERSION_PENALTY, OMIT_CLASHING_THIRD_RATING, OMIT_EXTENSION_RATING, OMIT_FIFTH_RATING,
};
use crate::tuning::{Instrument, InversionTolerance};

/// A chord tone that may be left out of a voicing, with the rating cost
/// (or, when negative, preference) of doing so.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OmittedInterval {
    /// The interval measured from the chord root.
    pub interval: Interval,
    /// Rating contribution when the omission is taken.
    pub rating: f32,
}

/// One resolved voicing: per-string frets and notes in physical string
/// order, the omissions taken, and the attached fingering and rating.
#[derive(Debug, Clone)]
pub struct ChordDetail {
    /// The chord being voiced.
    pub chord: Chord,
    /// Sounded pitch class per string; `None` for muted strings.
    pub notes: Vec<Option<NoteName>>,
    /// Fret per string; `None` for muted strings, 0 for open.
    pub frets: Vec<Option<u8>>,
    /// Intervals omitted from this voicing.
    pub omitted: Vec<OmittedInterval>,
    /// Sum of the omission ratings.
    pub omits_rating: f32,
    /// Structural penalty (currently only the silent-inversion penalty).
    pub fret_rating: f32,
    /// Left-hand arrangement; always present on returned candidates.
    pub fingering: Option<Fingering>,
    /// Total difficulty; lower is better.
    pub rating: f32,
}

/// The omittable intervals of a chord type, preferred omissions first,
/// then ascending by degree. The root, bass and seventh are never
/// omittable.
pub fn omittable_intervals(kind: &ChordType) -> Vec<OmittedInterval> {
    let mut out = Vec::new();
    let has_eleventh = kind.eleventh().is_some();
    let has_thirteenth = kind.thirteenth().is_some();
    let extended = kind.seventh().is_some() || kind.has_extension();

    // A major third rubs against the eleventh; dropping it is preferred.
    if has_eleventh && kind.third() == Some(Quality::Major) {
        out.push(OmittedInterval {
            interval: Interval::new(2, Quality::Major),
            rating: OMIT_CLASHING_THIRD_RATING,
        });
    }
    if extended && kind.fifth() == Some(Quality::Perfect) {
        out.push(OmittedInterval {
            interval: PERFECT_FIFTH,
            rating: OMIT_FIFTH_RATING,
        });
    }
    if has_eleventh || has_thirteenth {
        if let Some(q) = kind.ninth() {
            out.push(OmittedInterval {
                interval: Interval::new(8, q),
                rating: OMIT_EXTENSION_RATING,
            });
        }
    }
    if has_eleventh && (kind.third() == Some(Quality::Minor) || has_thirteenth) {
        if let Some(q) = kind.eleventh() {
            out.push(OmittedInterval {
                interval: Interval::new(10, q),
                rating: OMIT_EXTENSION_RATING,
            });
        }
    }
    out
}

/// Resolve every playable fretting of `chord` on `instrument`, sorted
/// ascending by rating. An empty result means no fretting was found; it
/// is a legitimate outcome, not an error.
pub fn resolve(chord: &Chord, instrument: &Instrument) -> Vec<ChordDetail> {
    let notes = chord.notes();
    let string_count = instrument.tuning.string_count();

    // Search strings in ascending-pitch order; remap on emission.
    let mut order: Vec<usize> = (0..string_count).collect();
    order.sort_by_key(|&i| instrument.tuning.pitches()[i].midi());
    let sorted_pitches: Vec<Pitch> = order
        .iter()
        .map(|&i| instrument.tuning.pitches()[i])
        .collect();

    let omittable: Vec<OmittedInterval> = omittable_intervals(&chord.kind)
        .into_iter()
        .filter(|o| {
            let pc = chord.root.transpose(o.interval.semitones() as i32);
            pc != chord.root && pc != chord.bass_note()
        })
        .collect();

    let mut candidates: Vec<ChordDetail> = Vec::new();

    for mask in 0u32..1 << omittable.len() {
        let omitted: Vec<OmittedInterval> = omittable
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, o)| *o)
            .collect();
        let omitted_notes: Vec<NoteName> = omitted
            .iter()
            .map(|o| chord.root.transpose(o.interval.semitones() as i32))
            .collect();
        let required: Vec<NoteName> = notes
            .iter()
            .copied()
            .filter(|n| !omitted_notes.contains(n))
            .collect();
        if required.len() > string_count {
            continue;
        }
        let omits_rating: f32 = omitted.iter().map(|o| o.rating).sum();

        let mut search = Search {
            pitches: &sorted_pitches,
            required: &required,
            width: instrument.max_fret_width.max(1),
            out: Vec::new(),
        };
        for start in 0..=string_count - required.len() {
            search.anchor(start, instrument.max_root_fret);
        }

        for sorted_frets in search.out {
            if let Some(detail) =
                build_detail(chord, instrument, &order, sorted_frets, &omitted, omits_rating)
            {
                candidates.push(detail);
            }
        }
    }

    simplify_skip(&mut candidates);

    candidates.retain_mut(|detail| match arrange(&detail.frets) {
        Some(fingering) => {
            detail.rating = fingering.rating + detail.omits_rating + detail.fret_rating;
            detail.fingering = Some(fingering);
            true
        }
        None => false,
    });

    similar_skip(&mut candidates);

    candidates.sort_by(|a, b| {
        a.rating
            .total_cmp(&b.rating)
            .then_with(|| fret_key(&a.frets).cmp(&fret_key(&b.frets)))
    });
    candidates
}

/// Depth-first per-string assignment over pitch-sorted strings.
struct Search<'a> {
    pitches: &'a [Pitch],
    required: &'a [NoteName],
    width: u8,
    out: Vec<Vec<Option<u8>>>,
}

impl Search<'_> {
    /// Natural fret sounding `note` on string `s`, before window snapping.
    fn natural(&self, s: usize, note: NoteName) -> u8 {
        (note.semitone() as i32 - self.pitches[s].name.semitone() as i32)
            .rem_euclid(SEMITONES as i32) as u8
    }

    /// Place the most significant note on the starting string, then
    /// descend over the remaining strings. Strings below the start are
    /// muted.
    fn anchor(&mut self, start: usize, max_root_fret: u8) {
        let fret = self.natural(start, self.required[0]);
        if fret > max_root_fret {
            return;
        }
        let mut frets = vec![None; self.pitches.len()];
        frets[start] = Some(fret);
        let window = self.grown_window(None, fret);
        self.descend(start + 1, &mut frets, 1, window);
    }

    /// The window after placing `fret`; open strings never constrain it.
    fn grown_window(&self, window: Option<(u8, u8)>, fret: u8) -> Option<(u8, u8)> {
        if fret == 0 {
            return window;
        }
        let reach = self.width - 1;
        Some(match window {
            None => (1u8.max(fret.saturating_sub(reach)), fret + reach),
            Some((lo, hi)) => (lo.max(fret.saturating_sub(reach)), hi.min(fret + reach)),
        })
    }

    fn descend(
        &mut self,
        s: usize,
        frets: &mut [Option<u8>],
        placed: u32,
        window: Option<(u8, u8)>,
    ) {
        let all = (1u32 << self.required.len()) - 1;
        if s == self.pitches.len() {
            if placed == all {
                self.out.push(frets.to_vec());
            }
            return;
        }
        // Not enough strings left for the notes still unplaced.
        let unplaced = (all & !placed).count_ones() as usize;
        if unplaced > self.pitches.len() - s {
            return;
        }

        for (i, &note) in self.required.iter().enumerate() {
            let natural = self.natural(s, note);
            if natural == 0 {
                // The open string sounds regardless of hand position; the
                // same note is also reachable fretted at the octave once
                // the window has moved up that far.
                frets[s] = Some(0);
                self.descend(s + 1, frets, placed | 1 << i, window);
                if let Some((lo, hi)) = window {
                    if (lo..=hi).contains(&SEMITONES) {
                        frets[s] = Some(SEMITONES);
                        self.descend(
                            s + 1,
                            frets,
                            placed | 1 << i,
                            self.grown_window(window, SEMITONES),
                        );
                    }
                }
                continue;
            }
            let fret = match window {
                None => natural,
                Some((lo, hi)) if (lo..=hi).contains(&natural) => natural,
                Some((lo, hi)) if (lo..=hi).contains(&(natural + SEMITONES)) => {
                    natural + SEMITONES
                }
                Some(_) => continue,
            };
            frets[s] = Some(fret);
            self.descend(s + 1, frets, placed | 1 << i, self.grown_window(window, fret));
        }

        frets[s] = None;
        self.descend(s + 1, frets, placed, window);
    }
}

fn build_detail(
    chord: &Chord,
    instrument: &Instrument,
    order: &[usize],
    sorted_frets: Vec<Option<u8>>,
    omitted: &[OmittedInterval],
    omits_rating: f32,
) -> Option<ChordDetail> {
    let string_count = order.len();
    let mut frets = vec![None; string_count];
    for (sorted_idx, &physical) in order.iter().enumerate() {
        frets[physical] = sorted_frets[sorted_idx];
    }

    let pitches = instrument.tuning.pitches();
    let notes: Vec<Option<NoteName>> = frets
        .iter()
        .enumerate()
        .map(|(i, fret)| fret.map(|f| pitches[i].at_fret(f).name))
        .collect();

    let lowest = frets
        .iter()
        .enumerate()
        .filter_map(|(i, fret)| fret.map(|f| pitches[i].at_fret(f)))
        .min()?;
    let inverted = lowest.name != chord.bass_note();

    let bass_fixed = instrument.inversion_tolerance == InversionTolerance::NotAllowed
        || chord.bass.is_some_and(|b| b != chord.root);
    if bass_fixed && inverted {
        return None;
    }
    let fret_rating =
        if inverted && instrument.inversion_tolerance == InversionTolerance::NotPreferred {
            INVERSION_PENALTY
        } else {
            0.0
        };

    Some(ChordDetail {
        chord: *chord,
        notes,
        frets,
        omitted: omitted.to_vec(),
        omits_rating,
        fret_rating,
        fingering: None,
        rating: 0.0,
    })
}

/// Muted strings compare as fret 0 for the final tie-break.
fn fret_key(frets: &[Option<u8>]) -> Vec<u8> {
    frets.iter().map(|f| f.unwrap_or(0)).collect()
}

/// Pre-fingering pruning: collapse exact duplicates, and drop a candidate
/// when another plays fret 0 on a string this one mutes while agreeing
/// everywhere else (prefer explicit open strings over implicit mutes).
fn simplify_skip(candidates: &mut Vec<ChordDetail>) {
    let mut drop = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        if drop[i] {
            continue;
        }
        for j in 0..candidates.len() {
            if i == j || drop[j] {
                continue;
            }
            let a = &candidates[i].frets;
            let b = &candidates[j].frets;
            let identical = a == b;
            let open_filled = a.iter().zip(b.iter()).all(|(x, y)| {
                x == y || (x.is_none() && *y == Some(0))
            });
            if (identical && j < i) || (open_filled && !identical) {
                drop[i] = true;
                break;
            }
        }
    }
    retain_kept(candidates, &drop);
}

/// Post-fingering pruning: a candidate whose played strings are a strict
/// subset of another surviving candidate's (equal frets wherever it
/// plays) merely adds muted strings and is dropped. Runs after fingering
/// so that a subset outlives a superset that proved unfingerable.
fn similar_skip(candidates: &mut Vec<ChordDetail>) {
    let mut drop = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        for j in 0..candidates.len() {
            if i == j {
                continue;
            }
            let a = &candidates[i].frets;
            let b = &candidates[j].frets;
            let subsumed = a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| x.is_none() || x == y);
            if subsumed && a != b {
                drop[i] = true;
                break;
            }
        }
    }
    retain_kept(candidates, &drop);
}

fn retain_kept(candidates: &mut Vec<ChordDetail>, drop: &[bool]) {
    let mut idx = 0;
    candidates.retain(|_| {
        let kept = !drop[idx];
        idx += 1;
        kept
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ChordType;
    use crate::tuning::{InstrumentBuilder, Tuning};

    #[test]
    fn triads_have_no_omittables() {
        assert!(omittable_intervals(&ChordType::MAJOR).is_empty());
        assert!(omittable_intervals(&ChordType::MINOR).is_empty());
        assert!(omittable_intervals(&ChordType::SUSPENDED_FOURTH).is_empty());
    }

    #[test]
    fn seventh_chords_may_drop_the_fifth() {
        let omits = omittable_intervals(&ChordType::DOMINANT_SEVENTH);
        assert_eq!(omits.len(), 1);
        assert_eq!(omits[0].interval, PERFECT_FIFTH);
        assert_eq!(omits[0].rating, 0.0);
    }

    #[test]
    fn eleventh_prefers_dropping_a_major_third() {
        let omits = omittable_intervals(&ChordType::DOMINANT_ELEVENTH);
        assert_eq!(omits[0].interval, Interval::new(2, Quality::Major));
        assert!(omits[0].rating < 0.0);
        // The fifth and ninth follow at no cost.
        assert!(omits.iter().any(|o| o.interval == PERFECT_FIFTH));
        assert!(omits.iter().any(|o| o.interval.number() == 8));
    }

    #[test]
    fn minor_eleventh_may_drop_the_eleventh_itself() {
        let omits = omittable_intervals(&ChordType::MINOR_ELEVENTH);
        assert!(omits.iter().any(|o| o.interval.number() == 10));
        assert!(omits.iter().all(|o| o.interval.number() != 2));
    }

    #[test]
    fn diminished_fifth_is_never_omittable() {
        assert!(omittable_intervals(&ChordType::HALF_DIMINISHED).is_empty());
    }

    #[test]
    fn no_candidate_repeats_a_fret_pattern() {
        let chord = Chord::new(NoteName::G, ChordType::MAJOR);
        let details = resolve(&chord, &Instrument::guitar());
        for (i, a) in details.iter().enumerate() {
            for b in &details[i + 1..] {
                assert_ne!(a.frets, b.frets);
            }
        }
    }

    #[test]
    fn open_string_notes_reappear_at_the_twelfth_fret() {
        // A 10th-position D voicing frets the A string's open note at the
        // octave instead of dropping out of the hand box.
        let chord = Chord::new(NoteName::D, ChordType::MAJOR);
        let details = resolve(&chord, &Instrument::guitar());
        assert!(details.iter().any(|d| d.frets.contains(&Some(12))));
    }

    #[test]
    fn not_allowed_pins_the_root_to_the_bass() {
        let instrument = InstrumentBuilder::new(Tuning::guitar_standard())
            .inversion_tolerance(InversionTolerance::NotAllowed)
            .build();
        let chord = Chord::new(NoteName::C, ChordType::MAJOR);
        for detail in resolve(&chord, &instrument) {
            let pitches = instrument.tuning.pitches();
            let lowest = detail
                .frets
                .iter()
                .enumerate()
                .filter_map(|(i, f)| f.map(|f| pitches[i].at_fret(f)))
                .min()
                .unwrap();
            assert_eq!(lowest.name, NoteName::C);
        }
    }

    #[test]
    fn slash_chord_bass_is_pinned() {
        let chord = Chord::over(NoteName::C, ChordType::MAJOR, NoteName::G);
        for detail in resolve(&chord, &Instrument::guitar()) {
            let pitches = Tuning::guitar_standard();
            let lowest = detail
                .frets
                .iter()
                .enumerate()
                .filter_map(|(i, f)| f.map(|f| pitches.pitches()[i].at_fret(f)))
                .min()
                .unwrap();
            assert_eq!(lowest.name, NoteName::G);
        }
    }
}
