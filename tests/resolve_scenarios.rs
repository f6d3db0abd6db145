//! End-to-end resolving scenarios on real tunings: structural invariants
//! over full result sets, plus a handful of voicings every guitarist or
//! ukulele player would expect to see.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use rayon::prelude::*;

use chord_fretter::fingering::pressability;
use chord_fretter::{
    resolve, Chord, ChordDetail, ChordType, Instrument, InstrumentBuilder, NoteName, Pitch,
    Pressability, Tuning,
};

fn frets(pattern: &[i8]) -> Vec<Option<u8>> {
    pattern
        .iter()
        .map(|&f| if f < 0 { None } else { Some(f as u8) })
        .collect()
}

/// Distinct pitch classes sounded by a voicing, ascending from C.
fn sounded_notes(detail: &ChordDetail, tuning: &Tuning) -> Vec<NoteName> {
    let mut notes: Vec<NoteName> = detail
        .frets
        .iter()
        .enumerate()
        .filter_map(|(i, fret)| fret.map(|f| tuning.pitches()[i].at_fret(f).name))
        .collect();
    notes.sort_unstable();
    notes.dedup();
    notes
}

/// The pitch classes a voicing is expected to sound: the chord's notes
/// minus the omissions this candidate took.
fn expected_notes(chord: &Chord, detail: &ChordDetail) -> Vec<NoteName> {
    let omitted: Vec<NoteName> = detail
        .omitted
        .iter()
        .map(|o| chord.root.transpose(o.interval.semitones() as i32))
        .collect();
    let mut notes: Vec<NoteName> = chord
        .notes()
        .into_iter()
        .filter(|n| !omitted.contains(n))
        .collect();
    notes.sort_unstable();
    notes
}

#[test]
fn resolution_is_deterministic_across_threads() {
    let chord: Chord = "C".parse().unwrap();
    let instrument = Instrument::guitar();

    let reference: Vec<(Vec<Option<u8>>, f32)> = resolve(&chord, &instrument)
        .into_iter()
        .map(|d| (d.frets, d.rating))
        .collect();
    assert!(!reference.is_empty());

    let runs: Vec<Vec<(Vec<Option<u8>>, f32)>> = (0..8)
        .into_par_iter()
        .map(|_| {
            resolve(&chord, &instrument)
                .into_iter()
                .map(|d| (d.frets, d.rating))
                .collect()
        })
        .collect();
    for run in runs {
        assert_eq!(run, reference);
    }
}

#[test]
fn voicings_sound_exactly_the_chord_notes() {
    let instrument = Instrument::guitar();
    for symbol in ["C", "G7", "Am", "F#m7", "Dsus4", "Bm7b5"] {
        let chord: Chord = symbol.parse().unwrap();
        let results = resolve(&chord, &instrument);
        assert!(!results.is_empty(), "no voicings for {symbol}");
        for detail in &results {
            assert_eq!(
                sounded_notes(detail, &instrument.tuning),
                expected_notes(&chord, detail),
                "wrong notes in {:?} for {symbol}",
                detail.frets
            );
        }
    }
}

#[test]
fn fretted_positions_stay_inside_the_hand_box() {
    let instrument = Instrument::guitar();
    let reach = (instrument.max_fret_width - 1) as u32;
    for symbol in ["E", "C", "F#m7", "Bb13"] {
        let chord: Chord = symbol.parse().unwrap();
        for detail in resolve(&chord, &instrument) {
            let fretted: Vec<u8> = detail
                .frets
                .iter()
                .flatten()
                .copied()
                .filter(|&f| f > 0)
                .collect();
            if let (Some(&lo), Some(&hi)) = (fretted.iter().min(), fretted.iter().max()) {
                assert!(
                    (hi - lo) as u32 <= 2 * reach,
                    "{:?} spans {lo}..{hi} for {symbol}",
                    detail.frets
                );
            }
        }
    }
}

#[test]
fn fingerings_cover_every_fretted_position() {
    let instrument = Instrument::guitar();
    for symbol in ["C", "F", "G7", "Am"] {
        let chord: Chord = symbol.parse().unwrap();
        for detail in resolve(&chord, &instrument) {
            let fingering = detail.fingering.as_ref().expect("candidate kept unfingered");
            let grid = pressability(&detail.frets);
            let lo = detail
                .frets
                .iter()
                .flatten()
                .copied()
                .filter(|&f| f > 0)
                .min()
                .unwrap_or(0);
            for (c, row) in grid.iter().enumerate() {
                for (s, press) in row.iter().enumerate() {
                    let covering = fingering
                        .fingers
                        .iter()
                        .flatten()
                        .filter(|r| {
                            r.fret == lo + c as u8 && (r.from..=r.to).contains(&(s as u8))
                        })
                        .count();
                    match press {
                        Pressability::MustPress => assert_eq!(
                            covering, 1,
                            "string {s} fret {} in {:?}",
                            lo + c as u8,
                            detail.frets
                        ),
                        Pressability::MustNotPress => assert_eq!(covering, 0),
                        Pressability::CanPress => {}
                    }
                }
            }
        }
    }
}

#[test]
fn results_sort_ascending_with_stable_ties() {
    let chord: Chord = "G".parse().unwrap();
    let results = resolve(&chord, &Instrument::guitar());
    for pair in results.windows(2) {
        assert!(pair[0].rating <= pair[1].rating);
        if pair[0].rating == pair[1].rating {
            let key = |d: &ChordDetail| -> Vec<u8> {
                d.frets.iter().map(|f| f.unwrap_or(0)).collect()
            };
            assert!(key(&pair[0]) <= key(&pair[1]));
        }
    }
}

#[test]
fn no_candidate_duplicates_or_subsumes_another() {
    let chord: Chord = "Am".parse().unwrap();
    let results = resolve(&chord, &Instrument::guitar());
    for (i, a) in results.iter().enumerate() {
        for (j, b) in results.iter().enumerate() {
            if i == j {
                continue;
            }
            assert_ne!(a.frets, b.frets);
            let subsumed = a
                .frets
                .iter()
                .zip(b.frets.iter())
                .all(|(x, y)| x.is_none() || x == y);
            assert!(
                !subsumed,
                "{:?} only adds muted strings to {:?}",
                a.frets, b.frets
            );
        }
    }
}

#[test]
fn open_e_major_is_the_easiest_voicing() {
    let chord = Chord::new(NoteName::E, ChordType::MAJOR);
    let results = resolve(&chord, &Instrument::guitar());
    let best = results.first().expect("E major must resolve");

    assert_eq!(best.frets, frets(&[0, 2, 2, 1, 0, 0]));
    assert_relative_eq!(best.rating, 4.4);

    // The canonical shape uses three single presses in the first two
    // frets; anything involving a barre rates worse.
    let fingering = best.fingering.as_ref().unwrap();
    let pressed: Vec<_> = fingering.fingers.iter().flatten().collect();
    assert_eq!(pressed.len(), 3);
    assert!(pressed.iter().all(|r| r.from == r.to));
    assert!(pressed.iter().all(|r| r.fret == 1 || r.fret == 2));

    for detail in &results {
        let fingering = detail.fingering.as_ref().unwrap();
        if fingering.fingers.iter().flatten().any(|r| r.from != r.to) {
            assert!(detail.rating > best.rating);
        }
    }
}

#[test]
fn reentrant_ukulele_keeps_the_full_c_shape() {
    let chord = Chord::new(NoteName::C, ChordType::MAJOR);
    let results = resolve(&chord, &Instrument::ukulele());
    let best = results.first().expect("C major must resolve on ukulele");

    // All four strings sound; the high reentrant G doubles the fifth.
    assert_eq!(best.frets, frets(&[0, 0, 0, 3]));
    assert_relative_eq!(best.rating, 2.2);
}

#[test]
fn impossible_stretch_resolves_to_nothing() {
    // Three identically tuned strings and a one-fret hand box: D major
    // needs three distinct frets, so nothing is playable.
    let tuning = Tuning::new(vec![
        Pitch::new(NoteName::C, 4),
        Pitch::new(NoteName::C, 4),
        Pitch::new(NoteName::C, 4),
    ]);
    let instrument = InstrumentBuilder::new(tuning).max_fret_width(1).build();
    let chord = Chord::new(NoteName::D, ChordType::MAJOR);
    assert!(resolve(&chord, &instrument).is_empty());
}

#[test]
fn extended_chord_on_four_strings_forces_omissions() {
    // C13 carries seven pitch classes; a four-string bass can sound at
    // most four, so every candidate leans on the omittable intervals.
    let instrument = InstrumentBuilder::new(Tuning::bass()).build();
    let chord = Chord::new(NoteName::C, ChordType::DOMINANT_THIRTEENTH);
    let results = resolve(&chord, &instrument);
    assert!(!results.is_empty());
    for detail in &results {
        assert!(detail.omitted.len() >= 3, "{:?}", detail.omitted);
        assert_eq!(
            sounded_notes(detail, &instrument.tuning),
            expected_notes(&chord, detail)
        );
    }
}
