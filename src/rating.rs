//! Difficulty Rating
//!
//! Lower-is-better numeric heuristics used to rank candidate voicings and
//! pick between fingering arrangements. The weights are empirically tuned
//! parameters, kept as named constants rather than derived values.

use crate::fingering::FingerRange;

/// Weight applied to the fret span of a voicing.
pub const FRET_SPAN_WEIGHT: f32 = 1.0;
/// Span beyond which the extra-stretch penalty kicks in.
pub const WIDE_SPAN_THRESHOLD: u8 = 3;
/// Penalty per fret of span beyond [`WIDE_SPAN_THRESHOLD`].
pub const WIDE_SPAN_PENALTY: f32 = 5.0;
/// Weight on the lowest fretted position; discourages high voicings.
pub const POSITION_WEIGHT: f32 = 0.4;
/// Penalty per muted string sandwiched between played strings.
pub const BREAK_PENALTY: f32 = 5.0;
/// Single-press penalty per digit (thumb, index, middle, ring, pinky).
pub const PRESS_PENALTY: [f32; 5] = [2.0, 1.0, 1.0, 1.0, 2.5];
/// Barre penalty per string of span, per digit.
pub const BARRE_WEIGHT: [f32; 5] = [0.0, 0.4, 3.0, 2.0, 4.0];
/// Stretch penalty weight per digit for fret gaps between consecutive
/// assigned fingers; gaps of one fret or less are free.
pub const STRETCH_WEIGHT: [f32; 5] = [0.0, 0.0, 1.5, 2.0, 0.5];
/// Flat penalty for a voicing that silently inverts the chord on an
/// instrument where inversions are not preferred.
pub const INVERSION_PENALTY: f32 = 5.0;

/// Rating for omitting the perfect fifth of a seventh-or-larger chord.
pub const OMIT_FIFTH_RATING: f32 = 0.0;
/// Rating for omitting the 9th or 11th of an extended chord.
pub const OMIT_EXTENSION_RATING: f32 = 0.0;
/// Rating for omitting a major third that clashes with an eleventh;
/// negative, i.e. the omission is preferred.
pub const OMIT_CLASHING_THIRD_RATING: f32 = -2.0;

/// Lowest and highest fretted (non-open, non-muted) positions.
pub(crate) fn fret_bounds(frets: &[Option<u8>]) -> Option<(u8, u8)> {
    let mut bounds: Option<(u8, u8)> = None;
    for fret in frets.iter().flatten().copied().filter(|&f| f > 0) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(fret), hi.max(fret)),
            None => (fret, fret),
        });
    }
    bounds
}

/// Number of muted strings with played strings on both sides.
fn break_count(frets: &[Option<u8>]) -> usize {
    let first = frets.iter().position(Option::is_some);
    let last = frets.iter().rposition(Option::is_some);
    match (first, last) {
        (Some(first), Some(last)) => frets[first..=last]
            .iter()
            .filter(|f| f.is_none())
            .count(),
        _ => 0,
    }
}

/// Difficulty of playing `frets` with the given finger assignment.
/// Lower is better.
pub fn fingering_rating(frets: &[Option<u8>], fingers: &[Option<FingerRange>; 5]) -> f32 {
    let mut rating = 0.0;

    if let Some((lo, hi)) = fret_bounds(frets) {
        let span = hi - lo;
        rating += span as f32 * FRET_SPAN_WEIGHT;
        if span > WIDE_SPAN_THRESHOLD {
            rating += (span - WIDE_SPAN_THRESHOLD) as f32 * WIDE_SPAN_PENALTY;
        }
        rating += lo as f32 * POSITION_WEIGHT;
    }

    rating += break_count(frets) as f32 * BREAK_PENALTY;

    for (i, range) in fingers.iter().enumerate() {
        let Some(range) = range else { continue };
        if range.from == range.to {
            rating += PRESS_PENALTY[i];
        } else {
            rating += (range.to - range.from) as f32 * BARRE_WEIGHT[i];
        }
    }

    // Over-stretched combinations of neighbouring fingers; the thumb
    // moves independently and is exempt.
    let mut prev: Option<u8> = None;
    for (i, range) in fingers.iter().enumerate().skip(1) {
        let Some(range) = range else { continue };
        if let Some(prev_fret) = prev {
            let gap = range.fret.abs_diff(prev_fret);
            if gap > 1 {
                rating += (gap as f32 * STRETCH_WEIGHT[i]).powi(2);
            }
        }
        prev = Some(range.fret);
    }

    rating
}
