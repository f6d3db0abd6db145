//! Fingering Arranger
//!
//! Given a fret pattern, search for a playable assignment of up to five
//! digits (thumb plus four fingers) to the fretted positions, including
//! barres, and return the least awkward arrangement found. Patterns with
//! no valid assignment yield `None` and the owning candidate is dropped.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::rating::{fingering_rating, fret_bounds};

/// Maximum barre span (`to - from` in strings) per digit. The thumb never
/// barres; the index finger is unrestricted.
pub const FINGER_MAX_BARRE_RANGE: [u8; 5] = [0, u8::MAX, 3, 3, 2];

/// Highest fret column, relative to the pattern's lowest fret, the thumb
/// can wrap around to.
const THUMB_MAX_COLUMN: u8 = 2;

/// What a fret column means for one string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pressability {
    /// The string is fretted at exactly this column and must be pressed.
    MustPress,
    /// The string is fretted at a different column; a barre through this
    /// column would block it.
    MustNotPress,
    /// The string is open or muted and does not constrain a barre.
    CanPress,
}

/// One digit's assignment: a fret and an inclusive string range.
/// `from == to` is a single-string press, anything wider a barre.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FingerRange {
    /// Fret being pressed.
    pub fret: u8,
    /// First string of the range (physical index).
    pub from: u8,
    /// Last string of the range, inclusive.
    pub to: u8,
}

/// A complete left-hand arrangement. Index 0 is the thumb, 1..4 are
/// index through pinky; `None` marks an idle digit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingering {
    /// Per-digit assignments.
    pub fingers: [Option<FingerRange>; 5],
    /// Difficulty rating of this arrangement; lower is better.
    pub rating: f32,
}

/// Per-string pressability for each fret column in the pattern's
/// `[min_fret, max_fret]` span. Indexed `[column][string]`; column 0 is
/// the lowest fretted position. Patterns with no fretted position yield
/// an empty grid.
pub fn pressability(frets: &[Option<u8>]) -> Vec<Vec<Pressability>> {
    let Some((lo, hi)) = fret_bounds(frets) else {
        return Vec::new();
    };
    (lo..=hi)
        .map(|col| {
            frets
                .iter()
                .map(|fret| match fret {
                    Some(f) if *f == col => Pressability::MustPress,
                    Some(f) if *f > 0 => Pressability::MustNotPress,
                    _ => Pressability::CanPress,
                })
                .collect()
        })
        .collect()
}

/// Find the lowest-rated playable fingering for a fret pattern, or `None`
/// if no valid assignment of five digits exists.
pub fn arrange(frets: &[Option<u8>]) -> Option<Fingering> {
    let Some((lo, _hi)) = fret_bounds(frets) else {
        // Nothing fretted: every digit idle.
        let fingers = [None; 5];
        let rating = fingering_rating(frets, &fingers);
        return Some(Fingering { fingers, rating });
    };

    if let Some(fingers) = preset_lookup(frets, lo) {
        let rating = fingering_rating(frets, &fingers);
        return Some(Fingering { fingers, rating });
    }

    let grid = pressability(frets);
    let mut positions = Vec::new();
    for (c, row) in grid.iter().enumerate() {
        for (s, press) in row.iter().enumerate() {
            if *press == Pressability::MustPress {
                positions.push((c as u8, s as u8));
            }
        }
    }

    let mut search = Search {
        grid: &grid,
        positions: &positions,
        lo,
        string_count: frets.len(),
        results: Vec::new(),
    };

    // Branch 1: thumb idle.
    let mut fingers = [None; 5];
    search.descend(1, 0, &mut fingers);

    // Branch 2: thumb wrapped over the neck. Only meaningful when the
    // instrument leaves strings out of the four fingers' reach.
    let thumb_strings = frets.len().saturating_sub(4) as u8;
    if thumb_strings > 0 {
        let in_range: Vec<usize> = positions
            .iter()
            .enumerate()
            .filter(|(_, (_, s))| *s < thumb_strings)
            .map(|(i, _)| i)
            .collect();
        if let [only] = in_range[..] {
            let (col, string) = positions[only];
            if col <= THUMB_MAX_COLUMN {
                let mut fingers = [None; 5];
                fingers[0] = Some(FingerRange {
                    fret: lo + col,
                    from: string,
                    to: string,
                });
                search.descend(1, 1 << only, &mut fingers);
            }
        }
    }

    search
        .results
        .into_iter()
        .map(|fingers| Fingering {
            rating: fingering_rating(frets, &fingers),
            fingers,
        })
        .min_by(|a, b| a.rating.total_cmp(&b.rating))
}

struct Search<'a> {
    grid: &'a [Vec<Pressability>],
    positions: &'a [(u8, u8)],
    lo: u8,
    string_count: usize,
    results: Vec<[Option<FingerRange>; 5]>,
}

impl Search<'_> {
    fn descend(&mut self, finger: usize, resolved: u32, fingers: &mut [Option<FingerRange>; 5]) {
        let all = (1u32 << self.positions.len()) - 1;
        if resolved == all {
            self.results.push(*fingers);
            return;
        }
        if finger > 4 {
            return;
        }

        let next = (0..self.positions.len())
            .find(|i| resolved & (1 << i) == 0)
            .unwrap_or_default();
        let (col, string) = self.positions[next];

        // Skip this finger; a later one may take the position (e.g. a
        // stronger barre finger).
        self.descend(finger + 1, resolved, fingers);

        // Single press at the next unresolved position.
        fingers[finger] = Some(FingerRange {
            fret: self.lo + col,
            from: string,
            to: string,
        });
        self.descend(finger + 1, resolved | (1 << next), fingers);

        // Barre from the same position, extended through every following
        // pressable string up to this finger's maximum span.
        let cap = FINGER_MAX_BARRE_RANGE[finger];
        if cap > 0 {
            let mut to = string;
            while (to + 1) < self.string_count as u8
                && to - string < cap
                && self.grid[col as usize][(to + 1) as usize] != Pressability::MustNotPress
            {
                to += 1;
            }
            if to > string {
                let mut covered = resolved;
                for (i, &(c, s)) in self.positions.iter().enumerate() {
                    if c == col && s >= string && s <= to {
                        covered |= 1 << i;
                    }
                }
                fingers[finger] = Some(FingerRange {
                    fret: self.lo + col,
                    from: string,
                    to,
                });
                self.descend(finger + 1, covered, fingers);
            }
        }

        fingers[finger] = None;
    }
}

/// Stored preset fingerings for common shapes, keyed by the pattern
/// normalized to its own lowest fret (fretted positions become
/// `fret - min_fret + 1`, open and muted strings 0). The stored fret
/// values use the same normalization and are re-offset on lookup.
type PresetShape = (Vec<u8>, [Option<FingerRange>; 5]);

fn preset(shape: &[u8], presses: &[(usize, u8, u8)]) -> PresetShape {
    let mut fingers = [None; 5];
    for &(finger, fret, string) in presses {
        fingers[finger] = Some(FingerRange {
            fret,
            from: string,
            to: string,
        });
    }
    (shape.to_vec(), fingers)
}

lazy_static! {
    static ref PRESETS: HashMap<Vec<u8>, [Option<FingerRange>; 5]> = {
        let shapes = [
            // E form: 022100.
            preset(&[0, 2, 2, 1, 0, 0], &[(1, 1, 3), (2, 2, 1), (3, 2, 2)]),
            // E minor form: 022000.
            preset(&[0, 1, 1, 0, 0, 0], &[(2, 1, 1), (3, 1, 2)]),
            // A form: x02220.
            preset(&[0, 0, 1, 1, 1, 0], &[(1, 1, 2), (2, 1, 3), (3, 1, 4)]),
            // A minor form: x02210.
            preset(&[0, 0, 2, 2, 1, 0], &[(1, 1, 4), (2, 2, 2), (3, 2, 3)]),
            // C form: x32010.
            preset(&[0, 3, 2, 0, 1, 0], &[(1, 1, 4), (2, 2, 2), (3, 3, 1)]),
            // G form: 320003.
            preset(&[2, 1, 0, 0, 0, 2], &[(1, 1, 1), (2, 2, 0), (3, 2, 5)]),
            // D form: xx0232.
            preset(&[0, 0, 0, 1, 2, 1], &[(1, 1, 3), (2, 1, 5), (3, 2, 4)]),
            // D minor form: xx0231.
            preset(&[0, 0, 0, 2, 3, 1], &[(1, 1, 5), (2, 2, 3), (3, 3, 4)]),
            // Ukulele C form: 0003.
            preset(&[0, 0, 0, 1], &[(3, 1, 3)]),
        ];
        shapes.into_iter().collect()
    };
}

fn preset_lookup(frets: &[Option<u8>], lo: u8) -> Option<[Option<FingerRange>; 5]> {
    let shape: Vec<u8> = frets
        .iter()
        .map(|fret| match fret {
            Some(f) if *f > 0 => *f - lo + 1,
            _ => 0,
        })
        .collect();
    let stored = PRESETS.get(&shape)?;
    let mut fingers = *stored;
    for range in fingers.iter_mut().flatten() {
        range.fret += lo - 1;
    }
    Some(fingers)
}
