//! # chord_fretter
//!
//! Chord-fretting resolution for fretted string instruments: enumerate
//! every playable voicing of a chord on a tuning, assign a left-hand
//! fingering to each, score the difficulty, and return a ranked list.
//!
//! ## Example
//! ```rust
//! use chord_fretter::{resolve, Chord, Instrument};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Parse a chord symbol
//!     let chord: Chord = "E".parse()?;
//!
//!     // 2) Pick an instrument (tuning + resolving options)
//!     let instrument = Instrument::guitar();
//!
//!     // 3) Resolve; candidates come back easiest first
//!     let voicings = resolve(&chord, &instrument);
//!     if let Some(best) = voicings.first() {
//!         println!("frets: {:?}, rating: {:.1}", best.frets, best.rating);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Resolution is pure and synchronous: no I/O, no shared mutable state,
//! and "no playable fretting" is an empty list, never an error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Chord entity and packed chord-quality bitfield.
pub use chord::{Chord, ChordType};

/// Interval arithmetic.
pub use interval::{Interval, Quality};

/// Pitch classes and octave-qualified pitches.
pub use note::{NoteName, Pitch};

/// Text-form parsing errors.
pub use parse::ParseError;

/// Tunings, presets, and instrument options.
pub use tuning::{Instrument, InstrumentBuilder, InversionTolerance, Tuning};

/// The fretting resolver and its output types.
pub use resolver::{resolve, ChordDetail, OmittedInterval};

/// Fingering arrangement output types.
pub use fingering::{arrange, FingerRange, Fingering, Pressability};

/// Note name and pitch model.
pub mod note;

/// Interval model.
pub mod interval;

/// Chord and chord-type model.
pub mod chord;

/// Chord-symbol, pitch and tuning text parsing.
pub mod parse;

/// Tuning and instrument model.
pub mod tuning;

/// Fretting resolution: the voicing search.
pub mod resolver;

/// Fingering arrangement: the finger-assignment search.
pub mod fingering;

/// Difficulty rating heuristics and tunable weights.
pub mod rating;
