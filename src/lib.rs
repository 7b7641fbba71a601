//! Exact microtonal pitch arithmetic.
//!
//! Two cooperating subsystems: rational pitch/ratio collections with the
//! classical set-theoretic operations (transposition, inversion, complement,
//! normal order, prime form), and a just-intonation engine that decomposes a
//! frequency ratio into a chain of tempered interval steps plus a comma
//! vector, rendered as an ordered sequence of accidental label tokens for a
//! host notation program.

pub mod collection;
pub mod custom_serde;
pub mod factor;
pub mod ji;
pub mod notation;
pub mod util;
