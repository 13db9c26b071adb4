//! Named color tags for bodies
//!
//! Colors are opaque strings as far as the core is concerned; the render
//! sink decides what they mean. User-spawned bodies pick a random entry
//! from this palette.

use rand::seq::SliceRandom;

pub const PALETTE: &[&str] = &[
    "White", "Blue", "Red", "Yellow", "Orange", "Cyan", "Magenta", "Green",
];

/// Random palette color for a newly spawned body.
pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    // PALETTE is non-empty, choose cannot fail
    PALETTE.choose(&mut rng).copied().unwrap_or("White").to_string()
}
