//! Marquee banner above the grid
//!
//! Cosmetic layer: a fixed message revealed at a constant number of
//! characters per frame, with unrevealed positions filled by a placeholder
//! token. Wide emoji glyphs count as one logical character.

use crate::consts::BANNER_REVEAL_RATE;

pub const MESSAGE: &str = "🐤 FOLDY BIRD 🐤 flap to score";
pub const PLACEHOLDER: &str = "⬛";

/// How many characters of the message are visible at the given frame
pub fn reveal_len(frame: u32) -> usize {
    let revealed = (frame * BANNER_REVEAL_RATE) as usize;
    revealed.min(MESSAGE.chars().count())
}

/// Banner tokens for the given frame, one per logical character, padded
/// with placeholder tokens to the full message length.
pub fn marquee(frame: u32) -> Vec<String> {
    let revealed = reveal_len(frame);
    MESSAGE
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < revealed {
                c.to_string()
            } else {
                PLACEHOLDER.to_string()
            }
        })
        .collect()
}
