//! Random track picks for shuffle mode
//!
//! Shuffle does not reorder the playlist. Each step picks a random index,
//! rejecting the index that is currently playing.

use rand::Rng;

/// Pick a random index in `0..len`
///
/// With two or more tracks the pick never equals `previous`
/// (reject-and-resample). With a single track, index 0 is always accepted.
///
/// `len` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize, previous: Option<usize>) -> usize {
    debug_assert!(len > 0, "cannot pick from an empty playlist");

    if len == 1 {
        return 0;
    }

    loop {
        let candidate = rng.gen_range(0..len);
        if Some(candidate) != previous {
            return candidate;
        }
    }
}
