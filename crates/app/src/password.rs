// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

//! Throwaway passwords for accounts created on a user's behalf.

use rand::seq::SliceRandom;
use rand::Rng;

/// Length of a temporary password.
pub const LENGTH: usize = 64;

/// Minimum number of uppercase letters in a temporary password.
pub const MIN_UPPERCASE: usize = 10;

/// Minimum number of digits in a temporary password.
pub const MIN_DIGITS: usize = 10;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random [LENGTH]-character alphanumeric password with at least
/// [MIN_UPPERCASE] uppercase letters and [MIN_DIGITS] digits.
///
/// Characters may repeat. Symbols are never used.
pub fn temporary_password() -> String {
    let mut rng = rand::rng();
    let mut chars = Vec::with_capacity(LENGTH);
    for (set, n) in [
        (UPPERCASE, MIN_UPPERCASE),
        (DIGITS, MIN_DIGITS),
        (ALPHANUMERIC, LENGTH - MIN_UPPERCASE - MIN_DIGITS),
    ] {
        chars.extend((0..n).map(|_| set[rng.random_range(0..set.len())]));
    }
    chars.shuffle(&mut rng);
    chars.into_iter().map(char::from).collect()
}
