//! Push Keys
//!
//! Client-generated collection keys in the realtime database format:
//! 8 characters of millisecond timestamp followed by 12 random characters.
//! Keys sort in creation order, and keys from one generator never repeat.

use rand::Rng;

use crate::domain::TaskId;

/// Key alphabet, in ascending ASCII order
pub const PUSH_CHARS: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIMESTAMP_LEN: usize = 8;
const RANDOM_LEN: usize = 12;
const MAX_DIGIT: u8 = 63;

/// Generator for strictly increasing push keys
#[derive(Debug, Clone, Default)]
pub struct PushIdGenerator {
    last_time: u64,
    last_rand: [u8; RANDOM_LEN],
    primed: bool,
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next key for the given wall-clock time.
    ///
    /// Within one millisecond (or if the clock goes backwards) the random
    /// suffix of the previous key is incremented instead of regenerated.
    pub fn next_id<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> TaskId {
        if self.primed && now_ms <= self.last_time {
            if !self.increment_random() {
                self.last_time = self.last_time.saturating_add(1);
                self.fill_random(rng);
            }
        } else {
            self.last_time = now_ms;
            self.fill_random(rng);
        }
        self.primed = true;

        let mut key = String::with_capacity(TIMESTAMP_LEN + RANDOM_LEN);
        key.push_str(&encode_timestamp(self.last_time));
        key.extend(self.last_rand.iter().map(|&digit| push_char(digit)));
        TaskId::new(key)
    }

    fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for digit in self.last_rand.iter_mut() {
            *digit = rng.gen_range(0..=MAX_DIGIT);
        }
    }

    /// Add one to the random suffix; false when it was already all max digits
    fn increment_random(&mut self) -> bool {
        match self.last_rand.iter().rposition(|&digit| digit != MAX_DIGIT) {
            Some(pos) => {
                self.last_rand[pos] += 1;
                for digit in self.last_rand[pos + 1..].iter_mut() {
                    *digit = 0;
                }
                true
            }
            None => false,
        }
    }
}

fn push_char(digit: u8) -> char {
    char::from(PUSH_CHARS[usize::from(digit & MAX_DIGIT)])
}

fn encode_timestamp(mut millis: u64) -> String {
    let mut chars = [0u8; TIMESTAMP_LEN];
    for slot in chars.iter_mut().rev() {
        *slot = PUSH_CHARS[(millis % 64) as usize];
        millis /= 64;
    }
    chars.iter().map(|&c| char::from(c)).collect()
}

/// Recover the millisecond timestamp from a key's prefix
#[cfg(test)]
fn decode_timestamp(id: &TaskId) -> Option<u64> {
    let prefix = id.as_str().get(..TIMESTAMP_LEN)?;
    prefix.bytes().try_fold(0u64, |acc, byte| {
        let digit = PUSH_CHARS.iter().position(|&c| c == byte)?;
        Some(acc * 64 + digit as u64)
    })
}
