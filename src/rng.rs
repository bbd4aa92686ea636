//! Seedable xorshift64 generator
//!
//! A given seed replays the same spawn order and sparkle placement.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed would lock xorshift at zero, so it is bumped to one
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random value in `[0, upper_bound)`, 0 for an empty bound
    pub fn next_u64_below(&mut self, upper_bound: u64) -> u64 {
        match upper_bound {
            0 => 0,
            bound => self.next_u64() % bound,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        self.next_u64_below(u64::from(upper_bound)) as u32
    }

    /// Random index into a collection of `len` elements
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }
}
