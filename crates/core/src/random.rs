/// Source of uniform random indices.
///
/// Question sampling and feedback synthesis draw all their randomness through
/// this trait so callers can swap in a deterministic source.
pub trait RandomSource {
    /// Returns a value in `0..upper`. `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Returns a value in `low..=high`.
    fn next_in_range(&mut self, low: u8, high: u8) -> u8 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let span = usize::from(high - low) + 1;
        let offset = self.next_index(span);
        // offset < span <= 256, and low + offset <= high
        low.saturating_add(u8::try_from(offset).unwrap_or(u8::MAX))
            .min(high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Replays a fixed list of values, wrapping each into the requested range.
///
/// Useful for asserting exact picks: a script of `[0, 3]` yields index 0, then
/// `3 % upper`, then starts over.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// A source that always returns the lowest value of every range.
    #[must_use]
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.script.is_empty() || upper == 0 {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_values_wrap_into_range() {
        let mut random = ScriptedRandom::new(vec![0, 7, 2]);
        assert_eq!(random.next_index(5), 0);
        assert_eq!(random.next_index(5), 2);
        assert_eq!(random.next_index(5), 2);
        assert_eq!(random.next_index(5), 0);
    }

    #[test]
    fn range_helper_stays_inclusive() {
        let mut low = ScriptedRandom::zeros();
        assert_eq!(low.next_in_range(60, 100), 60);

        let mut high = ScriptedRandom::new(vec![40]);
        assert_eq!(high.next_in_range(60, 100), 100);

        let mut wrapped = ScriptedRandom::new(vec![41]);
        assert_eq!(wrapped.next_in_range(60, 100), 60);
    }
}
