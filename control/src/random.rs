//! Source of entropy, provided by the caller.

pub trait Random {
    /// Return a random number in range `<0, 1)`.
    fn normal(&mut self) -> f32;
}

/// Pick an item of `items` using the given source.
///
/// Returns `None` only if `items` is empty.
pub fn choose<'a, T>(items: &'a [T], random: &mut impl Random) -> Option<&'a T> {
    let last = items.len().checked_sub(1)?;
    let index = (random.normal() * items.len() as f32) as usize;
    items.get(index.min(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRandom(f32);

    impl Random for TestRandom {
        fn normal(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn it_spreads_choice_over_all_items() {
        let items = [1, 2, 3, 4];
        assert_eq!(choose(&items, &mut TestRandom(0.0)), Some(&1));
        assert_eq!(choose(&items, &mut TestRandom(0.3)), Some(&2));
        assert_eq!(choose(&items, &mut TestRandom(0.99)), Some(&4));
    }

    #[test]
    fn when_source_misbehaves_it_stays_within_bounds() {
        let items = [1, 2, 3, 4];
        assert_eq!(choose(&items, &mut TestRandom(1.0)), Some(&4));
        assert_eq!(choose(&items, &mut TestRandom(-3.0)), Some(&1));
    }

    #[test]
    fn when_there_is_nothing_to_choose_it_returns_none() {
        let items: [u8; 0] = [];
        assert_eq!(choose(&items, &mut TestRandom(0.5)), None);
    }
}
