use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

/// Source of filler topics. Only consulted when the caller's lists are empty
/// or a week needs an extra topic, so plans are reproducible once this is pinned.
pub trait TopicSampler {
    /// Up to `count` distinct topics from `pool`
    fn sample(&mut self, pool: &[&str], count: usize) -> Vec<String>;

    /// One topic from `pool` that is not in `exclude`
    fn pick_excluding(&mut self, pool: &[&str], exclude: &[String]) -> Option<String>;
}

pub struct RandomSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSampler<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(thread_rng())
    }
}

impl RandomSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TopicSampler for RandomSampler<R> {
    fn sample(&mut self, pool: &[&str], count: usize) -> Vec<String> {
        pool.choose_multiple(&mut self.rng, count)
            .map(|t| t.to_string())
            .collect()
    }

    fn pick_excluding(&mut self, pool: &[&str], exclude: &[String]) -> Option<String> {
        let available: Vec<&str> = pool
            .iter()
            .copied()
            .filter(|t| !exclude.iter().any(|e| e == t))
            .collect();
        available.choose(&mut self.rng).map(|t| t.to_string())
    }
}

/// Deterministic sampler: walks the pool in catalog order, continuing
/// where the previous call stopped.
#[derive(Debug, Default, Clone)]
pub struct OrderedSampler {
    cursor: usize,
}

impl OrderedSampler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopicSampler for OrderedSampler {
    fn sample(&mut self, pool: &[&str], count: usize) -> Vec<String> {
        if pool.is_empty() {
            return vec![];
        }
        let take = count.min(pool.len());
        let start = self.cursor % pool.len();
        self.cursor = self.cursor.wrapping_add(take);
        pool.iter()
            .cycle()
            .skip(start)
            .take(take)
            .map(|t| t.to_string())
            .collect()
    }

    fn pick_excluding(&mut self, pool: &[&str], exclude: &[String]) -> Option<String> {
        if pool.is_empty() {
            return None;
        }
        let start = self.cursor % pool.len();
        let picked = pool.iter()
            .cycle()
            .skip(start)
            .take(pool.len())
            .find(|t| !exclude.iter().any(|e| e == *t))
            .map(|t| t.to_string());
        self.cursor = self.cursor.wrapping_add(1);
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: &[&str] = &["a", "b", "c", "d"];

    #[test]
    fn random_sample_is_distinct_and_bounded() {
        let mut sampler = RandomSampler::seeded(7);
        let picked = sampler.sample(POOL, 3);
        assert_eq!(picked.len(), 3);
        let mut dedup = picked.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 3);

        assert_eq!(sampler.sample(POOL, 10).len(), POOL.len());
    }

    #[test]
    fn same_seed_same_topics() {
        let a = RandomSampler::seeded(42).sample(POOL, 2);
        let b = RandomSampler::seeded(42).sample(POOL, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn pick_excluding_skips_existing() {
        let mut sampler = RandomSampler::seeded(1);
        let exclude = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        for _ in 0..10 {
            assert_eq!(sampler.pick_excluding(POOL, &exclude).as_deref(), Some("d"));
        }
        let all: Vec<String> = POOL.iter().map(|t| t.to_string()).collect();
        assert_eq!(sampler.pick_excluding(POOL, &all), None);
    }

    #[test]
    fn ordered_sampler_rotates() {
        let mut sampler = OrderedSampler::new();
        assert_eq!(sampler.sample(POOL, 3), vec!["a", "b", "c"]);
        assert_eq!(sampler.sample(POOL, 2), vec!["d", "a"]);
        let exclude = vec!["b".to_string()];
        assert_eq!(sampler.pick_excluding(POOL, &exclude).as_deref(), Some("c"));
    }
}
