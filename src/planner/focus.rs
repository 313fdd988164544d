use crate::catalog::Catalog;
use crate::config::planner::FocusConfig;
use crate::planner::model::{FocusArea, Priority};
use crate::sampling::TopicSampler;

const FALLBACK_FOCUS_COUNT: usize = 4;

/// Position decides priority: the caller lists weakest topics first.
pub fn priority_for_index(index: usize) -> Priority {
    match index {
        0 | 1 => Priority::High,
        2 | 3 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Base hours by priority plus a bonus per full score-gap bucket.
/// A negative gap earns no bonus; the total saturates instead of overflowing.
pub fn hours_for_topic(priority: Priority, score_gap: f64, config: &FocusConfig) -> u32 {
    let base = match priority {
        Priority::High => config.high_hours,
        Priority::Medium => config.medium_hours,
        Priority::Low => config.low_hours,
    };
    if config.gap_bucket <= 0.0 {
        return base;
    }
    let buckets = (score_gap / config.gap_bucket).floor().max(0.0) as u32;
    base.saturating_add(buckets.saturating_mul(config.gap_bonus_hours))
}

pub fn build_focus_areas(
    weak_areas: &[String],
    current_score: f64,
    target_score: f64,
    catalog: &Catalog,
    config: &FocusConfig,
    sampler: &mut dyn TopicSampler,
) -> Vec<FocusArea> {
    let areas: Vec<String> = if weak_areas.is_empty() {
        sampler.sample(catalog.topics, FALLBACK_FOCUS_COUNT)
    } else {
        weak_areas.iter().take(config.max_areas).cloned().collect()
    };

    let gap = target_score - current_score;
    let count = areas.len();

    areas
        .into_iter()
        .enumerate()
        .map(|(index, topic)| {
            let priority = priority_for_index(index);
            let remaining = (count - index) as f64;
            FocusArea {
                topic,
                priority,
                current_level: config
                    .level_floor
                    .max(current_score - (index as f64 + 1.0) * config.level_step),
                target_level: target_score - (remaining - 1.0) * config.target_step,
                estimated_hours: hours_for_topic(priority, gap, config),
            }
        })
        .collect()
}
