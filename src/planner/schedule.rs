use crate::catalog::Catalog;
use crate::config::planner::ScheduleConfig;
use crate::planner::model::{WeekKind, WeekPlan};
use crate::sampling::TopicSampler;

pub const REVIEW_TOPIC: &str = "Review of covered material";
pub const EXAM_PREP_TOPICS: [&str; 3] = ["Mock exam", "Error analysis", "Review of difficult topics"];
pub const DEEPENING_SUFFIX: &str = " (deepening)";

const MAX_WEEK_TOPICS: usize = 3;
const REVIEW_LOOKBACK: usize = 3;

/// Exam-prep beats review, review beats regular.
pub fn week_kind(week: u32, total_weeks: u32, config: &ScheduleConfig) -> WeekKind {
    if week > total_weeks.saturating_sub(config.exam_prep_weeks) {
        WeekKind::ExamPrep
    } else if is_review_number(week, config) {
        WeekKind::Review
    } else {
        WeekKind::Regular
    }
}

fn is_review_number(week: u32, config: &ScheduleConfig) -> bool {
    config.review_interval > 0 && week % config.review_interval == 0
}

/// Lay out weeks `1..=total_weeks`.
/// Weak areas cycle by week number; empty lists are replaced by catalog samples.
pub fn build_weekly_schedule(
    total_weeks: u32,
    weak_areas: &[String],
    strong_areas: &[String],
    catalog: &Catalog,
    config: &ScheduleConfig,
    sampler: &mut dyn TopicSampler,
) -> Vec<WeekPlan> {
    let weak = fallback_topics(weak_areas, 3, catalog, sampler);
    let strong = fallback_topics(strong_areas, 2, catalog, sampler);

    let mut schedule: Vec<WeekPlan> = Vec::with_capacity(total_weeks as usize);

    for week in 1..=total_weeks {
        let kind = week_kind(week, total_weeks, config);

        let (topics, goals, hours_required): (Vec<String>, Vec<String>, u32) = match kind {
            WeekKind::ExamPrep => (
                EXAM_PREP_TOPICS.iter().map(|t| t.to_string()).collect(),
                vec![
                    "Take a full mock exam".to_string(),
                    "Analyze and correct mistakes".to_string(),
                    "Revisit the hardest topics".to_string(),
                ],
                config.exam_prep_hours,
            ),
            WeekKind::Review => {
                let mut topics = vec![REVIEW_TOPIC.to_string()];
                topics.extend(sampler.sample(catalog.topics, 1));
                (
                    topics,
                    vec![
                        consolidation_goal(&schedule),
                        "Solve comprehensive mixed problems".to_string(),
                        "Take an interim test".to_string(),
                    ],
                    config.review_hours,
                )
            }
            WeekKind::Regular => regular_week(week, &weak, &strong, catalog, config, sampler),
        };

        let resources = resources_for_week(week, &topics, catalog, config);
        schedule.push(WeekPlan {
            week_number: week,
            kind,
            topics,
            goals,
            hours_required,
            resources,
        });
    }

    tracing::debug!(
        total_weeks,
        weak_count = weak.len(),
        strong_count = strong.len(),
        "Built weekly schedule"
    );
    schedule
}

fn fallback_topics(
    given: &[String],
    count: usize,
    catalog: &Catalog,
    sampler: &mut dyn TopicSampler,
) -> Vec<String> {
    if !given.is_empty() {
        return given.to_vec();
    }
    let sampled = sampler.sample(catalog.topics, count);
    tracing::debug!(subject = catalog.subject, sampled = ?sampled, "Substituted catalog topics");
    sampled
}

fn regular_week(
    week: u32,
    weak: &[String],
    strong: &[String],
    catalog: &Catalog,
    config: &ScheduleConfig,
    sampler: &mut dyn TopicSampler,
) -> (Vec<String>, Vec<String>, u32) {
    let index = (week as usize - 1) % weak.len().max(1);
    let primary = weak.get(index).cloned().unwrap_or_else(|| REVIEW_TOPIC.to_string());
    let mut topics = vec![primary.clone()];

    if week % 2 == 0 && !strong.is_empty() {
        let strong_topic = &strong[(week as usize - 1) % strong.len()];
        topics.push(format!("{}{}", strong_topic, DEEPENING_SUFFIX));
    }

    if config.extra_topic_interval > 0
        && week % config.extra_topic_interval == 0
        && topics.len() < MAX_WEEK_TOPICS
    {
        if let Some(extra) = sampler.pick_excluding(catalog.topics, &topics) {
            topics.push(extra);
        }
    }

    let goals = vec![
        format!("Master the topic \"{}\"", primary),
        "Solve 15+ practice problems".to_string(),
        "Take a topic test".to_string(),
        "Write summary notes of key points".to_string(),
    ];

    (topics, goals, config.regular_base_hours + week % 3)
}

fn consolidation_goal(schedule: &[WeekPlan]) -> String {
    let recent: Vec<&str> = schedule
        .iter()
        .rev()
        .take(REVIEW_LOOKBACK)
        .filter(|w| w.kind == WeekKind::Regular)
        .filter_map(|w| w.topics.first().map(String::as_str))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if recent.is_empty() {
        "Consolidate the material covered so far".to_string()
    } else {
        format!(
            "Consolidate the last {} weeks: {}",
            recent.len(),
            recent.join(", ")
        )
    }
}

/// Generic resources rotate per week and leave room for the topic-specific
/// entry and the review/late-week extras within `max_resources`.
pub fn resources_for_week(
    week: u32,
    topics: &[String],
    catalog: &Catalog,
    config: &ScheduleConfig,
) -> Vec<String> {
    let mut extras = Vec::new();
    if is_review_number(week, config) {
        extras.push("Comprehensive review problem set".to_string());
    }
    if week > config.late_week_threshold {
        extras.push("Advanced difficulty problems".to_string());
    }

    let generic_slots = config.max_resources.saturating_sub(1 + extras.len());
    let mut resources: Vec<String> = if catalog.resources.is_empty() {
        Vec::new()
    } else {
        let start = (week as usize - 1) % catalog.resources.len();
        catalog.resources
            .iter()
            .cycle()
            .skip(start)
            .take(generic_slots.min(catalog.resources.len()))
            .map(|r| r.to_string())
            .collect()
    };

    if let Some(first) = topics.first() {
        resources.push(format!("Topic practice set: \"{}\"", first));
    }
    resources.extend(extras);
    resources.truncate(config.max_resources);
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MATHEMATICS;
    use crate::sampling::OrderedSampler;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn kinds_follow_precedence() {
        let config = ScheduleConfig::default();
        let kinds: Vec<WeekKind> = (1..=8).map(|w| week_kind(w, 8, &config)).collect();
        assert_eq!(kinds, vec![
            WeekKind::Regular, WeekKind::Regular, WeekKind::Regular, WeekKind::Review,
            WeekKind::Regular, WeekKind::Regular, WeekKind::ExamPrep, WeekKind::ExamPrep,
        ]);
        // week 4 of a 4-week plan is exam prep, not review
        assert_eq!(week_kind(4, 4, &config), WeekKind::ExamPrep);
    }

    #[test]
    fn regular_weeks_cycle_weak_areas() {
        let config = ScheduleConfig::default();
        let weak = topics(&["A", "B"]);
        let strong = topics(&["S"]);
        let mut sampler = OrderedSampler::new();
        let schedule = build_weekly_schedule(12, &weak, &strong, &MATHEMATICS, &config, &mut sampler);

        assert_eq!(schedule[0].topics, topics(&["A"]));
        assert_eq!(schedule[1].topics, topics(&["B", "S (deepening)"]));
        assert_eq!(schedule[4].topics[0], "A");
        assert_eq!(&schedule[5].topics[..2], &topics(&["B", "S (deepening)"])[..]);
        // week 6 is even and a multiple of 3: primary, deepening, one extra
        assert_eq!(schedule[5].topics.len(), 3);
        assert_eq!(schedule[0].hours_required, 9);
        assert_eq!(schedule[1].hours_required, 10);
        assert_eq!(schedule[2].hours_required, 8);
    }

    #[test]
    fn review_goal_names_previous_weeks() {
        let config = ScheduleConfig::default();
        let weak = topics(&["A", "B", "C"]);
        let mut sampler = OrderedSampler::new();
        let schedule = build_weekly_schedule(8, &weak, &[], &MATHEMATICS, &config, &mut sampler);
        let review = &schedule[3];
        assert_eq!(review.kind, WeekKind::Review);
        assert_eq!(review.topics[0], REVIEW_TOPIC);
        assert_eq!(review.topics.len(), 2);
        assert_eq!(review.goals[0], "Consolidate the last 3 weeks: A, B, C");
        assert_eq!(review.hours_required, 10);
    }

    #[test]
    fn resources_make_room_for_extras() {
        let config = ScheduleConfig::default();
        let t = topics(&["Derivatives"]);

        let plain = resources_for_week(1, &t, &MATHEMATICS, &config);
        assert_eq!(plain.len(), 4);
        assert_eq!(plain[0], MATHEMATICS.resources[0]);
        assert_eq!(plain[3], "Topic practice set: \"Derivatives\"");

        let review = resources_for_week(4, &t, &MATHEMATICS, &config);
        assert_eq!(review.len(), 4);
        assert!(review.contains(&"Comprehensive review problem set".to_string()));

        let late_review = resources_for_week(12, &t, &MATHEMATICS, &config);
        assert_eq!(late_review.len(), 4);
        assert!(late_review.contains(&"Advanced difficulty problems".to_string()));
        assert!(late_review.contains(&"Comprehensive review problem set".to_string()));
        assert!(late_review.contains(&"Topic practice set: \"Derivatives\"".to_string()));
    }
}
