//! Priority/frequency choice selection.
//!
//! Compiles an ordered list of situation ids from a mixed list of ids and
//! `#tag` references. Selection runs in five steps: tag expansion,
//! visibility filtering, a priority-tier walk against the minimum bound,
//! frequency-weighted sampling of the overflow tier against the maximum
//! bound, and a final display-order sort.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::Rng;
use rand::rngs::StdRng;

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::story::Story;

#[derive(Debug)]
struct Candidate {
    id: String,
    priority: i32,
    frequency: f64,
    display_order: i32,
}

/// Compile an ordered choice list.
///
/// `ids_or_tags` entries starting with `#` expand to every situation
/// carrying that tag; other entries name situations directly. After
/// dropping situations whose `can_view` refuses the current `host`,
/// priority tiers are committed from the highest priority down until
/// `min` is satisfied. If the result would exceed `max`, the lowest
/// committed tier is sampled down without replacement, weighted by each
/// situation's frequency. The final list is sorted by display order
/// (ties break on id).
///
/// Unknown plain ids are an error; unknown tags expand to nothing.
pub fn choose_situation_ids(
    story: &Story,
    character: &Character,
    host: Option<&str>,
    ids_or_tags: &[String],
    min: Option<usize>,
    max: Option<usize>,
    rng: &mut StdRng,
) -> CoreResult<Vec<String>> {
    // Tag expansion, deduplicated.
    let mut all_ids: BTreeSet<String> = BTreeSet::new();
    for entry in ids_or_tags {
        if let Some(tag) = entry.strip_prefix('#') {
            all_ids.extend(story.ids_with_tag(tag).iter().cloned());
        } else {
            if !story.contains(entry) {
                return Err(CoreError::SituationNotFound(entry.clone()));
            }
            all_ids.insert(entry.clone());
        }
    }

    // Visibility filter, capturing selection metadata.
    let mut viewable: Vec<Candidate> = Vec::new();
    for id in all_ids {
        let situation = story
            .get(&id)
            .ok_or_else(|| CoreError::SituationNotFound(id.clone()))?;
        if situation.can_view(character, host) {
            let meta = situation.meta();
            viewable.push(Candidate {
                id,
                priority: meta.priority,
                frequency: meta.frequency,
                display_order: meta.display_order,
            });
        }
    }

    // Descending priority; id order within a tier for determinism.
    viewable.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));

    // Walk tiers from the highest priority. Tiers are committed until the
    // minimum is satisfiable without the next one; the tier pending when
    // the walk stops is the overflow tier, subject to the maximum below.
    let mut committed: Vec<Candidate> = Vec::new();
    let mut pending: Vec<Candidate> = Vec::new();
    let mut last_priority: Option<i32> = None;
    for candidate in viewable {
        if last_priority != Some(candidate.priority) {
            if last_priority.is_some()
                && min.is_none_or(|m| committed.len() + pending.len() >= m)
            {
                break;
            }
            committed.append(&mut pending);
            last_priority = Some(candidate.priority);
        }
        pending.push(candidate);
    }
    let overflow = pending;

    // Maximum cutoff. The committed situations are needed to satisfy the
    // minimum; only the overflow tier is sampled.
    match max {
        Some(m) if committed.len() + overflow.len() > m => {
            let take = m.saturating_sub(committed.len());
            let mut keyed: Vec<(f64, Candidate)> = overflow
                .into_iter()
                .map(|c| (rng.random::<f64>() / c.frequency, c))
                .collect();
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            committed.extend(keyed.into_iter().take(take).map(|(_, c)| c));
        }
        _ => committed.extend(overflow),
    }

    // Presentation order.
    committed.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(committed.into_iter().map(|c| c.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::situation::{SimpleSituation, Situation, SituationMeta};
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn add_plain(story: &mut Story, id: &str, meta: SituationMeta) {
        story
            .add_situation(id, SimpleSituation::new(id, "").with_meta(meta))
            .unwrap();
    }

    fn choose(
        story: &Story,
        ids: &[&str],
        min: Option<usize>,
        max: Option<usize>,
    ) -> CoreResult<Vec<String>> {
        let entries: Vec<String> = ids.iter().map(|s| (*s).to_string()).collect();
        choose_situation_ids(
            story,
            &Character::new(),
            Some("host"),
            &entries,
            min,
            max,
            &mut rng(),
        )
    }

    /// A situation that is only viewable when the character has courage.
    struct Hidden;

    impl Situation for Hidden {
        fn can_view(&self, character: &Character, _host: Option<&str>) -> bool {
            character.quality_or_zero("courage") > 0.0
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        let story = Story::new("start");
        assert_eq!(choose(&story, &[], None, None).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let story = Story::new("start");
        let err = choose(&story, &["ghost"], None, None).unwrap_err();
        assert!(matches!(err, CoreError::SituationNotFound(_)));
    }

    #[test]
    fn unknown_tag_expands_to_nothing() {
        let story = Story::new("start");
        assert_eq!(
            choose(&story, &["#ghosts"], None, None).unwrap(),
            Vec::<String>::new()
        );
    }

    #[test]
    fn tags_expand_and_duplicates_collapse() {
        let mut story = Story::new("start");
        add_plain(&mut story, "glade", SituationMeta::new().with_tag("forest"));
        add_plain(&mut story, "thicket", SituationMeta::new().with_tag("forest"));

        // "glade" appears both directly and via the tag.
        let ids = choose(&story, &["glade", "#forest"], None, None).unwrap();
        assert_eq!(ids, ["glade", "thicket"]);
    }

    #[test]
    fn invisible_situations_are_filtered() {
        let mut story = Story::new("start");
        add_plain(&mut story, "road", SituationMeta::new());
        story.add_situation("lair", Hidden).unwrap();

        let entries = vec!["road".to_string(), "lair".to_string()];
        let ids = choose_situation_ids(
            &story,
            &Character::new(),
            Some("host"),
            &entries,
            None,
            None,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(ids, ["road"]);

        let mut brave = Character::new();
        brave.set_quality("courage", 1.0);
        let ids = choose_situation_ids(
            &story, &brave, Some("host"), &entries, None, None, &mut rng(),
        )
        .unwrap();
        assert_eq!(ids, ["lair", "road"]);
    }

    #[test]
    fn without_min_only_the_top_tier_is_kept() {
        let mut story = Story::new("start");
        add_plain(&mut story, "urgent", SituationMeta::new().with_priority(5));
        add_plain(&mut story, "urgent2", SituationMeta::new().with_priority(5));
        add_plain(&mut story, "mundane", SituationMeta::new().with_priority(1));

        let ids = choose(&story, &["urgent", "urgent2", "mundane"], None, None).unwrap();
        assert_eq!(ids, ["urgent", "urgent2"]);
    }

    #[test]
    fn min_pulls_in_lower_tiers() {
        let mut story = Story::new("start");
        add_plain(&mut story, "a", SituationMeta::new().with_priority(3));
        add_plain(&mut story, "b", SituationMeta::new().with_priority(2));
        add_plain(&mut story, "c", SituationMeta::new().with_priority(1));

        let ids = choose(&story, &["a", "b", "c"], Some(2), None).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"a".to_string()));
        assert!(ids.contains(&"b".to_string()));
    }

    #[test]
    fn min_larger_than_candidates_yields_all() {
        let mut story = Story::new("start");
        add_plain(&mut story, "a", SituationMeta::new().with_priority(2));
        add_plain(&mut story, "b", SituationMeta::new().with_priority(1));

        let ids = choose(&story, &["a", "b"], Some(10), None).unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn max_samples_the_overflow_tier() {
        let mut story = Story::new("start");
        for id in ["a", "b", "c", "d"] {
            add_plain(&mut story, id, SituationMeta::new());
        }

        let ids = choose(&story, &["a", "b", "c", "d"], None, Some(2)).unwrap();
        assert_eq!(ids.len(), 2);
        for id in &ids {
            assert!(["a", "b", "c", "d"].contains(&id.as_str()));
        }
    }

    #[test]
    fn max_zero_yields_empty() {
        let mut story = Story::new("start");
        add_plain(&mut story, "a", SituationMeta::new());
        assert!(choose(&story, &["a"], None, Some(0)).unwrap().is_empty());
    }

    #[test]
    fn committed_tiers_survive_max_sampling() {
        let mut story = Story::new("start");
        add_plain(&mut story, "top", SituationMeta::new().with_priority(9));
        for id in ["x", "y", "z"] {
            add_plain(&mut story, id, SituationMeta::new().with_priority(1));
        }

        // min=2 commits "top" and samples one of the low tier.
        let ids = choose(&story, &["top", "x", "y", "z"], Some(2), Some(2)).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"top".to_string()));
    }

    #[test]
    fn high_frequency_wins_more_often() {
        let mut story = Story::new("start");
        add_plain(&mut story, "common", SituationMeta::new().with_frequency(100.0));
        add_plain(&mut story, "rare", SituationMeta::new().with_frequency(0.01));

        let entries = vec!["common".to_string(), "rare".to_string()];
        let mut rng = rng();
        let mut common_hits = 0;
        for _ in 0..200 {
            let ids = choose_situation_ids(
                &story,
                &Character::new(),
                None,
                &entries,
                None,
                Some(1),
                &mut rng,
            )
            .unwrap();
            if ids == ["common"] {
                common_hits += 1;
            }
        }
        // With a 10000:1 weight ratio the rare branch should be a fluke.
        assert!(common_hits > 190, "common chosen only {common_hits}/200 times");
    }

    #[test]
    fn output_sorted_by_display_order() {
        let mut story = Story::new("start");
        add_plain(&mut story, "last", SituationMeta::new().with_display_order(9));
        add_plain(&mut story, "first", SituationMeta::new().with_display_order(-1));
        add_plain(&mut story, "mid", SituationMeta::new().with_display_order(3));

        let ids = choose(&story, &["last", "first", "mid"], Some(3), None).unwrap();
        assert_eq!(ids, ["first", "mid", "last"]);
    }

    #[test]
    fn same_seed_same_sample() {
        let mut story = Story::new("start");
        for id in ["a", "b", "c", "d", "e"] {
            add_plain(&mut story, id, SituationMeta::new());
        }
        let first = choose(&story, &["a", "b", "c", "d", "e"], None, Some(2)).unwrap();
        let second = choose(&story, &["a", "b", "c", "d", "e"], None, Some(2)).unwrap();
        assert_eq!(first, second);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn build_story(metas: &[(i32, u8, i32)]) -> (Story, Vec<String>) {
            let mut story = Story::new("start");
            let mut entries = Vec::new();
            for (i, (priority, freq, display_order)) in metas.iter().enumerate() {
                let id = format!("s{i}");
                add_plain(
                    &mut story,
                    &id,
                    SituationMeta::new()
                        .with_priority(*priority)
                        .with_frequency(f64::from(*freq) + 0.5)
                        .with_display_order(*display_order),
                );
                entries.push(id);
            }
            (story, entries)
        }

        proptest! {
            #[test]
            fn bounds_and_order_hold(
                metas in prop::collection::vec((0i32..4, 0u8..4, 0i32..6), 0..12),
                min in prop::option::of(0usize..8),
                max_extra in prop::option::of(0usize..8),
                seed in 0u64..1000,
            ) {
                // Keep min <= max; the contract does not cover min > max.
                let max = max_extra.map(|m| m + min.unwrap_or(0));
                let (story, entries) = build_story(&metas);
                let mut rng = StdRng::seed_from_u64(seed);
                let ids = choose_situation_ids(
                    &story,
                    &Character::new(),
                    None,
                    &entries,
                    min,
                    max,
                    &mut rng,
                )
                .unwrap();

                // Never more than max.
                if let Some(m) = max {
                    prop_assert!(ids.len() <= m);
                }
                // At least min, when enough candidates exist.
                if let Some(m) = min {
                    prop_assert!(ids.len() >= m.min(entries.len()));
                }
                // Unique, and drawn from the candidate set.
                let unique: std::collections::BTreeSet<&String> = ids.iter().collect();
                prop_assert_eq!(unique.len(), ids.len());
                for id in &ids {
                    prop_assert!(entries.contains(id));
                }
                // Sorted by display order.
                let orders: Vec<i32> = ids
                    .iter()
                    .map(|id| story.get(id).unwrap().meta().display_order)
                    .collect();
                prop_assert!(orders.windows(2).all(|w| w[0] <= w[1]));
            }

            #[test]
            fn no_bounds_returns_exactly_the_top_tier(
                metas in prop::collection::vec((0i32..4, 0u8..4, 0i32..6), 1..12),
                seed in 0u64..1000,
            ) {
                let (story, entries) = build_story(&metas);
                let top = metas.iter().map(|(p, _, _)| *p).max().unwrap();
                let mut rng = StdRng::seed_from_u64(seed);
                let ids = choose_situation_ids(
                    &story,
                    &Character::new(),
                    None,
                    &entries,
                    None,
                    None,
                    &mut rng,
                )
                .unwrap();

                let expected = metas.iter().filter(|(p, _, _)| *p == top).count();
                prop_assert_eq!(ids.len(), expected);
                for id in &ids {
                    prop_assert_eq!(story.get(id).unwrap().meta().priority, top);
                }
            }
        }
    }
}
