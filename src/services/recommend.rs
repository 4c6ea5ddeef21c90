//! Recommendation ranker: filters the catalog by mood and time budget,
//! scores candidates against the user's historical patterns, and builds the
//! reason text shown with the suggestion.

use std::cmp::Ordering;

use chrono::Timelike;
use serde::Serialize;

use crate::analytics::patterns::{UserPatterns, NEUTRAL_IMPROVEMENT};
use crate::content::CatalogError;
use crate::domain::practice::{Category, Mood, Practice, TimeBudget};

const PAIR_WEIGHT: f64 = 0.3;
const HOUR_WEIGHT: f64 = 0.1;
const PREFERRED_BONUS: f64 = 0.15;
const CATEGORY_BONUS: f64 = 0.1;
const DURATION_FIT_BONUS: f64 = 0.05;
const MAX_ALTERNATES: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct RecommendContext {
    pub mood: Mood,
    pub budget: TimeBudget,
    pub on_shift: bool,
}

/// How the primary was picked. `Fallback` is a degraded outcome and should
/// not be presented as a personalized match.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Personalized,
    CatalogOrder,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub primary: Practice,
    pub alternates: Vec<Practice>,
    pub reason: String,
    pub source: Source,
}

/// Ranks the catalog for the current request. `patterns` with no aggregated
/// resets is treated the same as no patterns at all, so an empty history can
/// never reorder the neutral path. `current_hour` is passed explicitly to
/// keep the ranker a pure function and must be a UTC hour, matching the
/// basis of the `hour_of_day` signal; see [`recommend_now`].
pub fn recommend(
    ctx: RecommendContext,
    practices: &[Practice],
    patterns: Option<&UserPatterns>,
    current_hour: u32,
) -> Result<Recommendation, CatalogError> {
    if practices.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    let signals = patterns.filter(|p| !p.is_empty());

    let eligible: Vec<&Practice> = practices
        .iter()
        .filter(|p| p.matches_mood(ctx.mood) && p.supports_budget(ctx.budget))
        .filter(|p| signals.is_none() || p.fits_budget(ctx.budget))
        .collect();

    if eligible.is_empty() {
        return fallback(ctx, practices);
    }

    let (ranked, source) = match signals {
        Some(signals) => {
            let mut scored: Vec<(f64, &Practice)> = eligible
                .iter()
                .map(|p| (score_practice(p, ctx, signals, current_hour), *p))
                .collect();
            // Stable sort: ties keep catalog order.
            scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
            for (score, practice) in &scored {
                tracing::debug!(practice = %practice.id, score, "scored candidate");
            }
            let ranked: Vec<&Practice> = scored.into_iter().map(|(_, p)| p).collect();
            (ranked, Source::Personalized)
        }
        None => (eligible, Source::CatalogOrder),
    };

    let Some((&primary, rest)) = ranked.split_first() else {
        return fallback(ctx, practices);
    };

    let mut alternates: Vec<Practice> = rest
        .iter()
        .take(MAX_ALTERNATES)
        .map(|p| (*p).clone())
        .collect();
    if source == Source::CatalogOrder && alternates.len() < MAX_ALTERNATES {
        // Pad with other budget-compatible practices so the user can still
        // rotate through options.
        for practice in practices {
            if alternates.len() >= MAX_ALTERNATES {
                break;
            }
            if practice.id != primary.id
                && practice.supports_budget(ctx.budget)
                && !alternates.iter().any(|a| a.id == practice.id)
            {
                alternates.push(practice.clone());
            }
        }
    }

    let reason = build_reason(ctx, primary, source == Source::Personalized);

    Ok(Recommendation {
        primary: primary.clone(),
        alternates,
        reason,
        source,
    })
}

/// Convenience wrapper using the current UTC hour, the same basis
/// [`analyze`](crate::analytics::patterns::analyze) keys `hour_of_day` by.
pub fn recommend_now(
    ctx: RecommendContext,
    practices: &[Practice],
    patterns: Option<&UserPatterns>,
) -> Result<Recommendation, CatalogError> {
    recommend(ctx, practices, patterns, chrono::Utc::now().hour())
}

fn score_practice(
    practice: &Practice,
    ctx: RecommendContext,
    signals: &UserPatterns,
    current_hour: u32,
) -> f64 {
    let mut score = NEUTRAL_IMPROVEMENT;

    if let Some(pair) = signals.effectiveness_for(&practice.id, ctx.mood) {
        score += pair * PAIR_WEIGHT;
    }

    let hour_signal = signals
        .hour_of_day
        .get(&current_hour)
        .copied()
        .unwrap_or(NEUTRAL_IMPROVEMENT);
    score += (hour_signal - NEUTRAL_IMPROVEMENT) * HOUR_WEIGHT;

    if signals.preferred_practices.iter().any(|id| *id == practice.id) {
        score += PREFERRED_BONUS;
    }

    let affinity = match ctx.mood {
        Mood::Stressed | Mood::Exhausted => {
            matches!(practice.category, Category::Breathing | Category::Mindset)
        }
        Mood::Calm | Mood::Ok => {
            matches!(practice.category, Category::Visual | Category::Gratitude)
        }
    };
    if affinity {
        score += CATEGORY_BONUS;
    }

    if practice.fits_budget(ctx.budget) {
        score += DURATION_FIT_BONUS;
    }

    score.clamp(0.0, 1.0)
}

fn build_reason(ctx: RecommendContext, primary: &Practice, personalized: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if ctx.on_shift {
        parts.push("You're on shift, so we picked something you can do between patients.".into());
    }
    if personalized {
        parts.push("This pick follows what has actually helped you before.".into());
    }
    parts.push(format!(
        "You selected {} with about {}.",
        ctx.mood.label(),
        ctx.budget.spoken()
    ));
    parts.push(primary.why_it_helps.clone());
    parts.join(" ")
}

/// Nothing matched both filters: serve the first budget-compatible practice
/// regardless of mood. A catalog with nothing compatible at all is fatal.
fn fallback(ctx: RecommendContext, practices: &[Practice]) -> Result<Recommendation, CatalogError> {
    let primary = practices
        .iter()
        .find(|p| p.supports_budget(ctx.budget))
        .ok_or(CatalogError::BudgetUncovered(ctx.budget))?;

    tracing::warn!(
        mood = %ctx.mood,
        budget = %ctx.budget,
        "no practice matches mood and budget, serving generic fallback"
    );

    let alternates = practices
        .iter()
        .filter(|p| p.id != primary.id)
        .take(MAX_ALTERNATES)
        .cloned()
        .collect();

    Ok(Recommendation {
        primary: primary.clone(),
        alternates,
        reason: format!(
            "A versatile reset that fits into your {} window.",
            ctx.budget.spoken()
        ),
        source: Source::Fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::patterns::analyze;
    use crate::content::catalog;
    use crate::domain::checkin::{MoodCheckIn, Outcome, ResetLog};
    use crate::history::History;
    use chrono::{TimeZone, Utc};

    fn ctx(mood: Mood, budget: TimeBudget) -> RecommendContext {
        RecommendContext {
            mood,
            budget,
            on_shift: false,
        }
    }

    fn practice(id: &str, duration: u32, category: Category, tags: Vec<Mood>) -> Practice {
        Practice {
            id: id.into(),
            name: id.into(),
            duration_seconds: duration,
            category,
            tags,
            summary: String::new(),
            why_it_helps: format!("{id} helps."),
            steps: vec![],
            cue: None,
            time_options: None,
        }
    }

    fn history_with_outcome(practice_id: &str, mood: Mood, outcome: Outcome) -> History {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut history = History::default();
        let ci_id = history.record_check_in(MoodCheckIn::new(
            mood,
            false,
            TimeBudget::Short,
            practice_id,
            at,
        ));
        let reset_id = history
            .log_reset(ResetLog::new(
                practice_id,
                mood,
                TimeBudget::Short,
                at,
                None,
                Some(ci_id),
            ))
            .unwrap();
        history.record_outcome(&reset_id, outcome).unwrap();
        history
    }

    #[test]
    fn no_history_keeps_catalog_order() {
        // Breathing 180 s before movement 150 s in catalog order, both
        // stressed-tagged, short window, no history.
        let practices = vec![
            practice("breathing", 180, Category::Breathing, vec![Mood::Stressed]),
            practice("movement", 150, Category::Movement, vec![Mood::Stressed]),
        ];
        let rec = recommend(ctx(Mood::Stressed, TimeBudget::Short), &practices, None, 9).unwrap();
        assert_eq!(rec.source, Source::CatalogOrder);
        assert_eq!(rec.primary.id, "breathing");
        assert_eq!(rec.alternates[0].id, "movement");
    }

    #[test]
    fn empty_patterns_match_the_no_history_ordering() {
        let empty = analyze(&History::default());
        let without = recommend(ctx(Mood::Stressed, TimeBudget::Short), catalog(), None, 9).unwrap();
        let with = recommend(
            ctx(Mood::Stressed, TimeBudget::Short),
            catalog(),
            Some(&empty),
            9,
        )
        .unwrap();
        assert_eq!(with.primary.id, without.primary.id);
        assert_eq!(
            with.alternates.iter().map(|p| &p.id).collect::<Vec<_>>(),
            without.alternates.iter().map(|p| &p.id).collect::<Vec<_>>()
        );
        assert_eq!(with.source, Source::CatalogOrder);
    }

    #[test]
    fn logged_better_outcome_ranks_practice_first() {
        // One "better" reset for 478-breathing under exhausted must beat an
        // otherwise-equal never-logged alternative.
        let history = history_with_outcome("478-breathing", Mood::Exhausted, Outcome::Better);
        let patterns = analyze(&history);
        let rec = recommend(
            ctx(Mood::Exhausted, TimeBudget::Short),
            catalog(),
            Some(&patterns),
            9,
        )
        .unwrap();
        assert_eq!(rec.source, Source::Personalized);
        assert_eq!(rec.primary.id, "478-breathing");
    }

    #[test]
    fn rank_is_monotone_in_pair_improvement() {
        let practices = vec![
            practice("a", 120, Category::Movement, vec![Mood::Stressed]),
            practice("b", 120, Category::Movement, vec![Mood::Stressed]),
        ];

        let rank_of_b = |outcome: Outcome| {
            let history = history_with_outcome("b", Mood::Stressed, outcome);
            let patterns = analyze(&history);
            let rec = recommend(
                ctx(Mood::Stressed, TimeBudget::Short),
                &practices,
                Some(&patterns),
                9,
            )
            .unwrap();
            let mut order = vec![rec.primary.id.clone()];
            order.extend(rec.alternates.iter().map(|p| p.id.clone()));
            order.iter().position(|id| id == "b").unwrap()
        };

        // Raising b's improvement from 0.0 to 1.0 must never demote it.
        assert!(rank_of_b(Outcome::Better) <= rank_of_b(Outcome::Same));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let history = history_with_outcome("box-breathing", Mood::Stressed, Outcome::Better);
        let patterns = analyze(&history);
        let first = recommend(
            ctx(Mood::Stressed, TimeBudget::Short),
            catalog(),
            Some(&patterns),
            14,
        )
        .unwrap();
        let second = recommend(
            ctx(Mood::Stressed, TimeBudget::Short),
            catalog(),
            Some(&patterns),
            14,
        )
        .unwrap();
        assert_eq!(first.primary.id, second.primary.id);
        assert_eq!(
            first.alternates.iter().map(|p| &p.id).collect::<Vec<_>>(),
            second.alternates.iter().map(|p| &p.id).collect::<Vec<_>>()
        );
        assert_eq!(first.reason, second.reason);
    }

    #[test]
    fn fallback_fires_exactly_when_no_practice_matches() {
        // Catalog without any calm-tagged practice.
        let practices = vec![
            practice("breathing", 120, Category::Breathing, vec![Mood::Stressed]),
            practice("movement", 150, Category::Movement, vec![Mood::Ok]),
        ];

        let rec = recommend(ctx(Mood::Calm, TimeBudget::Short), &practices, None, 9).unwrap();
        assert_eq!(rec.source, Source::Fallback);
        assert_eq!(rec.primary.id, "breathing");
        assert_eq!(rec.reason, "A versatile reset that fits into your 2 minutes window.");

        // A matching mood must not fall back.
        let rec = recommend(ctx(Mood::Ok, TimeBudget::Short), &practices, None, 9).unwrap();
        assert_ne!(rec.source, Source::Fallback);
    }

    #[test]
    fn no_budget_compatible_practice_is_fatal() {
        let mut short_only = practice("breathing", 120, Category::Breathing, vec![Mood::Stressed]);
        short_only.time_options = Some(vec![TimeBudget::Short]);
        let practices = vec![short_only];

        let err = recommend(ctx(Mood::Calm, TimeBudget::Long), &practices, None, 9).unwrap_err();
        assert_eq!(err, CatalogError::BudgetUncovered(TimeBudget::Long));

        assert_eq!(
            recommend(ctx(Mood::Calm, TimeBudget::Short), &[], None, 9).unwrap_err(),
            CatalogError::EmptyCatalog
        );
    }

    #[test]
    fn scored_path_enforces_the_duration_ceiling() {
        let practices = vec![
            practice("long-walk", 300, Category::Movement, vec![Mood::Stressed]),
            practice("quick-breath", 120, Category::Breathing, vec![Mood::Stressed]),
        ];
        let history = history_with_outcome("quick-breath", Mood::Stressed, Outcome::Better);
        let patterns = analyze(&history);

        let rec = recommend(
            ctx(Mood::Stressed, TimeBudget::Short),
            &practices,
            Some(&patterns),
            9,
        )
        .unwrap();
        assert_eq!(rec.primary.id, "quick-breath");
        assert!(rec.alternates.is_empty(), "300 s practice must not pass the short ceiling");
    }

    #[test]
    fn reason_text_parts_follow_the_fixed_order() {
        let rec = recommend(
            RecommendContext {
                mood: Mood::Stressed,
                budget: TimeBudget::Short,
                on_shift: true,
            },
            catalog(),
            None,
            9,
        )
        .unwrap();
        assert!(rec
            .reason
            .starts_with("You're on shift, so we picked something you can do between patients."));
        assert!(rec.reason.contains("You selected Stressed with about 2 minutes."));
        assert!(rec.reason.ends_with(&rec.primary.why_it_helps));

        let history = history_with_outcome("box-breathing", Mood::Stressed, Outcome::Better);
        let patterns = analyze(&history);
        let rec = recommend(
            ctx(Mood::Stressed, TimeBudget::Short),
            catalog(),
            Some(&patterns),
            9,
        )
        .unwrap();
        assert!(rec.reason.contains("This pick follows what has actually helped you before."));
    }

    #[test]
    fn alternates_are_capped_at_two() {
        let rec = recommend(ctx(Mood::Stressed, TimeBudget::Short), catalog(), None, 9).unwrap();
        assert!(rec.alternates.len() <= 2);
        assert!(rec.alternates.iter().all(|p| p.id != rec.primary.id));
    }
}
