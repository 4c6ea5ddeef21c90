//! End-to-end flow: commit a check-in from a recommendation, run the timer,
//! record the outcome, and confirm the next recommendation reflects it.

use chrono::{Duration, TimeZone, Utc};
use microreset::{
    analyze, catalog, recommend, validate_catalog, History, Mood, MoodCheckIn, Outcome,
    RecommendContext, ResetLog, Source, TimeBudget,
};

#[test]
fn committed_check_in_carries_the_recommended_practice() {
    validate_catalog(catalog()).unwrap();

    let ctx = RecommendContext {
        mood: Mood::Stressed,
        budget: TimeBudget::Short,
        on_shift: true,
    };
    let mut history = History::default();

    let rec = recommend(ctx, catalog(), Some(&analyze(&history)), 14).unwrap();
    assert_eq!(rec.source, Source::CatalogOrder);

    let at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 0).unwrap();
    let check_in_id = history.record_check_in(MoodCheckIn::new(
        ctx.mood,
        ctx.on_shift,
        ctx.budget,
        rec.primary.id.clone(),
        at,
    ));

    // Round-trip: the stored practice id equals the primary that produced it.
    let stored = history
        .check_ins
        .iter()
        .find(|ci| ci.id == check_in_id)
        .unwrap();
    assert_eq!(stored.practice_id, rec.primary.id);

    // Rotating to an alternate rebinds the check-in.
    let alternate = rec.alternates.first().unwrap();
    history.reassign_practice(&check_in_id, &alternate.id).unwrap();
    assert_eq!(history.check_ins[0].practice_id, alternate.id);
}

#[test]
fn recorded_outcome_feeds_back_into_the_next_ranking() {
    let ctx = RecommendContext {
        mood: Mood::Exhausted,
        budget: TimeBudget::Short,
        on_shift: false,
    };
    let mut history = History::default();
    let at = Utc.with_ymd_and_hms(2026, 3, 9, 7, 30, 0).unwrap();

    let check_in_id = history.record_check_in(MoodCheckIn::new(
        ctx.mood,
        ctx.on_shift,
        ctx.budget,
        "478-breathing",
        at,
    ));
    let reset_id = history
        .log_reset(ResetLog::new(
            "478-breathing",
            ctx.mood,
            ctx.budget,
            at,
            Some(at + Duration::seconds(150)),
            Some(check_in_id),
        ))
        .unwrap();
    history.record_outcome(&reset_id, Outcome::Better).unwrap();

    let patterns = analyze(&history);
    assert_eq!(patterns.sample_count, 1);
    assert_eq!(patterns.avg_improvement, 1.0);

    let rec = recommend(ctx, catalog(), Some(&patterns), 7).unwrap();
    assert_eq!(rec.source, Source::Personalized);
    assert_eq!(rec.primary.id, "478-breathing");
    assert!(rec.alternates.len() <= 2);
    assert!(rec
        .reason
        .contains("You selected Exhausted with about 2 minutes."));
}

#[test]
fn repeated_calls_never_mutate_the_snapshot() {
    let ctx = RecommendContext {
        mood: Mood::Ok,
        budget: TimeBudget::Short,
        on_shift: false,
    };
    let history = History::default();

    let first = recommend(ctx, catalog(), Some(&analyze(&history)), 10).unwrap();
    let second = recommend(ctx, catalog(), Some(&analyze(&history)), 10).unwrap();
    assert_eq!(first.primary.id, second.primary.id);
    assert_eq!(first.reason, second.reason);
    assert!(history.is_empty());
}
