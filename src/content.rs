//! Hand-authored practice catalog. Fixed at startup, never changes at runtime.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::practice::{BreathingCue, Category, Mood, Practice, TimeBudget};

/// The catalog is the one piece of static content the engine cannot run
/// without; these are the fatal configuration errors from its validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("practice catalog is empty")]
    EmptyCatalog,
    #[error("no practice is tagged for mood {0}")]
    MoodUnreachable(Mood),
    #[error("no practice is compatible with the {0} time budget")]
    BudgetUncovered(TimeBudget),
}

static PRACTICES: Lazy<Vec<Practice>> = Lazy::new(|| {
    vec![
        Practice {
            id: "box-breathing".into(),
            name: "Box Breathing".into(),
            duration_seconds: 120,
            category: Category::Breathing,
            tags: vec![Mood::Stressed, Mood::Exhausted, Mood::Ok],
            summary: "Steady four-count breathing to quickly calm the nervous system.".into(),
            why_it_helps: "Creates rhythmic balance between inhale, hold, exhale and rest to downshift stress hormones.".into(),
            steps: vec![
                "Inhale gently through the nose for 4 counts.".into(),
                "Hold the breath softly for 4 counts.".into(),
                "Exhale through the mouth for 4 counts.".into(),
                "Rest and notice the pause for 4 counts, then repeat.".into(),
            ],
            cue: Some(BreathingCue { inhale: Some(4), hold: Some(4), exhale: Some(4), rest: Some(4) }),
            time_options: Some(vec![TimeBudget::Short, TimeBudget::Long]),
        },
        Practice {
            id: "478-breathing".into(),
            name: "4-7-8 Breathing".into(),
            duration_seconds: 150,
            category: Category::Breathing,
            tags: vec![Mood::Exhausted, Mood::Stressed],
            summary: "Longer exhales to settle an overactive mind.".into(),
            why_it_helps: "Extending the exhale activates the parasympathetic response and eases tension.".into(),
            steps: vec![
                "Inhale quietly through the nose for 4 counts.".into(),
                "Hold gently for 7 counts.".into(),
                "Exhale audibly for 8 counts, letting the stress go.".into(),
                "Repeat 4 cycles, keeping shoulders soft.".into(),
            ],
            cue: Some(BreathingCue { inhale: Some(4), hold: Some(7), exhale: Some(8), rest: Some(0) }),
            time_options: Some(vec![TimeBudget::Short]),
        },
        Practice {
            id: "micro-stretch".into(),
            name: "Micro Stretch".into(),
            duration_seconds: 150,
            category: Category::Movement,
            tags: vec![Mood::Ok, Mood::Stressed, Mood::Exhausted],
            summary: "Neck and shoulder reset to release screen-time tension.".into(),
            why_it_helps: "Gentle movement boosts blood flow and reduces stiffness that feeds fatigue.".into(),
            steps: vec![
                "Roll shoulders back in slow circles x3, breathing with the motion.".into(),
                "Drop the right ear toward the shoulder, hold 10 seconds, switch sides.".into(),
                "Interlace fingers behind head, open chest, breathe into the ribs for 3 cycles.".into(),
            ],
            cue: None,
            time_options: Some(vec![TimeBudget::Short, TimeBudget::Long]),
        },
        Practice {
            id: "visual-reset".into(),
            name: "Visual Reset".into(),
            duration_seconds: 90,
            category: Category::Visual,
            tags: vec![Mood::Calm, Mood::Ok],
            summary: "Shift focus to distant gaze to relax eye and brain strain.".into(),
            why_it_helps: "Distance gazing relaxes ocular muscles and widens awareness beyond the chart.".into(),
            steps: vec![
                "Look out to a point 20+ feet away, soften your gaze.".into(),
                "Breathe slowly and notice color, light, and shape.".into(),
                "Blink gently and return with refreshed focus.".into(),
            ],
            cue: None,
            time_options: Some(vec![TimeBudget::Short]),
        },
        Practice {
            id: "mental-unload".into(),
            name: "Mental Unload".into(),
            duration_seconds: 120,
            category: Category::Mindset,
            tags: vec![Mood::Stressed, Mood::Exhausted],
            summary: "Slow counting scan to clear looping thoughts.".into(),
            why_it_helps: "Gives the mind a simple rhythmic task so cognitive overload can settle.".into(),
            steps: vec![
                "Close eyes or soften gaze and count breaths backwards from 10.".into(),
                "If thoughts intrude, warmly notice them and restart at 10.".into(),
                "End by naming one thing you're grateful to have handled today.".into(),
            ],
            cue: None,
            time_options: Some(vec![TimeBudget::Short]),
        },
        Practice {
            id: "gratitude-note".into(),
            name: "Gratitude Micro-note".into(),
            duration_seconds: 90,
            category: Category::Gratitude,
            tags: vec![Mood::Calm, Mood::Ok, Mood::Stressed],
            summary: "Jot one sentence about someone or something you value from today.".into(),
            why_it_helps: "Gratitude practices increase resilience and buffer against cynicism.".into(),
            steps: vec![
                "Take three easy breaths, notice what felt meaningful.".into(),
                "Write one sentence or say it aloud.".into(),
                "Let yourself feel the appreciation for a full breath.".into(),
            ],
            cue: None,
            time_options: Some(vec![TimeBudget::Short]),
        },
    ]
});

static LOOKUP: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    PRACTICES
        .iter()
        .enumerate()
        .map(|(idx, practice)| (practice.id.as_str(), idx))
        .collect()
});

/// The shipped catalog, in authoring order.
pub fn catalog() -> &'static [Practice] {
    &PRACTICES
}

pub fn practice_by_id(id: &str) -> Option<&'static Practice> {
    LOOKUP.get(id).map(|idx| &PRACTICES[*idx])
}

/// Checks the catalog invariants: every mood reachable under at least one
/// time budget, and every budget covered by at least one practice.
pub fn validate_catalog(practices: &[Practice]) -> Result<(), CatalogError> {
    if practices.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    for budget in TimeBudget::ALL {
        if !practices.iter().any(|p| p.supports_budget(budget)) {
            return Err(CatalogError::BudgetUncovered(budget));
        }
    }

    for mood in Mood::ALL {
        let reachable = practices.iter().any(|p| {
            p.matches_mood(mood) && TimeBudget::ALL.iter().any(|b| p.supports_budget(*b))
        });
        if !reachable {
            return Err(CatalogError::MoodUnreachable(mood));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_catalog_is_valid() {
        validate_catalog(catalog()).expect("shipped catalog must satisfy its invariants");
    }

    #[test]
    fn every_mood_has_a_short_option() {
        // The UI always offers the 2-minute window, so the short budget must
        // be able to serve every mood.
        for mood in Mood::ALL {
            assert!(
                catalog()
                    .iter()
                    .any(|p| p.matches_mood(mood) && p.supports_budget(TimeBudget::Short)),
                "no short practice for {mood}"
            );
        }
    }

    #[test]
    fn lookup_finds_known_ids() {
        assert_eq!(practice_by_id("478-breathing").map(|p| p.duration_seconds), Some(150));
        assert!(practice_by_id("nope").is_none());
    }

    #[test]
    fn empty_catalog_is_fatal() {
        assert_eq!(validate_catalog(&[]), Err(CatalogError::EmptyCatalog));
    }

    #[test]
    fn untagged_mood_is_reported() {
        let mut practices = catalog().to_vec();
        for practice in &mut practices {
            practice.tags.retain(|m| *m != Mood::Calm);
        }
        assert_eq!(
            validate_catalog(&practices),
            Err(CatalogError::MoodUnreachable(Mood::Calm))
        );
    }
}
