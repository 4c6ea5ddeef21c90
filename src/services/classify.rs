//! Keyword-based mood classification for free-text descriptions. This is the
//! local heuristic the app falls back to when no language model is reachable;
//! it is a pure function with no hidden state.

use serde::Serialize;

use crate::domain::practice::Mood;

const MAX_CONFIDENCE: f64 = 0.95;

const EXHAUSTED_KEYWORDS: &[&str] = &[
    "tired", "exhausted", "drained", "burned out", "worn out", "depleted", "sapped", "fatigued",
    "sleepy", "drowsy", "gassed", "pooped", "beat", "washed up", "dead on my feet",
];
const STRESSED_KEYWORDS: &[&str] = &[
    "stressed", "overwhelmed", "pressure", "anxious", "worried", "panic", "tense", "frustrated",
    "irritated", "agitated", "antsy", "uptight", "keyed up", "worked up",
];
const OK_KEYWORDS: &[&str] = &[
    "okay", "fine", "alright", "manageable", "not bad", "surviving", "hanging in there",
    "chugging along", "muddling through", "coping", "holding up", "getting by",
];
const CALM_KEYWORDS: &[&str] = &[
    "calm", "peaceful", "relaxed", "content", "serene", "centered", "balanced", "at peace",
    "mellow", "easygoing", "chill", "laid back",
];

// Multi-word phrases carry more weight than single keywords.
const EXHAUSTED_PHRASES: &[&str] = &[
    "so tired", "too tired", "really drained", "completely done", "totally exhausted",
    "can barely keep", "struggling to stay awake", "running on empty", "need to sleep",
];
const STRESSED_PHRASES: &[&str] = &[
    "can't handle", "too much", "way too much", "don't know how to handle", "feeling behind",
    "falling behind", "falling apart", "breaking down", "at my limit", "reached my limit",
];
const OK_PHRASES: &[&str] = &[
    "hanging in", "doing ok", "making it", "getting through", "not terrible", "surprisingly well",
];
const CALM_PHRASES: &[&str] = &[
    "feeling centered", "feeling balanced", "at ease", "feeling good", "actually good",
    "pretty good",
];

// Clinical-workday vocabulary; on its own it usually signals stress.
const WORK_CONTEXT: &[&str] = &[
    "shift", "patients", "rounds", "charting", "consult", "code", "crisis", "emergency",
    "surgery", "procedure", "meeting", "conference", "admin", "paperwork",
];

const KEYWORD_WEIGHT: usize = 2;
const PHRASE_WEIGHT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct MoodGuess {
    pub mood: Mood,
    pub confidence: f64,
    pub reason: String,
}

fn first_hit<'a>(text: &str, terms: &[&'a str]) -> Option<&'a str> {
    terms.iter().find(|term| text.contains(**term)).copied()
}

fn hit_count(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(**term)).count()
}

fn descriptor(mood: Mood) -> &'static str {
    match mood {
        Mood::Exhausted => "exhaustion",
        Mood::Stressed => "stress",
        Mood::Calm => "calmness",
        Mood::Ok => "feeling okay",
    }
}

/// Maps a free-text mood description to the closest of the four mood values.
pub fn classify_mood(text: &str) -> MoodGuess {
    let lower = text.to_lowercase();

    let score_for = |keywords: &[&str], phrases: &[&str]| {
        hit_count(&lower, keywords) * KEYWORD_WEIGHT + hit_count(&lower, phrases) * PHRASE_WEIGHT
    };

    // Order matters: on a tie the heavier state wins.
    let scored = [
        (Mood::Exhausted, score_for(EXHAUSTED_KEYWORDS, EXHAUSTED_PHRASES)),
        (Mood::Stressed, score_for(STRESSED_KEYWORDS, STRESSED_PHRASES)),
        (Mood::Ok, score_for(OK_KEYWORDS, OK_PHRASES)),
        (Mood::Calm, score_for(CALM_KEYWORDS, CALM_PHRASES)),
    ];
    let (top_mood, top_score) = scored
        .into_iter()
        .fold((Mood::Ok, 0), |best, cand| {
            if cand.1 > best.1 {
                cand
            } else {
                best
            }
        });

    let work_hit = first_hit(&lower, WORK_CONTEXT);

    let (mood, confidence) = if top_score > 0 {
        (top_mood, (0.5 + top_score as f64 * 0.1).min(MAX_CONFIDENCE))
    } else if work_hit.is_some() {
        (Mood::Stressed, 0.6)
    } else {
        (Mood::Ok, 0.4)
    };

    let mut reason = if let Some(word) = first_hit(&lower, match mood {
        Mood::Exhausted => EXHAUSTED_KEYWORDS,
        Mood::Stressed => STRESSED_KEYWORDS,
        Mood::Ok => OK_KEYWORDS,
        Mood::Calm => CALM_KEYWORDS,
    }) {
        format!(
            "I noticed you mentioned feeling \"{word}\", which suggests you might be experiencing {}. ",
            descriptor(mood)
        )
    } else if let Some(phrase) = first_hit(&lower, match mood {
        Mood::Exhausted => EXHAUSTED_PHRASES,
        Mood::Stressed => STRESSED_PHRASES,
        Mood::Ok => OK_PHRASES,
        Mood::Calm => CALM_PHRASES,
    }) {
        format!(
            "Based on \"{phrase}\", you seem to be experiencing {}. ",
            descriptor(mood)
        )
    } else if let Some(word) = work_hit {
        format!("I sense work-related stress from your mention of \"{word}\". ")
    } else {
        format!("Based on the sentiment in your description, you seem to be feeling {mood}. ")
    };
    reason.push_str(&format!(
        "Would you like me to select \"{mood}\" as your current mood?"
    ));

    MoodGuess {
        mood,
        confidence,
        reason,
    }
}
