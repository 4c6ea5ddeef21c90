use serde::{Deserialize, Serialize};

/// Longest duration that still counts as a "short" reset.
pub const SHORT_MAX_SECONDS: u32 = 180;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Calm,
    Ok,
    Stressed,
    Exhausted,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Calm, Mood::Ok, Mood::Stressed, Mood::Exhausted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Ok => "ok",
            Mood::Stressed => "stressed",
            Mood::Exhausted => "exhausted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Calm => "Calm",
            Mood::Ok => "OK",
            Mood::Stressed => "Stressed",
            Mood::Exhausted => "Exhausted",
        }
    }

    /// How regulated the state is, calm=4 down to exhausted=1.
    pub fn wellness_rank(&self) -> u8 {
        match self {
            Mood::Calm => 4,
            Mood::Ok => 3,
            Mood::Stressed => 2,
            Mood::Exhausted => 1,
        }
    }
}

impl TryFrom<&str> for Mood {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "calm" => Ok(Mood::Calm),
            "ok" | "okay" => Ok(Mood::Ok),
            "stressed" => Ok(Mood::Stressed),
            "exhausted" => Ok(Mood::Exhausted),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeBudget {
    #[serde(rename = "2m")]
    Short,
    #[serde(rename = "5m")]
    Long,
}

impl TimeBudget {
    pub const ALL: [TimeBudget; 2] = [TimeBudget::Short, TimeBudget::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBudget::Short => "2m",
            TimeBudget::Long => "5m",
        }
    }

    /// Spoken form used in reason text.
    pub fn spoken(&self) -> &'static str {
        match self {
            TimeBudget::Short => "2 minutes",
            TimeBudget::Long => "5 minutes",
        }
    }
}

impl TryFrom<&str> for TimeBudget {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "2m" | "2min" | "short" => Ok(TimeBudget::Short),
            "5m" | "5min" | "long" => Ok(TimeBudget::Long),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TimeBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Breathing,
    Movement,
    Mindset,
    Visual,
    Gratitude,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breathing => "breathing",
            Category::Movement => "movement",
            Category::Mindset => "mindset",
            Category::Visual => "visual",
            Category::Gratitude => "gratitude",
        }
    }
}

/// Count-based pacing cue for guided breathing practices.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreathingCue {
    pub inhale: Option<u8>,
    pub hold: Option<u8>,
    pub exhale: Option<u8>,
    pub rest: Option<u8>,
}

/// One entry of the static practice catalog. Immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practice {
    pub id: String,
    pub name: String,
    pub duration_seconds: u32,
    pub category: Category,
    pub tags: Vec<Mood>,
    pub summary: String,
    pub why_it_helps: String,
    pub steps: Vec<String>,
    pub cue: Option<BreathingCue>,
    /// Absent means the practice works for any budget.
    pub time_options: Option<Vec<TimeBudget>>,
}

impl Practice {
    pub fn matches_mood(&self, mood: Mood) -> bool {
        self.tags.contains(&mood)
    }

    /// Whether the authored time options admit the requested budget.
    pub fn supports_budget(&self, budget: TimeBudget) -> bool {
        match &self.time_options {
            Some(options) => options.contains(&budget),
            None => true,
        }
    }

    /// Duration ceiling: short resets stay at or under 180 s, long ones above.
    pub fn fits_budget(&self, budget: TimeBudget) -> bool {
        match budget {
            TimeBudget::Short => self.duration_seconds <= SHORT_MAX_SECONDS,
            TimeBudget::Long => self.duration_seconds > SHORT_MAX_SECONDS,
        }
    }
}
