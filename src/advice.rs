//! Advisory rule engine
//!
//! This module derives human-readable advisories from a weather snapshot
//! and a caller-supplied context tag. The rule table is a static, ordered
//! list of independent predicate/message pairs: every rule is checked
//! exactly once per evaluation, matches are returned in declaration order,
//! and there is no deduplication. A rule whose tested field is missing
//! from the snapshot simply does not fire.

use crate::snapshot::WeatherSnapshot;

/// Usage contexts narrowing which situational rules are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// No particular activity
    General,
    /// Traveling or driving
    Travel,
    /// Commuting to work
    Work,
    /// Outdoor sports
    Sport,
    /// General outdoor activities
    Outdoor,
}

impl Context {
    /// Returns a slice containing all context variants.
    pub fn all() -> &'static [Context] {
        &[
            Context::General,
            Context::Travel,
            Context::Work,
            Context::Sport,
            Context::Outdoor,
        ]
    }

    /// Returns a human-readable display label for the context.
    pub fn label(&self) -> &'static str {
        match self {
            Context::General => "General",
            Context::Travel => "Travel",
            Context::Work => "Work",
            Context::Sport => "Sport",
            Context::Outdoor => "Outdoor",
        }
    }

    /// Parses user input into a Context.
    ///
    /// Matching is case-insensitive; "sports" is accepted as an alias for
    /// Sport. Returns `None` if the input doesn't match any context.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Context> {
        match s.to_lowercase().trim() {
            "general" => Some(Context::General),
            "travel" => Some(Context::Travel),
            "work" => Some(Context::Work),
            "sport" | "sports" => Some(Context::Sport),
            "outdoor" => Some(Context::Outdoor),
            _ => None,
        }
    }
}

/// One advisory rule: a predicate over the snapshot and context, and the
/// message emitted when it holds.
struct Rule {
    check: fn(&WeatherSnapshot, Context) -> bool,
    message: &'static str,
}

/// The fixed advisory rule table, in output order.
///
/// The two visibility rules intentionally overlap: below 0.5 km both the
/// low-visibility and dense-fog advisories fire.
static RULES: [Rule; 22] = [
    Rule {
        check: |s, _| s.temperature.is_some_and(|t| t < 0.0),
        message: "🥶 Very cold, wear multiple layers.",
    },
    Rule {
        check: |s, _| s.temperature.is_some_and(|t| (0.0..10.0).contains(&t)),
        message: "🧥 Cold, wear a jacket.",
    },
    Rule {
        check: |s, _| s.temperature.is_some_and(|t| t > 30.0),
        message: "🔥 Hot, wear light clothes and stay hydrated.",
    },
    Rule {
        check: |s, _| s.temperature.is_some_and(|t| t > 25.0 && t <= 30.0),
        message: "😎 Pleasant weather, wear light clothes.",
    },
    Rule {
        check: |s, _| s.rain_probability.is_some_and(|p| p > 70.0),
        message: "☔ High chance of rain, carry an umbrella or raincoat.",
    },
    Rule {
        check: |s, _| s.rain_probability.is_some_and(|p| p > 40.0 && p <= 70.0),
        message: "🌦️ Possible showers, be careful when going out.",
    },
    Rule {
        check: |s, _| {
            s.description
                .as_deref()
                .is_some_and(|d| d.contains("Snow") || d.contains("❄️"))
        },
        message: "❄️ Snowy, watch out for slippery surfaces.",
    },
    Rule {
        check: |s, _| s.cloud_cover.is_some_and(|c| c > 70.0),
        message: "☁️ Cloudy, low sunlight.",
    },
    Rule {
        check: |s, _| s.cloud_cover.is_some_and(|c| c < 30.0),
        message: "🌞 Clear sky, possible strong sunlight.",
    },
    Rule {
        check: |s, _| s.visibility.is_some_and(|v| v < 2.0),
        message: "🌫️ Low visibility, drive carefully.",
    },
    Rule {
        check: |s, _| s.visibility.is_some_and(|v| v < 0.5),
        message: "🚨 Dense fog, avoid long drives.",
    },
    Rule {
        check: |s, _| s.wind_speed.is_some_and(|w| w > 50.0),
        message: "💨 Very strong wind, avoid going out.",
    },
    Rule {
        check: |s, _| s.wind_speed.is_some_and(|w| w > 25.0 && w <= 50.0),
        message: "🍃 Strong wind, take precautions.",
    },
    Rule {
        check: |s, _| s.humidity.is_some_and(|h| h > 80.0),
        message: "💧 High humidity, may feel muggy.",
    },
    Rule {
        check: |s, c| c == Context::Travel && s.rain_probability.is_some_and(|p| p > 50.0),
        message: "🚗 Rainy, roads may be slippery while driving.",
    },
    Rule {
        check: |s, c| c == Context::Travel && s.temperature.is_some_and(|t| t > 32.0),
        message: "🧳 Bring extra water while traveling.",
    },
    Rule {
        check: |s, c| c == Context::Work && s.temperature.is_some_and(|t| t < 15.0),
        message: "💼 Cold, dress neatly for work.",
    },
    Rule {
        check: |s, c| c == Context::Work && s.cloud_cover.is_some_and(|v| v < 40.0),
        message: "☀️ Nice day, work will be more pleasant.",
    },
    Rule {
        check: |s, c| c == Context::Sport && s.temperature.is_some_and(|t| t > 30.0),
        message: "🏃 Avoid outdoor exercise at noon.",
    },
    Rule {
        check: |s, c| c == Context::Sport && s.wind_speed.is_some_and(|w| w > 30.0),
        message: "⚽ Strong wind, limit outdoor sports.",
    },
    Rule {
        check: |s, c| c == Context::Outdoor && s.rain_probability.is_some_and(|p| p > 50.0),
        message: "🌧️ Rainy, avoid outdoor activities.",
    },
    Rule {
        check: |s, c| c == Context::Outdoor && s.temperature.is_some_and(|t| t < 10.0),
        message: "🧥 Cold, wear warm clothes if going outside.",
    },
];

/// Evaluates the rule table against a snapshot and context.
///
/// Returns the messages of every matching rule, in table order. Never
/// fails; an all-null snapshot yields an empty list.
pub fn generate_advice(snapshot: &WeatherSnapshot, context: Context) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| (rule.check)(snapshot, context))
        .map(|rule| rule.message)
        .collect()
}
