//! Free-text analysis response interpreter.
//!
//! Turns the service's natural-language answer into categorical facts via
//! keyword scanning over the lower-cased text. Total: any input, including
//! empty or malformed text, yields fully-populated facts with defaults.

use std::sync::OnceLock;

use regex::Regex;

use milkmob_models::{AnalysisFacts, MilkType, MomentKind};

/// Fallback moment timestamp when the response names none.
pub const DEFAULT_MOMENT_SECONDS: f64 = 3.0;

/// Milk variety keywords, first match wins.
const MILK_TYPE_KEYWORDS: &[(MilkType, &[&str])] = &[
    (MilkType::Chocolate, &["chocolate", "choco", "cocoa"]),
    (MilkType::Strawberry, &["strawberry", "pink milk"]),
    (MilkType::Regular, &["2%", "two percent", "whole milk", "regular", "white milk"]),
];

/// Activity categories, first match wins; unmatched falls back to "general".
const ACTIVITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("fitness", &["exercis", "working out", "workout", "gym", "lifting", "push-up", "pushup"]),
    ("dancing", &["danc"]),
    ("cooking", &["cooking", "cook", "baking", "recipe"]),
    ("relaxing", &["relax", "lounging"]),
];

/// Location categories, first match wins; unmatched falls back to "unknown".
const LOCATION_KEYWORDS: &[(&str, &[&str])] = &[
    ("gym", &["gym"]),
    ("kitchen", &["kitchen"]),
    ("studio", &["studio"]),
    ("outdoors", &["outdoor", "outside", "park", "beach", "street"]),
    ("bedroom", &["bedroom"]),
    ("home", &["home", "living room", "couch", "apartment"]),
];

/// Mood categories, first match wins; unmatched falls back to "casual".
const MOOD_KEYWORDS: &[(&str, &[&str])] = &[
    ("funny", &["funny", "laugh", "comedy", "humor", "hilarious", "joke"]),
    ("artistic", &["artistic", "creative", "aesthetic", "stylish"]),
    ("chill", &["chill", "calm", "cozy", "relaxed"]),
    ("energetic", &["energetic", "excited", "hype", "upbeat"]),
];

/// Beverages the analysis may name when milk is absent, used for the
/// quarantine explanation.
const OTHER_BEVERAGES: &[&str] = &[
    "water", "coke", "cola", "soda", "juice", "coffee", "tea", "beer", "smoothie", "lemonade",
];

fn drink_moment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:first sip|timestamp|sipping|sips|sip|drinking|drinks|drink|drank|gulp|pouring|pours|pour)[^0-9]{0,40}(\d+(?:\.\d+)?)",
        )
        .expect("drink moment pattern")
    })
}

fn audio_moment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"got milk[^0-9]{0,40}(\d+(?:\.\d+)?)").expect("audio moment pattern")
    })
}

fn display_moment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:visible|shown|appears|displayed|on screen|on-screen)[^0-9]{0,40}(\d+(?:\.\d+)?)",
        )
        .expect("display moment pattern")
    })
}

/// Interpret one free-text analysis response.
///
/// The milk-presence check is intentionally coarse: "yes" anywhere in the
/// text combined with "milk" or "dairy" anywhere counts as positive, even
/// when the "yes" answers a different question.
pub fn interpret(response_text: &str) -> AnalysisFacts {
    let text = response_text.to_lowercase();

    let milk_present =
        text.contains("yes") && (text.contains("milk") || text.contains("dairy"));

    let milk_type = MILK_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(ty, _)| *ty)
        .unwrap_or(MilkType::Regular);

    let (notable_moment_seconds, moment_kind) = find_moment(&text);

    AnalysisFacts {
        milk_present,
        milk_type,
        activity: scan_category(&text, ACTIVITY_KEYWORDS, "general"),
        location: scan_category(&text, LOCATION_KEYWORDS, "unknown"),
        mood: scan_category(&text, MOOD_KEYWORDS, "casual"),
        notable_moment_seconds: Some(notable_moment_seconds),
        moment_kind,
    }
}

/// Best-effort guess at what beverage the response describes instead of
/// milk, for the quarantine explanation.
pub fn guess_beverage(response_text: &str) -> Option<&'static str> {
    let text = response_text.to_lowercase();
    OTHER_BEVERAGES.iter().find(|b| text.contains(*b)).copied()
}

/// First matching category label, or the default.
fn scan_category(text: &str, table: &[(&'static str, &[&str])], default: &str) -> String {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(label, _)| label.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Locate the notable milk moment in the text.
///
/// Priority: a drinking action with a numeric token, then a spoken
/// "got milk" phrase, then a milk-on-screen mention. Without any numeric
/// evidence the fixed default stands in.
fn find_moment(text: &str) -> (f64, MomentKind) {
    if let Some(seconds) = capture_seconds(drink_moment_re(), text) {
        return (seconds, MomentKind::VisualDrinking);
    }
    if let Some(seconds) = capture_seconds(audio_moment_re(), text) {
        return (seconds, MomentKind::AudioPhrase);
    }
    if let Some(seconds) = capture_seconds(display_moment_re(), text) {
        return (seconds, MomentKind::VisualDisplay);
    }
    (DEFAULT_MOMENT_SECONDS, MomentKind::Default)
}

fn capture_seconds(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
