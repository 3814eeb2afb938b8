//! Lexicon-based headline polarity in [-1, 1].
//!
//! Each matched word contributes its weight, scaled by a directly preceding intensifier and
//! multiplied by -0.5 when a negation appears within the three preceding tokens. The headline
//! score is the mean over matched words; no matched words is neutral 0.

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "won't", "cannot", "can't", "hardly", "barely", "without",
];

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

fn word_polarity(word: &str) -> Option<f64> {
    let p = match word {
        "excellent" | "best" | "outstanding" => 1.0,
        "great" | "win" | "wins" | "stellar" => 0.8,
        "good" | "soar" | "soars" | "soaring" | "successful" => 0.7,
        "bullish" | "outperform" | "outperforms" | "surge" | "surges" | "optimistic" => 0.6,
        "beat" | "beats" | "rally" | "rallies" | "robust" | "upgrade" | "upgraded" => 0.5,
        "strong" | "stronger" | "boost" | "boosts" | "gain" | "gains" | "jump" | "jumps" => 0.4,
        "profit" | "profits" | "growth" | "grows" | "rise" | "rises" | "record" | "success"
        | "recovery" | "rebound" | "expansion" | "dividend" | "buyback" => 0.3,
        "higher" | "positive" | "upside" | "improves" | "improved" => 0.25,
        "high" | "steady" | "stable" => 0.15,
        "low" | "risk" | "risks" | "lower" => -0.2,
        "probe" | "concern" | "concerns" | "negative" | "resigns" | "headwind" => -0.3,
        "weak" | "weaker" | "decline" | "declines" | "drop" | "drops" | "fall" | "falls"
        | "miss" | "misses" | "poor" | "warning" | "layoffs" | "downside" => -0.4,
        "loss" | "losses" | "downgrade" | "downgraded" | "lawsuit" | "penalty" | "raid"
        | "disappoints" | "disappointing" => -0.5,
        "bearish" | "slump" | "slumps" | "default" | "defaults" | "underperform" => -0.6,
        "plunge" | "plunges" | "tumble" | "tumbles" | "bad" => -0.7,
        "crash" | "crashes" | "bankruptcy" | "collapse" | "collapses" => -0.8,
        "fraud" | "scam" | "insolvency" => -0.9,
        "worst" | "terrible" => -1.0,
        _ => return None,
    };
    Some(p)
}

fn intensity(word: &str) -> Option<f64> {
    match word {
        "extremely" | "hugely" => Some(1.5),
        "very" | "highly" | "sharply" => Some(1.3),
        "really" | "significantly" => Some(1.2),
        "somewhat" | "mildly" => Some(0.7),
        "slightly" | "marginally" => Some(0.5),
        _ => None,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn polarity(text: &str) -> f64 {
    let tokens = tokenize(text);
    let mut total = 0.0;
    let mut matched = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(mut p) = word_polarity(token) else {
            continue;
        };
        if let Some(m) = i.checked_sub(1).and_then(|j| intensity(&tokens[j])) {
            p *= m;
        }
        let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
        if window.iter().any(|w| NEGATION_WORDS.contains(&w.as_str())) {
            p *= NEGATION_FACTOR;
        }
        total += p.clamp(-1.0, 1.0);
        matched += 1;
    }

    if matched == 0 {
        0.0
    } else {
        (total / matched as f64).clamp(-1.0, 1.0)
    }
}
