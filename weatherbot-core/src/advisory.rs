//! Keyword advisories appended to condition descriptions.

/// Checked top to bottom; the first row with a matching keyword wins, so
/// "thunderstorm with light rain" gets the umbrella advisory.
const RULES: &[(&[&str], &str)] = &[
    (&["rain", "drizzle"], "☔ Bring an umbrella!"),
    (&["storm", "thunder"], "⚡ Thunderstorm alert! Stay safe."),
    (&["snow"], "❄️ Snowfall ahead, dress warm."),
    (&["extreme", "tornado", "hurricane"], "🚨 Severe weather warning!"),
    (&["clear"], "😎 Clear skies today! Enjoy."),
];

/// Advisory for a condition description, or `""` when no rule matches.
pub fn advisory_for(description: &str) -> &'static str {
    let description = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| description.contains(k)))
        .map(|(_, advisory)| *advisory)
        .unwrap_or("")
}
