//! Synthetic demonstration data for when no live backend yields results.
//!
//! The response always has the same shape (10 mentions, a count in
//! `10..=59`, a `note`), so callers can rely on it; only the content is
//! randomized.

use crate::types::{CrawlResponse, Mention, Source};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of mentions in every synthetic response.
pub const SYNTHETIC_MENTIONS: usize = 10;

/// Explains to the caller that the data is not real.
pub const SYNTHETIC_NOTE: &str = "Using mock data due to search engine restrictions. \
    In production, consider using official APIs or headless browsers.";

const VERBS: &[&str] = &["announces", "launches", "reports", "reveals", "shares"];

const SUBJECTS: &[&str] = &[
    "new initiative",
    "quarterly results",
    "partnership",
    "innovation",
    "milestone",
];

/// Generate a synthetic response for `query` using the thread RNG.
pub fn generate(query: &str) -> CrawlResponse {
    generate_with(query, &mut rand::thread_rng())
}

/// Generate a synthetic response for `query` from `rng`.
pub fn generate_with<R: Rng>(query: &str, rng: &mut R) -> CrawlResponse {
    let mentions = (0..SYNTHETIC_MENTIONS)
        .filter_map(|i| {
            let verb = VERBS.choose(&mut *rng).copied().unwrap_or(VERBS[0]);
            let subject = SUBJECTS.choose(&mut *rng).copied().unwrap_or(SUBJECTS[0]);
            Mention::new(
                &format!("{query} {verb} {subject}"),
                &format!("https://example.com/article-{i}"),
                &format!(
                    "Recent coverage about {query} discussing their latest developments and \
                     industry impact. This article explores how {query} is shaping the future \
                     of technology and business..."
                ),
            )
        })
        .collect();

    CrawlResponse {
        query: query.to_owned(),
        timestamp: chrono::Utc::now(),
        last_7_days_mentions: rng.gen_range(10..60),
        mentions,
        source: Source::Mock,
        debug: None,
        note: Some(SYNTHETIC_NOTE.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn response_has_fixed_shape() {
        let response = generate("Acme Corp");
        assert_eq!(response.source, Source::Mock);
        assert_eq!(response.query, "Acme Corp");
        assert_eq!(response.mentions.len(), SYNTHETIC_MENTIONS);
        assert!((10..=59).contains(&response.last_7_days_mentions));
        assert!(response.note.is_some());
        assert!(response.debug.is_none());
    }

    #[test]
    fn mentions_combine_query_and_vocabulary() {
        let response = generate("Acme Corp");
        for (i, m) in response.mentions.iter().enumerate() {
            assert!(m.title.starts_with("Acme Corp "));
            assert!(VERBS.iter().any(|v| m.title.contains(v)));
            assert!(SUBJECTS.iter().any(|s| m.title.ends_with(s)));
            assert_eq!(m.link, format!("https://example.com/article-{i}"));
            assert!(m.snippet.contains("Acme Corp"));
        }
    }

    #[test]
    fn count_stays_in_range_across_seeds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let response = generate_with("x", &mut rng);
            assert!((10..=59).contains(&response.last_7_days_mentions));
        }
    }

    #[test]
    fn same_seed_same_content() {
        let a = generate_with("Acme", &mut StdRng::seed_from_u64(7));
        let b = generate_with("Acme", &mut StdRng::seed_from_u64(7));
        assert_eq!(a.mentions, b.mentions);
        assert_eq!(a.last_7_days_mentions, b.last_7_days_mentions);
    }

    #[test]
    fn shape_is_identical_between_calls() {
        let a = serde_json::to_value(generate("Acme Corp")).expect("serialize");
        let b = serde_json::to_value(generate("Acme Corp")).expect("serialize");

        let keys = |v: &serde_json::Value| {
            let mut k: Vec<String> = v
                .as_object()
                .map(|o| o.keys().cloned().collect())
                .unwrap_or_default();
            k.sort();
            k
        };
        assert_eq!(keys(&a), keys(&b));
        assert_eq!(
            a["mentions"].as_array().map(Vec::len),
            b["mentions"].as_array().map(Vec::len)
        );
        assert!(a["last7DaysMentions"].is_u64() && b["last7DaysMentions"].is_u64());
        assert_eq!(a["source"], "mock");
        assert!(a["note"].is_string());
    }
}
