//! Building a [`CrawlResponse`] from one backend's two query shapes.

use crate::config::MAX_MENTIONS_LIMIT;
use crate::types::{BackendResult, CrawlDebug, CrawlResponse, Mention, MentionEstimate, Source};

/// Keep at most `max` mentions (never more than the hard limit), in order.
pub fn truncate_mentions(mut mentions: Vec<Mention>, max: usize) -> Vec<Mention> {
    mentions.truncate(max.min(MAX_MENTIONS_LIMIT));
    mentions
}

/// Assemble a live response.
///
/// `bare` supplies the mentions; `restricted` and `estimate` supply the
/// mention volume and the debug block.
pub fn live_response(
    query: &str,
    source: Source,
    bare: BackendResult,
    restricted: &BackendResult,
    estimate: MentionEstimate,
    platform_site: &str,
    max_mentions: usize,
) -> CrawlResponse {
    CrawlResponse {
        query: query.to_owned(),
        timestamp: chrono::Utc::now(),
        last_7_days_mentions: estimate.value,
        mentions: truncate_mentions(bare.mentions, max_mentions),
        source,
        debug: Some(CrawlDebug {
            platform_site: platform_site.to_owned(),
            platform_hits: restricted.mentions.len(),
            platform_total_count: restricted.total_count,
            estimate_kind: estimate.kind,
        }),
        note: None,
    }
}
