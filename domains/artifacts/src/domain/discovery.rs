//! Featured ranking and name search over the full artifact list

use std::cmp::Ordering;

use crate::domain::entities::{artifact_name, like_count, Document};

/// Number of artifacts on the featured shelf
pub const FEATURED_LIMIT: usize = 6;

/// Top artifacts by like count, highest first.
///
/// Artifacts without a usable count rank below every counted one. The sort
/// is stable, so ties keep store order.
pub fn rank_featured(mut artifacts: Vec<Document>) -> Vec<Document> {
    artifacts.sort_by(|a, b| compare_likes_desc(like_count(a), like_count(b)));
    artifacts.truncate(FEATURED_LIMIT);
    artifacts
}

fn compare_likes_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lowercase and drop all whitespace
pub fn normalize_name(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Artifacts whose name contains `keyword`, ignoring case and whitespace
/// on both sides. Artifacts without a string name never match.
pub fn search_by_name(artifacts: Vec<Document>, keyword: &str) -> Vec<Document> {
    let needle = normalize_name(keyword);

    artifacts
        .into_iter()
        .filter(|doc| {
            artifact_name(doc)
                .map(|name| normalize_name(name).contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}
