use std::collections::HashMap;
use crate::catalog::Catalog;

/// Link returned when no catalog title is close enough
pub const FALLBACK_LINK: &str = "https://leetcode.com";

/// Minimum similarity ratio for a title to count as a match
pub const MATCH_CUTOFF: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub link: String,
    pub canonical_title: String,
    pub found: bool,
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Longest common block of a[alo..ahi] and b[blo..bhi] as (i, j, len).
/// Ties go to the earliest block in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let mut prev: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut current = HashMap::new();
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = j
                .checked_sub(1)
                .and_then(|p| prev.get(&p))
                .copied()
                .unwrap_or(0)
                + 1;
            current.insert(j, k);
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        prev = current;
    }

    best
}

/// Total size of the recursively found matching blocks
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Ratcliff/Obershelp similarity, `2 * matches / (len(a) + len(b))`, in [0, 1]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Find the catalog entry whose title best matches `query`.
/// Both sides are lowercased and trimmed; only a ratio of at least
/// MATCH_CUTOFF counts. Without a match the normalized query comes back
/// with FALLBACK_LINK and `found == false`.
pub fn find_by_fuzzy_title(query: &str, catalog: &Catalog) -> CatalogMatch {
    let normalized_query = normalize_title(query);

    let mut best: Option<(f64, String, usize)> = None;
    for (idx, entry) in catalog.entries().iter().enumerate() {
        let candidate = normalize_title(&entry.title);
        if candidate.is_empty() {
            continue;
        }
        // Candidate first: the ratio is not symmetric
        let score = similarity_ratio(&candidate, &normalized_query);
        if score < MATCH_CUTOFF {
            continue;
        }
        // Highest score wins; equal scores prefer the greater title
        let better = match &best {
            None => true,
            Some((best_score, best_title, _)) => {
                score > *best_score || (score == *best_score && candidate > *best_title)
            }
        };
        if better {
            best = Some((score, candidate, idx));
        }
    }

    match best {
        Some((score, _, idx)) => {
            let entry = &catalog.entries()[idx];
            tracing::debug!(query = %query, matched = %entry.title, score = score, "Catalog match");
            CatalogMatch {
                link: entry.link.clone(),
                canonical_title: entry.title.clone(),
                found: true,
            }
        }
        None => {
            tracing::debug!(query = %query, "No catalog match");
            CatalogMatch {
                link: FALLBACK_LINK.to_string(),
                canonical_title: normalized_query,
                found: false,
            }
        }
    }
}
