//! Interleaving merge of the collaborative and content-based sequences.

use std::collections::HashSet;

/// Merges two ranked id sequences by strict alternation, deduplicating and
/// stopping once `limit` ids are collected.
///
/// At each rank depth the collaborative id is considered before the content
/// id, so collaborative results win ties. Ids already emitted are skipped
/// without consuming a slot.
pub(crate) fn interleave(
    collaborative: &[String],
    content: &[String],
    limit: usize,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged: Vec<String> = Vec::new();

    let depth = collaborative.len().max(content.len());
    'merge: for i in 0..depth {
        for source in [collaborative.get(i), content.get(i)] {
            let Some(id) = source else { continue };
            if seen.insert(id.as_str()) {
                merged.push(id.clone());
            }
            if merged.len() >= limit {
                break 'merge;
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_strict_alternation_with_dedup() {
        let collaborative = ids(&["A", "B", "C"]);
        let content = ids(&["B", "D", "E"]);

        assert_eq!(
            interleave(&collaborative, &content, 5),
            ids(&["A", "B", "D", "C", "E"])
        );
    }

    #[test]
    fn test_limit_stops_mid_iteration() {
        let collaborative = ids(&["A", "B"]);
        let content = ids(&["C", "D"]);

        assert_eq!(interleave(&collaborative, &content, 3), ids(&["A", "C", "B"]));
        assert_eq!(interleave(&collaborative, &content, 1), ids(&["A"]));
    }

    #[test]
    fn test_uneven_sources_drain_the_longer_one() {
        let collaborative = ids(&["A"]);
        let content = ids(&["B", "C", "D"]);

        assert_eq!(
            interleave(&collaborative, &content, 10),
            ids(&["A", "B", "C", "D"])
        );
    }

    #[test]
    fn test_empty_sources_merge_empty() {
        assert!(interleave(&[], &[], 10).is_empty());

        let content = ids(&["A"]);
        assert_eq!(interleave(&[], &content, 10), ids(&["A"]));
    }

    #[test]
    fn test_never_exceeds_limit_or_duplicates() {
        let collaborative = ids(&["A", "B", "A", "C"]);
        let content = ids(&["A", "B", "C", "D"]);

        let merged = interleave(&collaborative, &content, 3);
        assert_eq!(merged.len(), 3);

        let unique: HashSet<&String> = merged.iter().collect();
        assert_eq!(unique.len(), merged.len());
    }
}
