// src/extractors/aggregate.rs
use crate::extractors::lines::{self, *};
use crate::extractors::section::{self, SectionSpec};
use crate::report::models::{ExtractionResult, Followers, Hashtags, TopPosts};

/// Builds a complete snapshot from raw report text.
///
/// Each section is located independently in the full text, so a missing or
/// garbled section never affects another. Never fails; `raw_text` is always
/// carried through unchanged.
pub fn aggregate(raw_text: &str) -> ExtractionResult {
    tracing::info!("Extracting report ({} bytes)", raw_text.len());

    let result = ExtractionResult {
        followers: Followers {
            people: extract_records(raw_text, &section::PEOPLE, &FOLLOWER_LINE_RE, follower),
            organizations: extract_records(
                raw_text,
                &section::ORGANIZATIONS,
                &FOLLOWER_LINE_RE,
                follower,
            ),
        },
        reactions: extract_records(raw_text, &section::REACTIONS, &REACTION_LINE_RE, reaction),
        top_posts: TopPosts {
            most_liked: extract_records(raw_text, &section::MOST_LIKED, &RANKED_LINE_RE, ranked_post),
            least_liked: extract_records(raw_text, &section::LEAST_LIKED, &RANKED_LINE_RE, ranked_post),
        },
        hashtags: extract_hashtags(raw_text),
        blocked: with_section(raw_text, &section::BLOCKED, lines::block_relations),
        recommendations: extract_records(
            raw_text,
            &section::RECOMMENDATIONS,
            &RECOMMENDATION_LINE_RE,
            recommendation,
        ),
        raw_text: raw_text.to_string(),
    };

    let found = section::ALL_SECTIONS
        .iter()
        .filter(|spec| spec.locate(raw_text).is_some())
        .count();
    tracing::info!(
        "Extraction complete: {} records from {}/{} sections",
        result.record_count(),
        found,
        section::ALL_SECTIONS.len()
    );
    result
}

fn extract_hashtags(raw_text: &str) -> Hashtags {
    let Some(body) = section::HASHTAGS.locate(raw_text) else {
        tracing::debug!("Section '{}' not found in report", section::HASHTAGS.name);
        return Hashtags::default();
    };

    Hashtags {
        counts: extract_lines(body, &HASHTAG_LINE_RE, hashtag),
        most_used: most_used_hashtag(body),
    }
}

/// Runs a whole-section scan, or returns the empty default when absent.
fn with_section<T: Default>(raw_text: &str, spec: &SectionSpec, scan: fn(&str) -> T) -> T {
    match spec.locate(raw_text) {
        Some(body) => scan(body),
        None => {
            tracing::debug!("Section '{}' not found in report", spec.name);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_fully_populated_empty_result() {
        let result = aggregate("");
        assert_eq!(result, ExtractionResult::default());
        assert_eq!(result.record_count(), 0);
    }

    #[test]
    fn unrelated_text_is_kept_verbatim() {
        let raw = "Segmentation fault\n  (core dumped)\n";
        let result = aggregate(raw);
        assert_eq!(result.raw_text, raw);
        assert_eq!(result.record_count(), 0);
        assert!(result.hashtags.most_used.is_none());
    }

    #[test]
    fn missing_section_does_not_affect_others() {
        let raw = "\
ANALISIS DE HASHTAGS
Hashtag mas usado: #tech (12 veces)
#tech: 12 publicaciones
#gpu: 5 publicaciones
========================================
EMPRESAS QUE RECOMIENDAN
Acme recomienda a: Globex
";
        let result = aggregate(raw);
        assert!(result.followers.people.is_empty());
        assert!(result.blocked.is_empty());
        assert_eq!(result.hashtags.counts.len(), 2);
        assert_eq!(result.hashtags.most_used.as_ref().map(|h| h.tag.as_str()), Some("#tech"));
        assert_eq!(result.recommendations.len(), 1);
    }
}
