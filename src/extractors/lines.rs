// src/extractors/lines.rs

// --- Imports ---
use crate::extractors::section::SectionSpec;
use crate::report::models::{
    BlockRelation, FollowerRecord, HashtagCount, PostReaction, RankedPost, Recommendation,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// --- Line Patterns (Lazy Static) ---
// Anchored at line start. Counts are ASCII digits only, so a negative or
// fullwidth number never matches. Singular/plural suffixes are both accepted.

/// `Ana Torres: 12 seguidores`
pub static FOLLOWER_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?):\s*([0-9]+)\s*seguidor(?:es)?")
        .expect("Failed to compile FOLLOWER_LINE_RE")
});

/// `Post 3 (Ana): 10 likes, 2 dislikes`
pub static REACTION_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Post\s+([0-9]+).*?:\s*([0-9]+)\s*likes?,\s*([0-9]+)\s*dislikes?")
        .expect("Failed to compile REACTION_LINE_RE")
});

/// `1. "Hola, mundo!" - 10 likes`
pub static RANKED_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[0-9]+\.\s*"(.+?)"\s*-\s*([0-9]+)\s*likes?"#)
        .expect("Failed to compile RANKED_LINE_RE")
});

/// `#tech: 12 publicaciones`
pub static HASHTAG_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#\w+):\s*([0-9]+)\s*publicaci(?:ón|on)(?:es)?")
        .expect("Failed to compile HASHTAG_LINE_RE")
});

/// `Hashtag mas usado: #tech (12 veces)`, matched anywhere in the section.
pub static MOST_USED_HASHTAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Hashtag m[aá]s usado:\s*(#\w+)\s*\(([0-9]+)\s*ve(?:z|ces)\)")
        .expect("Failed to compile MOST_USED_HASHTAG_RE")
});

/// `Acme recomienda a: Globex`
pub static RECOMMENDATION_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*recomienda a:\s*(.+)$")
        .expect("Failed to compile RECOMMENDATION_LINE_RE")
});

/// A user heading inside the blocked list: a name ending in a bare colon.
pub static BLOCKING_USER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^\s\-*•].*?)\s*:\s*$").expect("Failed to compile BLOCKING_USER_RE")
});

/// One blocked entry: a bullet followed by the name.
pub static BLOCKED_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*•]\s*(.+?)\s*$").expect("Failed to compile BLOCKED_ENTRY_RE")
});

// --- Generic Extraction ---

/// Applies `pattern` to every line of `section`, keeping the records `build`
/// returns. Lines that do not match, or that `build` rejects, are skipped.
/// Record order follows line order.
pub fn extract_lines<T, F>(section: &str, pattern: &Regex, build: F) -> Vec<T>
where
    F: Fn(&Captures) -> Option<T>,
{
    section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match pattern.captures(line) {
            Some(caps) => build(&caps),
            None => {
                tracing::trace!("Skipping unmatched line: '{}'", line);
                None
            }
        })
        .collect()
}

/// Locates `spec` in the full report and extracts its records.
/// A missing section yields an empty vector.
pub fn extract_records<T, F>(text: &str, spec: &SectionSpec, pattern: &Regex, build: F) -> Vec<T>
where
    F: Fn(&Captures) -> Option<T>,
{
    let Some(section) = spec.locate(text) else {
        tracing::debug!("Section '{}' not found in report", spec.name);
        return Vec::new();
    };

    let records = extract_lines(section, pattern, build);
    tracing::debug!("Section '{}': {} records", spec.name, records.len());
    records
}

// --- Record Builders ---

/// Numeric capture as `u64`. `None` on overflow, which drops the line.
fn number(caps: &Captures, group: usize) -> Option<u64> {
    caps.get(group)?.as_str().parse().ok()
}

fn text(caps: &Captures, group: usize) -> Option<String> {
    let value = caps.get(group)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn follower(caps: &Captures) -> Option<FollowerRecord> {
    Some(FollowerRecord {
        name: text(caps, 1)?,
        follower_count: number(caps, 2)?,
    })
}

pub fn reaction(caps: &Captures) -> Option<PostReaction> {
    Some(PostReaction {
        post_id: number(caps, 1)?,
        likes: number(caps, 2)?,
        dislikes: number(caps, 3)?,
    })
}

pub fn ranked_post(caps: &Captures) -> Option<RankedPost> {
    Some(RankedPost {
        // Verbatim: quoted content is not trimmed or unescaped.
        text: caps.get(1)?.as_str().to_string(),
        likes: number(caps, 2)?,
    })
}

pub fn hashtag(caps: &Captures) -> Option<HashtagCount> {
    Some(HashtagCount {
        tag: text(caps, 1)?,
        count: number(caps, 2)?,
    })
}

pub fn recommendation(caps: &Captures) -> Option<Recommendation> {
    Some(Recommendation {
        recommender: text(caps, 1)?,
        recommended: text(caps, 2)?,
    })
}

// --- Special Cases ---

/// Finds the most-used hashtag line anywhere in the section.
pub fn most_used_hashtag(section: &str) -> Option<HashtagCount> {
    MOST_USED_HASHTAG_RE
        .captures(section)
        .and_then(|caps| hashtag(&caps))
}

/// Running state for the two-level blocked list.
#[derive(Debug, Default)]
struct BlockScan {
    current_user: Option<String>,
    relations: Vec<BlockRelation>,
}

impl BlockScan {
    fn feed(mut self, line: &str) -> Self {
        if let Some(caps) = BLOCKED_ENTRY_RE.captures(line) {
            match (&self.current_user, text(&caps, 1)) {
                (Some(user), Some(blocked)) => self.relations.push(BlockRelation {
                    blocker: user.clone(),
                    blocked,
                }),
                (None, _) => tracing::trace!("Dropping blocked entry with no user: '{}'", line),
                _ => {}
            }
        } else if let Some(user) = BLOCKING_USER_RE.captures(line).and_then(|c| text(&c, 1)) {
            self.current_user = Some(user);
        } else {
            // Unrelated lines keep the current user.
            tracing::trace!("Skipping unmatched line: '{}'", line);
        }
        self
    }
}

/// Rebuilds `blocker -> blocked` pairs from a list of user headings, each
/// followed by bulleted blocked names. Entries before the first heading are
/// dropped.
pub fn block_relations(section: &str) -> Vec<BlockRelation> {
    section
        .lines()
        .filter(|line| !line.trim().is_empty())
        .fold(BlockScan::default(), BlockScan::feed)
        .relations
}
