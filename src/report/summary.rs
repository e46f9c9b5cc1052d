// src/report/summary.rs
use std::collections::BTreeSet;
use std::fmt;

use crate::report::models::{ExtractionResult, FollowerRecord, HashtagCount};

/// Headline numbers for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub people: usize,
    pub organizations: usize,
    pub top_person: Option<FollowerRecord>,
    pub top_organization: Option<FollowerRecord>,
    pub posts: usize,
    /// Saturates at `u64::MAX`.
    pub total_likes: u64,
    pub hashtags: usize,
    pub most_used_hashtag: Option<HashtagCount>,
    pub blocked: usize,
    pub recommendations: usize,
    /// Distinct organizations on either side of a recommendation.
    pub organizations_recommending: usize,
}

/// Highest follower count; the earliest record wins a tie.
fn top(records: &[FollowerRecord]) -> Option<FollowerRecord> {
    records
        .iter()
        .fold(None::<&FollowerRecord>, |best, r| match best {
            Some(b) if b.follower_count >= r.follower_count => Some(b),
            _ => Some(r),
        })
        .cloned()
}

impl ReportSummary {
    pub fn from_result(result: &ExtractionResult) -> Self {
        let involved: BTreeSet<&str> = result
            .recommendations
            .iter()
            .flat_map(|r| [r.recommender.as_str(), r.recommended.as_str()])
            .collect();

        Self {
            people: result.followers.people.len(),
            organizations: result.followers.organizations.len(),
            top_person: top(&result.followers.people),
            top_organization: top(&result.followers.organizations),
            posts: result.reactions.len(),
            total_likes: result
                .reactions
                .iter()
                .fold(0u64, |total, p| total.saturating_add(p.likes)),
            hashtags: result.hashtags.counts.len(),
            most_used_hashtag: result.hashtags.most_used.clone(),
            blocked: result.blocked.len(),
            recommendations: result.recommendations.len(),
            organizations_recommending: involved.len(),
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "People: {}", self.people)?;
        if let Some(p) = &self.top_person {
            writeln!(f, "  top: {} ({} followers)", p.name, p.follower_count)?;
        }
        writeln!(f, "Organizations: {}", self.organizations)?;
        if let Some(o) = &self.top_organization {
            writeln!(f, "  top: {} ({} followers)", o.name, o.follower_count)?;
        }
        writeln!(f, "Posts: {} ({} likes total)", self.posts, self.total_likes)?;
        writeln!(f, "Hashtags: {}", self.hashtags)?;
        if let Some(h) = &self.most_used_hashtag {
            writeln!(f, "  most used: {} ({} times)", h.tag, h.count)?;
        }
        writeln!(f, "Blocked relations: {}", self.blocked)?;
        write!(
            f,
            "Recommendations: {} ({} organizations involved)",
            self.recommendations, self.organizations_recommending
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::{PostReaction, Recommendation};

    fn rec(name: &str, n: u64) -> FollowerRecord {
        FollowerRecord { name: name.into(), follower_count: n }
    }

    #[test]
    fn first_record_wins_follower_tie() {
        let records = vec![rec("Ana", 5), rec("Luis", 9), rec("Mar", 9)];
        assert_eq!(top(&records).map(|r| r.name), Some("Luis".to_string()));
        assert_eq!(top(&[]), None);
    }

    #[test]
    fn total_likes_saturates_instead_of_overflowing() {
        let mut result = ExtractionResult::default();
        result.reactions = vec![
            PostReaction { post_id: 1, likes: u64::MAX, dislikes: 0 },
            PostReaction { post_id: 2, likes: 1, dislikes: 0 },
        ];
        let summary = ReportSummary::from_result(&result);
        assert_eq!(summary.posts, 2);
        assert_eq!(summary.total_likes, u64::MAX);
    }

    #[test]
    fn summarizes_counts() {
        let mut result = ExtractionResult::default();
        result.followers.people = vec![rec("Ana", 5)];
        result.reactions = vec![
            PostReaction { post_id: 1, likes: 4, dislikes: 1 },
            PostReaction { post_id: 2, likes: 6, dislikes: 0 },
        ];
        result.recommendations = vec![
            Recommendation { recommender: "Acme".into(), recommended: "Globex".into() },
            Recommendation { recommender: "Globex".into(), recommended: "Acme".into() },
            Recommendation { recommender: "Initech".into(), recommended: "Acme".into() },
        ];

        let summary = ReportSummary::from_result(&result);
        assert_eq!(summary.people, 1);
        assert_eq!(summary.posts, 2);
        assert_eq!(summary.total_likes, 10);
        assert_eq!(summary.recommendations, 3);
        assert_eq!(summary.organizations_recommending, 3);
        assert!(summary.top_organization.is_none());

        let text = summary.to_string();
        assert!(text.contains("top: Ana (5 followers)"));
        assert!(text.contains("Posts: 2 (10 likes total)"));
    }
}
