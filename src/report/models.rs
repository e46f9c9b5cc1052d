// src/report/models.rs
use serde::{Deserialize, Serialize};

// Aliases accept snapshots written by the older Spanish-keyed tooling
// (`resultados.json`), so those files load without re-running the program.

/// Follower tally for one person or organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerRecord {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "seguidores")]
    pub follower_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default, alias = "personas")]
    pub people: Vec<FollowerRecord>,
    #[serde(default, alias = "empresas")]
    pub organizations: Vec<FollowerRecord>,
}

/// Like/dislike totals for a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReaction {
    pub post_id: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// One entry of a "top 5" listing. The printed rank is not kept; position in
/// the sequence is the rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPost {
    #[serde(alias = "texto")]
    pub text: String,
    pub likes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPosts {
    #[serde(default, alias = "mas_likes")]
    pub most_liked: Vec<RankedPost>,
    #[serde(default, alias = "menos_likes")]
    pub least_liked: Vec<RankedPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    #[serde(alias = "hashtag")]
    pub tag: String,
    #[serde(alias = "cantidad")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtags {
    #[serde(default, alias = "conteo")]
    pub counts: Vec<HashtagCount>,
    /// Serialized as `null` when the report has no most-used line.
    #[serde(default, alias = "mas_usado")]
    pub most_used: Option<HashtagCount>,
}

/// `blocker` blocked `blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRelation {
    #[serde(alias = "usuario")]
    pub blocker: String,
    #[serde(alias = "bloqueado")]
    pub blocked: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(alias = "recomienda")]
    pub recommender: String,
    #[serde(alias = "recomendada")]
    pub recommended: String,
}

/// One complete snapshot of a report run.
///
/// Every field is always present; a section missing from the report is an
/// empty collection (or `None` for `hashtags.most_used`). `raw_text` is the
/// unmodified program output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, alias = "seguidores")]
    pub followers: Followers,
    #[serde(default, alias = "reacciones")]
    pub reactions: Vec<PostReaction>,
    #[serde(default)]
    pub top_posts: TopPosts,
    #[serde(default)]
    pub hashtags: Hashtags,
    #[serde(default, alias = "bloqueados")]
    pub blocked: Vec<BlockRelation>,
    #[serde(default, alias = "recomendaciones")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, alias = "output_raw")]
    pub raw_text: String,
}

impl ExtractionResult {
    /// Total number of structured records across every category.
    pub fn record_count(&self) -> usize {
        self.followers.people.len()
            + self.followers.organizations.len()
            + self.reactions.len()
            + self.top_posts.most_liked.len()
            + self.top_posts.least_liked.len()
            + self.hashtags.counts.len()
            + usize::from(self.hashtags.most_used.is_some())
            + self.blocked.len()
            + self.recommendations.len()
    }
}
