//! Wire types for the subset of the Reddit API the channel speaks.

use serde::Deserialize;

use crate::channels::traits::Comment;

/// Author value Reddit reports for removed accounts.
const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
pub(super) struct MeResponse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Thing {
    pub kind: String,
    pub data: CommentData,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentData {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub created_utc: f64,
}

impl CommentData {
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn into_comment(self) -> Comment {
        let author = self
            .author
            .filter(|name| !name.is_empty() && name != DELETED_AUTHOR);

        Comment {
            id: self.id,
            body: self.body,
            author,
            channel: self.subreddit,
            permalink: self
                .permalink
                .map(|link| format!("https://www.reddit.com{link}")),
            created_utc: self.created_utc as i64,
        }
    }
}

impl Listing {
    /// Comments in the listing, oldest first.
    pub(super) fn into_comments(self) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .data
            .children
            .into_iter()
            .filter(|thing| thing.kind == "t1")
            .map(|thing| thing.data.into_comment())
            .collect();
        // Reddit lists newest first.
        comments.reverse();
        comments
    }
}

/// Response envelope of `POST /api/comment` with `api_type=json`.
#[derive(Debug, Deserialize)]
pub(super) struct CommentReplyResponse {
    pub json: CommentReplyJson,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentReplyJson {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"kind": "t1", "data": {"id": "c3", "body": "newest", "author": "carol",
                    "subreddit": "india", "permalink": "/r/india/comments/x/y/c3/", "created_utc": 1700000003.0}},
                {"kind": "t3", "data": {"id": "p1", "author": "op", "subreddit": "india"}},
                {"kind": "t1", "data": {"id": "c1", "body": "oldest", "author": "[deleted]",
                    "subreddit": "india", "created_utc": 1700000001.0}}
            ]
        }
    }"#;

    #[test]
    fn listing_yields_comments_oldest_first() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let comments = listing.into_comments();
        let ids: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn deleted_author_maps_to_none() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let comments = listing.into_comments();
        assert_eq!(comments[0].author, None);
        assert_eq!(comments[1].author.as_deref(), Some("carol"));
    }

    #[test]
    fn permalink_is_absolute() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let comments = listing.into_comments();
        assert_eq!(
            comments[1].permalink.as_deref(),
            Some("https://www.reddit.com/r/india/comments/x/y/c3/")
        );
        assert_eq!(comments[1].created_utc, 1_700_000_003);
        assert_eq!(comments[1].channel, "india");
    }

    #[test]
    fn token_error_body_deserializes() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"error": "invalid_grant"}"#).unwrap();
        assert!(token.access_token.is_none());
        assert_eq!(token.error.as_deref(), Some("invalid_grant"));
        assert_eq!(token.expires_in, 3600);
    }
}
