//! Admission checks applied to every incoming comment before a reply is
//! considered. The guard is stateless: a verdict depends only on the comment
//! and the configuration the guard was built from.

use crate::channels::traits::Comment;
use crate::config::Config;
use std::fmt;

/// Why a comment was refused, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    AuthorMissing,
    SelfAuthor,
    LikelyBotAuthor,
    BannedContent,
    TooShort,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            Self::AuthorMissing => "AUTHOR_MISSING",
            Self::SelfAuthor => "SELF_AUTHOR",
            Self::LikelyBotAuthor => "LIKELY_BOT_AUTHOR",
            Self::BannedContent => "BANNED_CONTENT",
            Self::TooShort => "TOO_SHORT",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl GuardVerdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn reason(self) -> Option<RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Decides whether an author name looks like another automated account.
pub trait AutomatedAuthorHeuristic: Send + Sync {
    fn is_likely_automated_author(&self, author: &str) -> bool;
}

/// Flags names containing "bot" (case-insensitive), minus exact exemptions.
///
/// Best effort only: "Abbott" is a false positive unless exempted, and a bot
/// named "roaster9000" slips through.
#[derive(Debug, Clone)]
pub struct BotNameHeuristic {
    exemptions: Vec<String>,
}

impl BotNameHeuristic {
    pub fn new<I, S>(exemptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exemptions: exemptions
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }
}

impl AutomatedAuthorHeuristic for BotNameHeuristic {
    fn is_likely_automated_author(&self, author: &str) -> bool {
        let lowered = author.to_lowercase();
        lowered.contains("bot") && !self.exemptions.iter().any(|e| *e == lowered)
    }
}

pub struct ContentGuard {
    bot_username: String,
    banned_terms: Vec<String>,
    min_body_chars: usize,
    heuristic: Box<dyn AutomatedAuthorHeuristic>,
}

impl ContentGuard {
    pub fn new<I, S>(bot_username: &str, banned_terms: I, min_body_chars: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bot_username: bot_username.to_string(),
            banned_terms: banned_terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            min_body_chars,
            heuristic: Box::new(BotNameHeuristic::new(["bottom"])),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.reddit.bot_username(),
            &config.safety.banned_keywords,
            config.safety.min_body_chars,
        )
        .with_heuristic(Box::new(BotNameHeuristic::new(
            &config.safety.bot_name_exemptions,
        )))
    }

    /// Swap the automated-author predicate.
    pub fn with_heuristic(mut self, heuristic: Box<dyn AutomatedAuthorHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Run all checks in order; the first failure wins.
    pub fn validate(&self, comment: &Comment) -> GuardVerdict {
        let Some(author) = comment.author.as_deref() else {
            return GuardVerdict::Rejected(RejectReason::AuthorMissing);
        };

        if author == self.bot_username {
            return GuardVerdict::Rejected(RejectReason::SelfAuthor);
        }

        if self.heuristic.is_likely_automated_author(author) {
            return GuardVerdict::Rejected(RejectReason::LikelyBotAuthor);
        }

        if self.contains_banned_term(&comment.body) {
            return GuardVerdict::Rejected(RejectReason::BannedContent);
        }

        if comment.body.trim().chars().count() < self.min_body_chars {
            return GuardVerdict::Rejected(RejectReason::TooShort);
        }

        GuardVerdict::Accepted
    }

    pub fn contains_banned_term(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.banned_terms.iter().any(|term| lowered.contains(term))
    }
}
