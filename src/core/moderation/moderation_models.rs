// Moderation domain models - posts, appeals and the caller's role.
//
// These are pure domain types with no Discord dependencies.
// User IDs are plain strings; the Discord layer passes snowflakes as text.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// What a caller is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Moderator,
}

/// The authenticated identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: String,
    pub role: Role,
}

impl Account {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::User,
        }
    }

    pub fn moderator(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Moderator,
        }
    }

    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}

/// Moderation state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Safe,
    Flagged,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Safe => write!(f, "Safe"),
            PostStatus::Flagged => write!(f, "Flagged"),
        }
    }
}

/// A user-submitted text post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub post_id: String,
    pub owner_id: String,
    pub content: String,
    /// Recomputed from `content` on every write. Only a moderator approval
    /// clears it otherwise.
    pub flagged: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(
        post_id: impl Into<String>,
        owner_id: impl Into<String>,
        content: impl Into<String>,
        flagged: bool,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            owner_id: owner_id.into(),
            content: content.into(),
            flagged,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    pub fn status(&self) -> PostStatus {
        if self.flagged {
            PostStatus::Flagged
        } else {
            PostStatus::Safe
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post ID: {}\nContent: {}\nFlag Status: {}",
            self.post_id,
            self.content,
            self.status()
        )
    }
}

/// How a resolved appeal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppealResolution {
    /// A moderator approved the post.
    Approved,
    /// A moderator rejected (deleted) the post.
    Rejected,
    /// The owner deleted the post, or edited it until it was no longer flagged.
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppealStatus {
    Pending,
    Resolved(AppealResolution),
}

impl std::fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppealStatus::Pending => write!(f, "Pending"),
            AppealStatus::Resolved(AppealResolution::Approved) => write!(f, "Approved"),
            AppealStatus::Resolved(AppealResolution::Rejected) => write!(f, "Rejected"),
            AppealStatus::Resolved(AppealResolution::Withdrawn) => write!(f, "Withdrawn"),
        }
    }
}

/// A request by a post's owner to have a flagged post re-reviewed.
///
/// Keyed by `(user_id, post_id)`. The record outlives the post it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Appeal {
    pub user_id: String,
    pub post_id: String,
    pub status: AppealStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Appeal {
    pub fn pending(user_id: impl Into<String>, post_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            post_id: post_id.into(),
            status: AppealStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == AppealStatus::Pending
    }
}

/// Pending appeals grouped by the appealing user, users in sorted order.
pub type AppealsByUser = BTreeMap<String, Vec<Appeal>>;
