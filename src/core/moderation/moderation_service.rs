// Moderation service - core business logic for the post lifecycle.
//
// This service handles:
// - Flagging posts whose content contains a forbidden word
// - Ownership checks on edit / delete / appeal
// - Moderator approve / reject and forbidden-word management
// - Appeal bookkeeping
//
// NO Discord dependencies here - just pure domain logic.

use super::keyword_trie::KeywordTrie;
use super::moderation_models::{Account, Appeal, AppealResolution, AppealStatus, AppealsByUser, Post};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::Mutex;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Post already exists: {0}")]
    AlreadyExists(String),

    /// Not produced by the in-memory store; reserved for fallible backends.
    #[allow(dead_code)]
    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ModerationError {
    #[error("A post with ID `{0}` already exists")]
    DuplicateId(String),

    #[error("You do not own post `{0}`")]
    NotOwner(String),

    #[error("Post `{0}` not found")]
    NotFound(String),

    #[error("`{0}` is not a forbidden word")]
    WordNotFound(String),

    #[error("Only moderators can do that")]
    NotModerator,

    #[error("Post `{0}` is not flagged")]
    NotFlagged(String),

    #[error("Post ID must not be empty")]
    InvalidPostId,

    #[error("Forbidden word must not be empty")]
    InvalidWord,

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// A change to a stored post.
#[derive(Debug, Clone, PartialEq)]
pub enum PostWrite {
    /// Overwrite an existing post.
    Save(Post),
    /// Remove the post with this ID.
    Remove(String),
}

/// Trait for holding posts and appeals.
///
/// The service serializes every mutation, so implementations only need each
/// individual call to be atomic.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post. Fails with `AlreadyExists` if the ID is taken.
    async fn insert_post(&self, post: Post) -> Result<(), StoreError>;

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>, StoreError>;

    /// Apply a post write together with an optional appeal update.
    /// Either both land or neither does.
    async fn commit(&self, write: PostWrite, appeal: Option<Appeal>) -> Result<(), StoreError>;

    /// All posts, in no particular order.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Insert or overwrite the appeal keyed by `(user_id, post_id)`.
    async fn save_appeal(&self, appeal: Appeal) -> Result<(), StoreError>;

    async fn get_appeal(&self, user_id: &str, post_id: &str)
        -> Result<Option<Appeal>, StoreError>;

    /// All appeals regardless of status, in no particular order.
    async fn list_appeals(&self) -> Result<Vec<Appeal>, StoreError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service owning the keyword trie and a post store.
pub struct ModerationService<S: PostStore> {
    store: S,
    /// Forbidden-word dictionary. Guards are never held across an `.await`.
    keywords: RwLock<KeywordTrie>,
    /// Held for the whole of every post/appeal mutation.
    write_lock: Mutex<()>,
}

impl<S: PostStore> ModerationService<S> {
    /// Create a new moderation service with an empty dictionary.
    #[cfg(test)]
    pub fn new(store: S) -> Self {
        Self::with_keywords(store, KeywordTrie::new())
    }

    /// Create a service with a pre-populated dictionary.
    pub fn with_keywords(store: S, keywords: KeywordTrie) -> Self {
        Self {
            store,
            keywords: RwLock::new(keywords),
            write_lock: Mutex::new(()),
        }
    }

    // A panic while holding the trie lock cannot leave it half-modified in a
    // way that breaks lookups, so poisoning is ignored.
    fn keywords(&self) -> RwLockReadGuard<'_, KeywordTrie> {
        self.keywords.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn keywords_mut(&self) -> RwLockWriteGuard<'_, KeywordTrie> {
        self.keywords.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_moderator(caller: &Account) -> Result<(), ModerationError> {
        if caller.is_moderator() {
            Ok(())
        } else {
            tracing::warn!(user_id = %caller.user_id, "Moderator action refused");
            Err(ModerationError::NotModerator)
        }
    }

    async fn require_post(&self, post_id: &str) -> Result<Post, ModerationError> {
        self.store
            .get_post(post_id)
            .await?
            .ok_or_else(|| ModerationError::NotFound(post_id.to_string()))
    }

    /// Post IDs are compared trimmed everywhere; a blank ID is invalid.
    fn normalize_post_id(post_id: &str) -> Result<&str, ModerationError> {
        let post_id = post_id.trim();
        if post_id.is_empty() {
            Err(ModerationError::InvalidPostId)
        } else {
            Ok(post_id)
        }
    }

    /// The owner's pending appeal on `post`, already marked resolved.
    /// Read before any write so the resolution can be committed with it.
    async fn resolved_appeal(
        &self,
        post: &Post,
        resolution: AppealResolution,
    ) -> Result<Option<Appeal>, ModerationError> {
        Ok(self
            .store
            .get_appeal(&post.owner_id, &post.post_id)
            .await?
            .filter(Appeal::is_pending)
            .map(|mut appeal| {
                appeal.status = AppealStatus::Resolved(resolution);
                appeal
            }))
    }

    async fn commit(
        &self,
        post_id: &str,
        write: PostWrite,
        appeal: Option<Appeal>,
    ) -> Result<(), ModerationError> {
        let resolved = appeal
            .as_ref()
            .map(|appeal| (appeal.user_id.clone(), appeal.status));

        self.store.commit(write, appeal).await?;

        if let Some((user_id, status)) = resolved {
            tracing::info!(%user_id, post_id, %status, "Appeal resolved");
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Post lifecycle
    // ------------------------------------------------------------------------

    /// Create a post, flagging it if it contains a forbidden word.
    pub async fn create_post(
        &self,
        caller: &Account,
        post_id: &str,
        content: &str,
    ) -> Result<Post, ModerationError> {
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        if self.store.get_post(post_id).await?.is_some() {
            tracing::warn!(post_id, user_id = %caller.user_id, "Duplicate post ID");
            return Err(ModerationError::DuplicateId(post_id.to_string()));
        }

        let flagged = self.keywords().contains_flagged_word(content);
        let post = Post::new(post_id, caller.user_id.as_str(), content, flagged);

        self.store
            .insert_post(post.clone())
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists(id) => ModerationError::DuplicateId(id),
                other => ModerationError::StorageError(other),
            })?;

        tracing::info!(post_id, user_id = %caller.user_id, flagged, "Post created");
        Ok(post)
    }

    /// Replace a post's content. Only the owner may edit; the flag is
    /// recomputed against the current dictionary.
    pub async fn edit_post(
        &self,
        caller: &Account,
        post_id: &str,
        content: &str,
    ) -> Result<Post, ModerationError> {
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        let mut post = self.require_post(post_id).await?;
        if !post.is_owned_by(&caller.user_id) {
            tracing::warn!(post_id, user_id = %caller.user_id, "Edit refused: not owner");
            return Err(ModerationError::NotOwner(post_id.to_string()));
        }

        let was_flagged = post.flagged;
        post.content = content.to_string();
        post.flagged = self.keywords().contains_flagged_word(content);
        post.edited_at = Some(Utc::now());

        let appeal = if was_flagged && !post.flagged {
            self.resolved_appeal(&post, AppealResolution::Withdrawn)
                .await?
        } else {
            None
        };
        self.commit(post_id, PostWrite::Save(post.clone()), appeal)
            .await?;

        tracing::info!(post_id, user_id = %caller.user_id, flagged = post.flagged, "Post edited");
        Ok(post)
    }

    /// Delete a post. Owners may delete their own posts; moderators may
    /// delete any post.
    pub async fn delete_post(&self, caller: &Account, post_id: &str) -> Result<(), ModerationError> {
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        let post = self.require_post(post_id).await?;
        let by_owner = post.is_owned_by(&caller.user_id);
        if !by_owner && !caller.is_moderator() {
            tracing::warn!(post_id, user_id = %caller.user_id, "Delete refused: not owner");
            return Err(ModerationError::NotOwner(post_id.to_string()));
        }

        let resolution = if by_owner {
            AppealResolution::Withdrawn
        } else {
            AppealResolution::Rejected
        };
        let appeal = self.resolved_appeal(&post, resolution).await?;
        self.commit(post_id, PostWrite::Remove(post_id.to_string()), appeal)
            .await?;

        tracing::info!(post_id, user_id = %caller.user_id, by_owner, "Post deleted");
        Ok(())
    }

    /// Ask for a flagged post to be re-reviewed. Overwrites any earlier
    /// appeal on the same post; does not change the flag.
    ///
    /// Only flagged posts can be appealed: a Safe post gives `NotFlagged`.
    pub async fn appeal_post(
        &self,
        caller: &Account,
        post_id: &str,
    ) -> Result<Appeal, ModerationError> {
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        let post = self.require_post(post_id).await?;
        if !post.is_owned_by(&caller.user_id) {
            tracing::warn!(post_id, user_id = %caller.user_id, "Appeal refused: not owner");
            return Err(ModerationError::NotOwner(post_id.to_string()));
        }
        if !post.flagged {
            return Err(ModerationError::NotFlagged(post_id.to_string()));
        }

        let appeal = Appeal::pending(caller.user_id.as_str(), post_id);
        self.store.save_appeal(appeal.clone()).await?;

        tracing::info!(post_id, user_id = %caller.user_id, "Appeal submitted");
        Ok(appeal)
    }

    // ------------------------------------------------------------------------
    // Moderator actions
    // ------------------------------------------------------------------------

    /// Clear the flag on a flagged post. Approving a post that is already
    /// safe is reported as `NotFlagged`.
    pub async fn approve_post(
        &self,
        caller: &Account,
        post_id: &str,
    ) -> Result<Post, ModerationError> {
        Self::require_moderator(caller)?;
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        let mut post = self.require_post(post_id).await?;
        if !post.flagged {
            return Err(ModerationError::NotFlagged(post_id.to_string()));
        }

        post.flagged = false;
        let appeal = self
            .resolved_appeal(&post, AppealResolution::Approved)
            .await?;
        self.commit(post_id, PostWrite::Save(post.clone()), appeal)
            .await?;

        tracing::info!(post_id, moderator_id = %caller.user_id, "Post approved");
        Ok(post)
    }

    /// Reject a post: delete it as a moderator. Safe posts are deleted too.
    pub async fn reject_post(&self, caller: &Account, post_id: &str) -> Result<(), ModerationError> {
        Self::require_moderator(caller)?;
        let post_id = Self::normalize_post_id(post_id)?;
        let _guard = self.write_lock.lock().await;

        let post = self.require_post(post_id).await?;
        if !post.flagged {
            tracing::warn!(post_id, "Rejecting a post that is not flagged");
        }

        let appeal = self
            .resolved_appeal(&post, AppealResolution::Rejected)
            .await?;
        self.commit(post_id, PostWrite::Remove(post_id.to_string()), appeal)
            .await?;

        tracing::info!(post_id, moderator_id = %caller.user_id, "Post rejected");
        Ok(())
    }

    /// Add a forbidden word. Returns `false` if it was already present.
    ///
    /// Existing posts are not re-scanned; their flag is recomputed on their
    /// next edit.
    pub fn add_forbidden_word(&self, caller: &Account, word: &str) -> Result<bool, ModerationError> {
        Self::require_moderator(caller)?;
        let word = word.trim();
        if word.is_empty() {
            return Err(ModerationError::InvalidWord);
        }

        let added = self.keywords_mut().insert(word);
        tracing::info!(word, added, moderator_id = %caller.user_id, "Forbidden word added");
        Ok(added)
    }

    pub fn remove_forbidden_word(
        &self,
        caller: &Account,
        word: &str,
    ) -> Result<(), ModerationError> {
        Self::require_moderator(caller)?;
        let word = word.trim();

        if self.keywords_mut().remove(word) {
            tracing::info!(word, moderator_id = %caller.user_id, "Forbidden word removed");
            Ok(())
        } else {
            Err(ModerationError::WordNotFound(word.to_string()))
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub async fn get_post(&self, post_id: &str) -> Result<Option<Post>, ModerationError> {
        let post_id = Self::normalize_post_id(post_id)?;
        Ok(self.store.get_post(post_id).await?)
    }

    /// All posts, oldest first.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, ModerationError> {
        let mut posts = self.store.list_posts().await?;
        posts.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.post_id.cmp(&b.post_id))
        });
        tracing::debug!(count = posts.len(), "Listing posts");
        Ok(posts)
    }

    pub async fn list_own_posts(&self, user_id: &str) -> Result<Vec<Post>, ModerationError> {
        let mut posts = self.list_all_posts().await?;
        posts.retain(|post| post.is_owned_by(user_id));
        Ok(posts)
    }

    pub async fn list_flagged_posts(&self) -> Result<Vec<Post>, ModerationError> {
        let mut posts = self.list_all_posts().await?;
        posts.retain(|post| post.flagged);
        Ok(posts)
    }

    /// Pending appeals grouped by user, each group oldest first.
    pub async fn list_appeals(&self) -> Result<AppealsByUser, ModerationError> {
        let mut grouped = AppealsByUser::new();
        for appeal in self.store.list_appeals().await? {
            if appeal.is_pending() {
                grouped.entry(appeal.user_id.clone()).or_default().push(appeal);
            }
        }
        for appeals in grouped.values_mut() {
            appeals.sort_by(|a, b| {
                a.submitted_at
                    .cmp(&b.submitted_at)
                    .then_with(|| a.post_id.cmp(&b.post_id))
            });
        }
        Ok(grouped)
    }

    pub fn list_forbidden_words(&self) -> Vec<String> {
        self.keywords().words()
    }

    pub fn forbidden_word_count(&self) -> usize {
        self.keywords().len()
    }

    /// Dry run: which forbidden words would flag this content?
    pub fn check_content(&self, content: &str) -> Vec<String> {
        self.keywords().flagged_tokens(content)
    }
}

// ============================================================================
// TESTS
// ============================================================================
