// In-memory implementation of PostStore.
//
// Posts and appeals live only as long as the process. DashMap gives us
// per-call atomicity; the service's write lock serializes whole operations.

use crate::core::moderation::{Appeal, Post, PostStore, PostWrite, StoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Appeals are keyed by who appealed and which post.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct AppealKey {
    user_id: String,
    post_id: String,
}

pub struct InMemoryPostStore {
    /// post_id -> post
    posts: DashMap<String, Post>,
    appeals: DashMap<AppealKey, Appeal>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            appeals: DashMap::new(),
        }
    }

    fn insert_appeal(&self, appeal: Appeal) {
        let key = AppealKey {
            user_id: appeal.user_id.clone(),
            post_id: appeal.post_id.clone(),
        };
        self.appeals.insert(key, appeal);
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert_post(&self, post: Post) -> Result<(), StoreError> {
        match self.posts.entry(post.post_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(post.post_id)),
            Entry::Vacant(slot) => {
                slot.insert(post);
                Ok(())
            }
        }
    }

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(post_id).map(|entry| entry.value().clone()))
    }

    async fn commit(&self, write: PostWrite, appeal: Option<Appeal>) -> Result<(), StoreError> {
        // Neither map operation can fail, so applying them in sequence under
        // the service's write lock is all-or-nothing.
        match write {
            PostWrite::Save(post) => {
                self.posts.insert(post.post_id.clone(), post);
            }
            PostWrite::Remove(post_id) => {
                self.posts.remove(&post_id);
            }
        }
        if let Some(appeal) = appeal {
            self.insert_appeal(appeal);
        }
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save_appeal(&self, appeal: Appeal) -> Result<(), StoreError> {
        self.insert_appeal(appeal);
        Ok(())
    }

    async fn get_appeal(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<Option<Appeal>, StoreError> {
        let key = AppealKey {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
        };
        Ok(self.appeals.get(&key).map(|entry| entry.value().clone()))
    }

    async fn list_appeals(&self) -> Result<Vec<Appeal>, StoreError> {
        Ok(self
            .appeals
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::{AppealResolution, AppealStatus};

    #[tokio::test]
    async fn test_insert_rejects_duplicate() {
        let store = InMemoryPostStore::new();

        store
            .insert_post(Post::new("p1", "alice", "first", false))
            .await
            .unwrap();
        let result = store
            .insert_post(Post::new("p1", "bob", "second", true))
            .await;

        assert_eq!(result, Err(StoreError::AlreadyExists("p1".to_string())));
        let stored = store.get_post("p1").await.unwrap().unwrap();
        assert_eq!(stored.owner_id, "alice");
    }

    #[tokio::test]
    async fn test_commit_save_and_remove() {
        let store = InMemoryPostStore::new();
        let mut post = Post::new("p1", "alice", "hello", false);
        store.insert_post(post.clone()).await.unwrap();

        post.content = "edited".to_string();
        store.commit(PostWrite::Save(post), None).await.unwrap();
        assert_eq!(
            store.get_post("p1").await.unwrap().unwrap().content,
            "edited"
        );

        store
            .commit(PostWrite::Remove("p1".to_string()), None)
            .await
            .unwrap();
        assert!(store.get_post("p1").await.unwrap().is_none());
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_applies_appeal_with_post() {
        let store = InMemoryPostStore::new();
        store
            .insert_post(Post::new("p1", "alice", "bad", true))
            .await
            .unwrap();
        store.save_appeal(Appeal::pending("alice", "p1")).await.unwrap();

        let mut appeal = Appeal::pending("alice", "p1");
        appeal.status = AppealStatus::Resolved(AppealResolution::Rejected);
        store
            .commit(PostWrite::Remove("p1".to_string()), Some(appeal))
            .await
            .unwrap();

        assert!(store.get_post("p1").await.unwrap().is_none());
        assert_eq!(
            store.get_appeal("alice", "p1").await.unwrap().unwrap().status,
            AppealStatus::Resolved(AppealResolution::Rejected)
        );
    }

    #[tokio::test]
    async fn test_appeal_overwrite() {
        let store = InMemoryPostStore::new();

        store.save_appeal(Appeal::pending("alice", "p1")).await.unwrap();
        store.save_appeal(Appeal::pending("alice", "p1")).await.unwrap();
        store.save_appeal(Appeal::pending("alice", "p2")).await.unwrap();

        assert_eq!(store.list_appeals().await.unwrap().len(), 2);
        assert!(store.get_appeal("alice", "p1").await.unwrap().is_some());
        assert!(store.get_appeal("bob", "p1").await.unwrap().is_none());
    }
}
