// Core moderation module - forbidden-word detection and the post lifecycle.

pub mod keyword_trie;
pub mod moderation_models;
pub mod moderation_service;

pub use keyword_trie::KeywordTrie;
pub use moderation_models::*;
pub use moderation_service::*;
