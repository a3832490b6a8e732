pub mod in_memory_post_store;
pub mod word_list_file;

pub use in_memory_post_store::InMemoryPostStore;
pub use word_list_file::load_keyword_trie;
