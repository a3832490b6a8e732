// Keyword trie - the forbidden-word dictionary.
//
// Words are case-folded on the way in, content is split into word tokens
// and each token is looked up as a COMPLETE word. "cat" never matches
// "concatenate" or "cats": only a token that walks a full root-to-terminal
// path counts.

use std::collections::HashMap;

/// A single node in the trie.
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// A dictionary word ends at this node.
    terminal: bool,
}

/// Prefix tree holding the forbidden words.
///
/// Invariant: every non-root node either has children or is terminal.
/// `remove` prunes bottom-up to keep it that way.
#[derive(Debug, Default)]
pub struct KeywordTrie {
    root: TrieNode,
    len: usize,
}

/// Word characters are letters, digits and underscore; everything else splits tokens.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split content into lowercase word tokens.
pub fn tokenize(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

impl KeywordTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a word (lowercased). Returns `false` if it was already present.
    ///
    /// The empty string marks the root terminal. Tokenization never yields an
    /// empty token, so such an entry can never flag content.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut current = &mut self.root;
        for c in word.to_lowercase().chars() {
            current = current.children.entry(c).or_default();
        }

        if current.terminal {
            return false;
        }
        current.terminal = true;
        self.len += 1;
        true
    }

    /// Exact lookup of a single word (lowercased).
    #[cfg(test)]
    pub fn contains_word(&self, word: &str) -> bool {
        self.lookup(&word.to_lowercase())
    }

    /// Does any token of `content` exactly match a dictionary word?
    pub fn contains_flagged_word(&self, content: &str) -> bool {
        tokenize(content).any(|token| self.lookup(&token))
    }

    /// The distinct matching tokens of `content`, in order of first appearance.
    pub fn flagged_tokens(&self, content: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for token in tokenize(content) {
            if self.lookup(&token) && !found.contains(&token) {
                found.push(token);
            }
        }
        found
    }

    /// Remove a word (lowercased). Returns whether it was present.
    ///
    /// Nodes left with no children and no terminal marker are deleted on the
    /// way back up. Words sharing a prefix keep their nodes.
    pub fn remove(&mut self, word: &str) -> bool {
        let chars: Vec<char> = word.to_lowercase().chars().collect();

        // The root's own prune verdict is ignored: it is never deleted.
        let removed = Self::remove_from(&mut self.root, &chars).is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// All dictionary words, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len);
        let mut prefix = String::new();
        Self::collect(&self.root, &mut prefix, &mut out);
        out.sort();
        out
    }

    /// `token` must already be lowercase.
    fn lookup(&self, token: &str) -> bool {
        let mut current = &self.root;
        for c in token.chars() {
            match current.children.get(&c) {
                Some(next) => current = next,
                None => return false,
            }
        }
        current.terminal
    }

    /// Returns `None` if the word is not in this subtree, otherwise whether
    /// `node` itself has become prunable.
    fn remove_from(node: &mut TrieNode, chars: &[char]) -> Option<bool> {
        match chars.split_first() {
            None => {
                if !node.terminal {
                    return None;
                }
                node.terminal = false;
                Some(node.children.is_empty())
            }
            Some((c, rest)) => {
                let child = node.children.get_mut(c)?;
                let prune_child = Self::remove_from(child, rest)?;
                if prune_child {
                    node.children.remove(c);
                }
                Some(node.children.is_empty() && !node.terminal)
            }
        }
    }

    fn collect(node: &TrieNode, prefix: &mut String, out: &mut Vec<String>) {
        if node.terminal {
            out.push(prefix.clone());
        }
        for (c, child) in &node.children {
            prefix.push(*c);
            Self::collect(child, prefix, out);
            prefix.pop();
        }
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        fn count(node: &TrieNode) -> usize {
            1 + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_with(words: &[&str]) -> KeywordTrie {
        let mut trie = KeywordTrie::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    #[test]
    fn test_tokenize_splits_on_non_word_runs() {
        let tokens: Vec<String> = tokenize("Hello, World!! foo_bar--42").collect();
        assert_eq!(tokens, vec!["hello", "world", "foo_bar", "42"]);

        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("  ...!?  ").count(), 0);
    }

    #[test]
    fn test_standalone_token_matches_case_insensitively() {
        let trie = trie_with(&["Spam"]);

        assert!(trie.contains_flagged_word("spam"));
        assert!(trie.contains_flagged_word("Buy SPAM now"));
        assert!(trie.contains_flagged_word("(spam)"));
        assert!(trie.contains_flagged_word("this is spam."));
        assert!(!trie.contains_flagged_word("nothing to see here"));
        assert!(!trie.contains_flagged_word(""));
    }

    #[test]
    fn test_substring_and_prefix_do_not_match() {
        let trie = trie_with(&["cat"]);

        assert!(!trie.contains_flagged_word("concatenate"));
        assert!(!trie.contains_flagged_word("cats"));
        assert!(!trie.contains_flagged_word("ca"));
        // Underscore is a word character, so this is one token.
        assert!(!trie.contains_flagged_word("cat_food"));
        assert!(trie.contains_flagged_word("cat-food"));
    }

    #[test]
    fn test_remove_keeps_words_sharing_prefix() {
        let mut trie = trie_with(&["cat", "catalog"]);

        assert!(trie.remove("cat"));
        assert!(trie.contains_flagged_word("catalog"));
        assert!(!trie.contains_flagged_word("cat"));
        assert_eq!(trie.words(), vec!["catalog"]);
    }

    #[test]
    fn test_remove_longer_word_keeps_prefix_word() {
        let mut trie = trie_with(&["cat", "catalog"]);

        assert!(trie.remove("CATALOG"));
        assert!(trie.contains_flagged_word("cat"));
        assert!(!trie.contains_flagged_word("catalog"));
        // root + c + a + t
        assert_eq!(trie.node_count(), 4);
    }

    #[test]
    fn test_remove_prunes_to_empty_root() {
        let mut trie = trie_with(&["hello"]);

        assert!(trie.remove("hello"));
        assert_eq!(trie.node_count(), 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_remove_missing_word() {
        let mut trie = trie_with(&["catalog"]);

        assert!(!trie.remove("cat"));
        assert!(!trie.remove("dog"));
        assert!(!trie.remove("catalogue"));
        assert!(trie.contains_flagged_word("catalog"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_idempotent_insert() {
        let mut trie = KeywordTrie::new();

        assert!(trie.insert("word"));
        assert!(!trie.insert("WORD"));
        assert_eq!(trie.len(), 1);
        assert!(trie.contains_flagged_word("a word"));

        assert!(trie.remove("word"));
        assert!(!trie.remove("word"));
        assert!(!trie.contains_flagged_word("a word"));
    }

    #[test]
    fn test_empty_word_never_flags() {
        let mut trie = KeywordTrie::new();

        assert!(trie.insert(""));
        assert!(trie.contains_word(""));
        assert!(!trie.contains_flagged_word(""));
        assert!(!trie.contains_flagged_word("  !!  "));

        assert!(trie.remove(""));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_flagged_tokens_are_distinct_and_ordered() {
        let trie = trie_with(&["foo", "bar"]);

        assert_eq!(
            trie.flagged_tokens("BAR baz foo bar Foo"),
            vec!["bar".to_string(), "foo".to_string()]
        );
        assert!(trie.flagged_tokens("nothing").is_empty());
    }

    #[test]
    fn test_words_sorted() {
        let trie = trie_with(&["zebra", "apple", "app"]);
        assert_eq!(trie.words(), vec!["app", "apple", "zebra"]);
    }
}
