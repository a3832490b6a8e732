// Seed word list for the keyword trie, read once at startup.
//
// Two formats:
// - `*.json`: a JSON array of strings, or an object with a `words` array
// - anything else: one word per line, blank lines and `#` comments skipped

use crate::core::moderation::KeywordTrie;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonWordList {
    Bare(Vec<String>),
    Wrapped { words: Vec<String> },
}

impl JsonWordList {
    fn into_words(self) -> Vec<String> {
        match self {
            JsonWordList::Bare(words) | JsonWordList::Wrapped { words } => words,
        }
    }
}

/// Parse a word list from its text. `is_json` selects the format.
pub fn parse_word_list(text: &str, is_json: bool) -> Result<Vec<String>> {
    let words: Vec<String> = if is_json {
        serde_json::from_str::<JsonWordList>(text)
            .context("Word list is not a JSON array of strings or a `words` object")?
            .into_words()
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    Ok(words
        .into_iter()
        .map(|word| word.trim().to_string())
        .filter(|word| !word.is_empty())
        .collect())
}

/// Load a word list file into a fresh trie.
pub fn load_keyword_trie(path: impl AsRef<Path>) -> Result<KeywordTrie> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list at {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut trie = KeywordTrie::new();
    for word in parse_word_list(&text, is_json)? {
        trie.insert(&word);
    }

    tracing::info!(
        path = %path.display(),
        words = trie.len(),
        "Loaded forbidden word list"
    );
    Ok(trie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_plain_list() {
        let words = parse_word_list("# forbidden\nspam\n\n  Scam  \n#ignored\n", false).unwrap();
        assert_eq!(words, vec!["spam", "Scam"]);
    }

    #[test]
    fn test_parse_json_list() {
        let words = parse_word_list(r#"["spam", " ", "scam"]"#, true).unwrap();
        assert_eq!(words, vec!["spam", "scam"]);

        assert!(parse_word_list(r#"{"spam": true}"#, true).is_err());
        assert!(parse_word_list(r#"[1, 2]"#, true).is_err());
    }

    #[test]
    fn test_parse_json_words_object() {
        let words = parse_word_list(r#"{"words": ["Spam", "scam "]}"#, true).unwrap();
        assert_eq!(words, vec!["Spam", "scam"]);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"words": ["spam", "scam"]}}"#).unwrap();

        let trie = load_keyword_trie(file.path()).unwrap();
        assert_eq!(trie.len(), 2);
        assert!(trie.contains_flagged_word("what a scam"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "spam\nSPAM\nscam").unwrap();

        let trie = load_keyword_trie(file.path()).unwrap();
        assert_eq!(trie.len(), 2);
        assert!(trie.contains_flagged_word("no spam please"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_keyword_trie("/definitely/not/here.txt").is_err());
    }
}
