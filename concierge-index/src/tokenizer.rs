//! Deterministic CJK+Latin tokenizer, used identically at build and query time.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

/// Whether `c` falls in the CJK Unified Ideographs block (the common case;
/// extension blocks are deliberately out of scope, matching the closed
/// character set the spec names).
fn is_cjk_ideograph(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF)
}

fn is_latin_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Tokenize `text`: drop whitespace, segment into word tokens (CJK ideographs
/// are individual tokens since there is no dictionary-based segmenter in this
/// stack; Latin runs are kept together by [`UnicodeSegmentation::unicode_words`]),
/// lowercase, drop any token containing a character outside CJK/Latin, then
/// drop stopwords.
///
/// Deterministic: the same text always yields the same token sequence,
/// independent of build vs. query time or process.
pub fn tokenize(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    let mut tokens = Vec::new();

    for word in text.unicode_words() {
        for raw in split_cjk_runs(word) {
            let lowered = raw.to_lowercase();
            if lowered.chars().all(|c| is_cjk_ideograph(c) || is_latin_alpha(c)) && !lowered.is_empty() {
                if !stopwords.contains(&lowered) {
                    tokens.push(lowered);
                }
            }
        }
    }

    tokens
}

/// `unicode_words()` already isolates CJK ideographs as single-character
/// "words" under UAX#29 in the common case, but defensively re-split any
/// multi-character run that mixes CJK with Latin so each CJK character
/// still becomes its own token.
fn split_cjk_runs(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.iter().all(|c| is_latin_alpha(*c)) {
        return vec![word.to_string()];
    }

    let mut out = Vec::new();
    let mut latin_run = String::new();
    for c in chars {
        if is_cjk_ideograph(c) {
            if !latin_run.is_empty() {
                out.push(std::mem::take(&mut latin_run));
            }
            out.push(c.to_string());
        } else {
            latin_run.push(c);
        }
    }
    if !latin_run.is_empty() {
        out.push(latin_run);
    }
    out
}

/// The built-in English stoplist, merged with any configured stopword file.
pub fn default_stopwords() -> HashSet<String> {
    const WORDS: &[&str] = &[
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "and", "or", "but",
        "if", "to", "of", "in", "on", "at", "for", "with", "as", "by", "this", "that", "it", "not",
        "no", "do", "does", "did", "i", "you", "he", "she", "we", "they",
    ];
    WORDS.iter().map(|s| s.to_string()).collect()
}

/// Merge the built-in stoplist with additional stopwords read from a file,
/// one entry per line.
pub fn load_stopwords(path: Option<&str>) -> Result<HashSet<String>, std::io::Error> {
    let mut stopwords = default_stopwords();
    if let Some(path) = path {
        let contents = std::fs::read_to_string(path)?;
        for line in contents.lines() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                stopwords.insert(trimmed.to_lowercase());
            }
        }
    }
    Ok(stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_mixed_cjk_and_latin() {
        let stopwords = HashSet::new();
        let tokens = tokenize("花园 早餐 very Good", &stopwords);
        assert_eq!(tokens, vec!["花", "园", "早", "餐", "very", "good"]);
    }

    #[test]
    fn drops_stopwords() {
        let mut stopwords = HashSet::new();
        stopwords.insert("the".to_string());
        let tokens = tokenize("the breakfast", &stopwords);
        assert_eq!(tokens, vec!["breakfast"]);
    }

    #[test]
    fn deterministic_across_calls() {
        let stopwords = default_stopwords();
        let a = tokenize("花园大床房 breakfast was great", &stopwords);
        let b = tokenize("花园大床房 breakfast was great", &stopwords);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_yields_empty_tokens() {
        let stopwords = HashSet::new();
        assert!(tokenize("", &stopwords).is_empty());
    }
}
