use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        const WORDS: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in",
            "is", "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with",
            "i", "my", "me", "am", "this", "but", "or", "so", "if",
        ];
        WORDS.iter().copied().collect()
    })
}

pub fn is_stop_word(token: &str) -> bool {
    stop_words().contains(token)
}

/// Lowercase and reduce text to `[a-z0-9]` runs separated by single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into normalized tokens, optionally dropping stop words and single characters.
pub fn tokenize(text: &str, remove_stop_words: bool) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .filter(|token| !remove_stop_words || (token.len() > 1 && !is_stop_word(token)))
        .map(str::to_string)
        .collect()
}

/// Whitespace-delimited word count of the raw text, as shown next to an essay draft.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
