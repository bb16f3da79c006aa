// Profanity filter - case-insensitive substring matching against a fixed list.

/// The static banned wordlist. Matching is plain substring containment, so
/// "shitshow" and "FUCKing" both trip the filter.
const BANNED_WORDS: &[&str] = &["fuck", "shit", "bitch", "slur1", "abuse1"];

pub struct ProfanityFilter {
    words: Vec<String>,
}

impl ProfanityFilter {
    pub fn new() -> Self {
        Self::with_words(BANNED_WORDS.iter().map(|w| w.to_string()).collect())
    }

    /// Build a filter with a custom wordlist (used by tests).
    pub fn with_words(words: Vec<String>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// True iff the lower-cased text contains any banned entry as a plain
    /// substring. No word-boundary check, no normalization beyond case-folding.
    pub fn is_violation(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.words.iter().any(|w| lower.contains(w.as_str()))
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new()
    }
}
