//! Boyer–Moore substring search (bad-character rule)
//!
//! Text and pattern are handled as sequences of Unicode scalar values, so
//! returned positions are character indices, not byte offsets.
//! An empty pattern matches every text at position 0.

use ahash::AHashMap;

/// A pattern compiled for Boyer–Moore search
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<char>,
    // char -> index of its last occurrence in the pattern
    last_occurrence: AHashMap<char, usize>,
}

impl BoyerMoore {
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();
        let mut last_occurrence = AHashMap::with_capacity(pattern.len());
        for (i, &c) in pattern.iter().enumerate() {
            last_occurrence.insert(c, i);
        }

        Self { pattern, last_occurrence }
    }

    #[inline]
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Last index of `c` in the pattern, -1 when absent
    #[inline]
    fn last(&self, c: char) -> isize {
        self.last_occurrence
            .get(&c)
            .map(|&i| i as isize)
            .unwrap_or(-1)
    }

    /// Character index of the first occurrence of the pattern in `text`
    pub fn find(&self, text: &str) -> Option<usize> {
        let m = self.pattern.len();
        if m == 0 {
            return Some(0);
        }

        let text: Vec<char> = text.chars().collect();
        let n = text.len();
        if m > n {
            return None;
        }

        let mut s = 0usize;
        while s <= n - m {
            let mut j = m as isize - 1;
            while j >= 0 && self.pattern[j as usize] == text[s + j as usize] {
                j -= 1;
            }

            if j < 0 {
                return Some(s);
            }

            let bad = text[s + j as usize];
            let shift = (j - self.last(bad)).max(1);
            s += shift as usize;
        }

        None
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

/// Case-insensitive containment check
pub fn contains(text: &str, pattern: &str) -> bool {
    BoyerMoore::new(&pattern.to_lowercase()).is_match(&text.to_lowercase())
}

/// Case-sensitive position of `pattern` in `text`
#[inline]
pub fn find(text: &str, pattern: &str) -> Option<usize> {
    BoyerMoore::new(pattern).find(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_case_insensitive() {
        assert!(contains("Organic Nepali Tea", "nepali"));
        assert!(contains("Organic Nepali Tea", "TEA"));
        assert!(contains("organic nepali tea", "Organic"));
        assert!(!contains("Organic Nepali Tea", "xyz"));
    }

    #[test]
    fn test_empty_pattern_matches_at_zero() {
        assert!(contains("ABC", ""));
        assert!(contains("", ""));
        assert_eq!(find("ABC", ""), Some(0));
    }

    #[test]
    fn test_empty_text() {
        assert!(!contains("", "a"));
        assert_eq!(find("", "abc"), None);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert_eq!(find("tea", "green tea"), None);
    }

    #[test]
    fn test_find_positions() {
        assert_eq!(find("here is a simple example", "example"), Some(17));
        assert_eq!(find("abcabcabd", "abd"), Some(6));
        assert_eq!(find("aaaaa", "aa"), Some(0));
        assert_eq!(find("abc", "c"), Some(2));
        assert_eq!(find("abc", "abc"), Some(0));
        assert_eq!(find("abc", "abd"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(find("tea, more tea", "tea"), Some(0));
        assert_eq!(find("xxteaxxtea", "tea"), Some(2));
    }

    #[test]
    fn test_unicode_positions_are_chars() {
        // Devanagari text: positions count characters, not bytes
        assert_eq!(find("चिया र कफी", "कफी"), Some(7));
        assert!(contains("Café Crème", "CRÈME"));
    }

    #[test]
    fn test_agrees_with_std_find() {
        let texts = ["mississippi", "banana bandana", "abababababc", "the quick brown fox"];
        let patterns = ["issi", "ssip", "ana", "band", "ababc", "fox", "quick b", "z", "a"];

        for text in texts {
            for pattern in patterns {
                let expected = text.find(pattern).map(|b| text[..b].chars().count());
                assert_eq!(find(text, pattern), expected, "{:?} in {:?}", pattern, text);
            }
        }
    }

    #[test]
    fn test_compiled_pattern_reuse() {
        let matcher = BoyerMoore::new("tea");
        assert_eq!(matcher.pattern_len(), 3);
        assert!(matcher.is_match("green tea"));
        assert!(matcher.is_match("teapot"));
        assert!(!matcher.is_match("coffee"));
    }
}
