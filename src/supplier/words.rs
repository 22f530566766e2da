use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

/// Conventional location of a system word list.
pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/dict/words";

/// Draws beyond this count give up and return a sentinel word.
const MAX_WORD_ATTEMPTS: usize = 100;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Flat word list backing free-form string synthesis. Empty is a valid,
/// degraded state: words become random letter strings.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.trim().is_empty())
                .collect(),
        }
    }

    /// Read a line-delimited word list.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_words(source.lines().map(str::trim)))
    }

    /// Like [`Dictionary::load`], but a missing or unreadable file yields an
    /// empty dictionary.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(dictionary) => {
                tracing::debug!(path = %path.display(), words = dictionary.len(), "dictionary loaded");
                dictionary
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "dictionary unavailable, using synthetic words");
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Pick a word whose length (in chars) lies in `min..=max`.
    pub fn random_word<R: Rng>(&self, rng: &mut R, min: usize, max: usize) -> String {
        let max = max.max(min);
        if self.words.is_empty() {
            return random_letters(rng, min, max);
        }
        for _ in 0..MAX_WORD_ATTEMPTS {
            let Some(word) = self.words.choose(rng) else { break };
            let len = word.chars().count();
            if (min..=max).contains(&len) {
                return word.clone();
            }
        }
        format!("no-word-found-{min}-{max}")
    }
}

fn random_letters<R: Rng>(rng: &mut R, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn synthetic_words_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let dictionary = Dictionary::empty();
        for _ in 0..200 {
            let word = dictionary.random_word(&mut rng, 4, 9);
            assert!((4..=9).contains(&word.len()), "{word}");
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn dictionary_words_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let dictionary = Dictionary::from_words(["a", "tiny", "burger", "extraordinarily", ""]);
        assert_eq!(dictionary.len(), 4);
        for _ in 0..100 {
            let word = dictionary.random_word(&mut rng, 3, 6);
            assert!(word == "tiny" || word == "burger", "{word}");
        }
    }

    #[test]
    fn impossible_bounds_give_up_with_sentinel() {
        let mut rng = StdRng::seed_from_u64(7);
        let dictionary = Dictionary::from_words(["ab", "cd"]);
        assert_eq!(dictionary.random_word(&mut rng, 5, 8), "no-word-found-5-8");
    }

    #[test]
    fn inverted_bounds_collapse_to_minimum() {
        let mut rng = StdRng::seed_from_u64(7);
        let word = Dictionary::empty().random_word(&mut rng, 12, 10);
        assert_eq!(word.len(), 12);
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let dictionary = Dictionary::load_or_empty(Path::new("/definitely/not/here/words"));
        assert!(dictionary.is_empty());
    }
}
