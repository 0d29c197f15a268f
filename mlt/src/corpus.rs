use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::errors::{MltError, Result};

/// A word with its part-of-speech tag.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TaggedToken {
    pub(crate) word: String,
    pub(crate) tag: String,
}

impl TaggedToken {
    /// Creates a new [`TaggedToken`].
    pub fn new<W, T>(word: W, tag: T) -> Self
    where
        W: Into<String>,
        T: Into<String>,
    {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// Parses a `word/tag` token. The word ends at the first `/`; the tag is everything after it.
    ///
    /// # Returns
    ///
    /// `None` if the token has no `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::TaggedToken;
    ///
    /// let t = TaggedToken::parse("and/or/CC").unwrap();
    /// assert_eq!("and", t.word());
    /// assert_eq!("or/CC", t.tag());
    ///
    /// assert!(TaggedToken::parse("arrow").is_none());
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        token
            .split_once('/')
            .map(|(word, tag)| Self::new(word, tag))
    }

    #[inline]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Ordered sequence of tagged tokens.
///
/// The order is significant: adjacent tokens make up the tag bigrams used in training.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Corpus {
    tokens: Vec<TaggedToken>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub const fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Tokenizes tagged text.
    ///
    /// The text is split on whitespace and every token is split into a word and a tag on its
    /// first `/`.
    ///
    /// # Errors
    ///
    /// [`MltError::MalformedToken`] is returned when a token has no `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::Corpus;
    ///
    /// let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
    /// assert_eq!(4, corpus.len());
    /// assert_eq!("arrow", corpus.tokens()[3].word());
    ///
    /// assert!(Corpus::from_tagged_text("Fly/VB like").is_err());
    /// ```
    pub fn from_tagged_text(text: &str) -> Result<Self> {
        let tokens = text
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                TaggedToken::parse(token).ok_or_else(|| MltError::malformed_token(i, token))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    /// Reads and tokenizes a tagged corpus file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, or a malformed token error.
    pub fn read<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Self::from_tagged_text(&text)
    }

    /// Tokenizes tagged text, skipping malformed tokens.
    ///
    /// Every token without `/` is reported through the logger with its position and dropped;
    /// the remaining tokens keep their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::Corpus;
    ///
    /// let corpus = Corpus::from_tagged_text_lossy("Fly/VB like an/DT");
    /// assert_eq!(2, corpus.len());
    /// assert_eq!("an", corpus.tokens()[1].word());
    /// ```
    pub fn from_tagged_text_lossy(text: &str) -> Self {
        let tokens = text
            .split_whitespace()
            .enumerate()
            .filter_map(|(i, token)| {
                let parsed = TaggedToken::parse(token);
                if parsed.is_none() {
                    log::warn!("skipping malformed token at {i}: {token:?}");
                }
                parsed
            })
            .collect();
        Self { tokens }
    }

    /// Reads a tagged corpus file, falling back to an empty corpus when it cannot be read.
    ///
    /// The failure is reported through the logger. Everything computed from the returned corpus
    /// then works on empty input: training yields an empty model and every word falls back to
    /// [`FALLBACK_TAG`](crate::FALLBACK_TAG). Malformed tokens are skipped as in
    /// [`Self::from_tagged_text_lossy()`].
    pub fn load_or_empty<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_tagged_text_lossy(&text),
            Err(e) => {
                log::error!("Could not open {}: {e}", path.display());
                log::error!("Continuing with an empty corpus.");
                Self::new()
            }
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct tags of the corpus in sorted order.
    pub fn tag_set(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(|t| t.tag()).collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TaggedToken;
    type IntoIter = std::slice::Iter<'a, TaggedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
