use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Model;
use crate::FALLBACK_TAG;

// Applied in this order. Each pattern inserts a space between the two groups.
static WORD_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)([.,'"`!?])"#).expect("valid regex"));
static PUNCT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([.,'"`!?])(\w+)"#).expect("valid regex"));
static FORMAT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\t\n\r])([\w.,'"!?])"#).expect("valid regex"));
static WORD_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\w.,'"!?])([\t\n\r])"#).expect("valid regex"));

#[inline]
fn is_format_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Separates words from adjacent punctuation marks and format characters with a space.
///
/// # Examples
///
/// ```
/// use mlt::annotator::separate;
///
/// assert_eq!("Time flies .", separate("Time flies."));
/// assert_eq!("\" Hi \" \n Bye", separate("\"Hi\"\nBye"));
/// ```
pub fn separate(text: &str) -> String {
    [&*WORD_PUNCT, &*PUNCT_WORD, &*FORMAT_WORD, &*WORD_FORMAT]
        .into_iter()
        .fold(text.to_string(), |text, re| {
            re.replace_all(&text, "${1} ${2}").into_owned()
        })
}

/// Annotates free text with the most likely tag of every word.
pub struct Annotator<'a> {
    model: &'a Model,
}

impl<'a> Annotator<'a> {
    /// Creates a new annotator.
    pub const fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Annotates a text.
    ///
    /// The text is split into tokens with [`separate()`] and single spaces. Every token is
    /// emitted as `token/tag`, where the tag comes from the model or is [`FALLBACK_TAG`] for an
    /// unknown word. Tokens starting with a tab, a newline or a carriage return are emitted
    /// as they are, and so are empty tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::{Annotator, Corpus, Trainer};
    ///
    /// let corpus = Corpus::from_tagged_text("Time/NN flies/VBZ ./.").unwrap();
    /// let model = Trainer::new(&corpus).train();
    /// let annotator = Annotator::new(&model);
    ///
    /// assert_eq!("Time/NN flies/VBZ ./. \n Bye/NN", annotator.annotate("Time flies.\nBye"));
    /// ```
    pub fn annotate(&self, text: &str) -> String {
        let separated = separate(text);
        let annotated: Vec<Cow<str>> = separated
            .split(' ')
            .map(|token| match token.chars().next() {
                Some(c) if !is_format_char(c) => {
                    let tag = self.model.lookup(token).map_or(FALLBACK_TAG, |e| e.tag());
                    Cow::Owned(format!("{token}/{tag}"))
                }
                _ => Cow::Borrowed(token),
            })
            .collect();
        annotated.join(" ")
    }
}
