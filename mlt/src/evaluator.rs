use std::collections::BTreeSet;
use std::fmt;

use hashbrown::HashMap;

use crate::corpus::Corpus;
use crate::model::Model;
use crate::utils::format_float;
use crate::FALLBACK_TAG;

/// Error counts of each (golden tag, predicted tag) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    tags: Vec<String>,
    ids: HashMap<String, usize>,
    // Row-major: counts[gold * n_tags + predicted]
    counts: Vec<usize>,
    total: usize,
}

impl ConfusionMatrix {
    fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let ids = tags
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let n_tags = tags.len();
        Self {
            tags,
            ids,
            counts: vec![0; n_tags * n_tags],
            total: 0,
        }
    }

    fn increment(&mut self, gold: &str, predicted: &str) {
        let (Some(&r), Some(&c)) = (self.ids.get(gold), self.ids.get(predicted)) else {
            // Every golden and predicted tag is registered before counting.
            log::warn!("tag pair ({gold}, {predicted}) is not in the confusion matrix");
            return;
        };
        self.counts[r * self.tags.len() + c] += 1;
        self.total += 1;
    }

    /// Row and column labels in sorted order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of golden `gold` tokens that were predicted as `predicted`.
    ///
    /// Diagonal cells are always zero since only errors are counted.
    ///
    /// # Returns
    ///
    /// `None` if either tag is not a label of the matrix.
    pub fn count(&self, gold: &str, predicted: &str) -> Option<usize> {
        let r = *self.ids.get(gold)?;
        let c = *self.ids.get(predicted)?;
        Some(self.counts[r * self.tags.len() + c])
    }

    /// Share of all errors that predicted `predicted` where the truth was `gold`.
    ///
    /// Zero for every cell when there are no errors.
    pub fn proportion(&self, gold: &str, predicted: &str) -> Option<f64> {
        let count = self.count(gold, predicted)?;
        Some(self.normalize(count))
    }

    /// Proportions of one row, in the order of [`Self::tags()`].
    pub fn row(&self, gold: &str) -> Option<Vec<f64>> {
        let r = *self.ids.get(gold)?;
        let n_tags = self.tags.len();
        Some(
            self.counts[r * n_tags..(r + 1) * n_tags]
                .iter()
                .map(|&count| self.normalize(count))
                .collect(),
        )
    }

    #[inline]
    fn normalize(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

/// Result of evaluating a model against a golden standard.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    matrix: ConfusionMatrix,
    n_tokens: usize,
    total_errors: usize,
    total_unknown_word_errors: usize,
}

impl Evaluation {
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    /// Number of tokens in the golden corpus.
    pub fn n_tokens(&self) -> usize {
        self.n_tokens
    }

    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    /// Errors whose prediction was [`FALLBACK_TAG`].
    pub fn total_unknown_word_errors(&self) -> usize {
        self.total_unknown_word_errors
    }

    /// Share of golden tokens that were tagged correctly.
    ///
    /// # Returns
    ///
    /// `None` if the golden corpus is empty.
    pub fn accuracy(&self) -> Option<f64> {
        if self.n_tokens == 0 {
            return None;
        }
        Some((self.n_tokens - self.total_errors) as f64 / self.n_tokens as f64)
    }
}

fn round5(x: f64) -> f64 {
    (x * 1e5).round() / 1e5
}

impl fmt::Display for Evaluation {
    /// Renders a fixed-width report: the confusion matrix followed by the error totals and the
    /// accuracy.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dashes = "-".repeat(55);
        writeln!(f, "-----------------")?;
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f, "-----------------")?;

        write!(f, "{:^8}", "")?;
        for tag in self.matrix.tags() {
            write!(f, "{tag:^8}")?;
        }
        writeln!(f)?;

        for tag in self.matrix.tags() {
            write!(f, "{tag:^8}")?;
            for p in self.matrix.row(tag).unwrap_or_default() {
                let p = round5(p);
                if p == 0.0 {
                    write!(f, "{:^8}", "-")?;
                } else {
                    write!(f, "{:^8}", format_float(p))?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "{dashes}")?;
        writeln!(
            f,
            "Total Errors: {} ({} of which are due to unknown words)",
            self.total_errors, self.total_unknown_word_errors
        )?;
        match self.accuracy() {
            Some(accuracy) => {
                writeln!(f, "Accuracy: {}%", format_float(round5(accuracy * 100.0)))?
            }
            None => writeln!(f, "Accuracy: n/a")?,
        }
        writeln!(f, "{dashes}")
    }
}

/// Scores a model against a golden standard corpus.
pub struct Evaluator<'a> {
    model: &'a Model,
}

impl<'a> Evaluator<'a> {
    /// Creates a new evaluator.
    pub const fn new(model: &'a Model) -> Self {
        Self { model }
    }

    fn predict(&self, word: &str) -> &'a str {
        self.model.lookup(word).map_or(FALLBACK_TAG, |e| e.tag())
    }

    /// Evaluates the model.
    ///
    /// The confusion matrix is labeled with every golden tag, every tag predicted for a golden
    /// word, and [`FALLBACK_TAG`]. A mismatch whose prediction is [`FALLBACK_TAG`] is counted as
    /// an unknown word error, even when the word was seen in training.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::{Corpus, Evaluator, Trainer};
    ///
    /// let train = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
    /// let model = Trainer::new(&train).train();
    ///
    /// let golden = Corpus::from_tagged_text("Fly/VB like/IN a/DT arrow/NN").unwrap();
    /// let evaluation = Evaluator::new(&model).evaluate(&golden);
    ///
    /// assert_eq!(1, evaluation.total_errors());
    /// assert_eq!(1, evaluation.total_unknown_word_errors());
    /// assert_eq!(Some(0.75), evaluation.accuracy());
    /// assert_eq!(Some(1.0), evaluation.confusion_matrix().proportion("DT", "NN"));
    /// ```
    pub fn evaluate(&self, golden: &Corpus) -> Evaluation {
        let mut tags = BTreeSet::new();
        tags.insert(FALLBACK_TAG);
        for token in golden {
            tags.insert(token.tag());
            tags.insert(self.predict(token.word()));
        }
        let mut matrix = ConfusionMatrix::new(tags);

        let mut total_errors = 0;
        let mut total_unknown_word_errors = 0;
        for token in golden {
            let predicted = self.predict(token.word());
            if predicted != token.tag() {
                total_errors += 1;
                matrix.increment(token.tag(), predicted);
                if predicted == FALLBACK_TAG {
                    total_unknown_word_errors += 1;
                }
            }
        }
        log::debug!(
            "{} tokens, {total_errors} errors, {total_unknown_word_errors} unknown word errors",
            golden.len()
        );

        Evaluation {
            matrix,
            n_tokens: golden.len(),
            total_errors,
            total_unknown_word_errors,
        }
    }
}
