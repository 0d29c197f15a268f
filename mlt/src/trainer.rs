use hashbrown::HashMap;

use crate::corpus::{Corpus, TaggedToken};
use crate::model::{Model, WordTag};

/// Tag statistics of a corpus.
///
/// Holds every count the score formula needs so that each occurrence is scored in constant time
/// instead of rescanning the corpus.
struct TagCounts<'a> {
    first: Option<&'a TaggedToken>,
    // C(t)
    tags: HashMap<&'a str, usize>,
    // C(t, prev) keyed by (prev, t)
    bigrams: HashMap<(&'a str, &'a str), usize>,
    // C(t, w) keyed by (w, t), excluding the first token
    word_tags: HashMap<(&'a str, &'a str), usize>,
}

impl<'a> TagCounts<'a> {
    fn new(tokens: &'a [TaggedToken]) -> Self {
        let mut tags = HashMap::new();
        let mut bigrams = HashMap::new();
        let mut word_tags = HashMap::new();
        for token in tokens {
            *tags.entry(token.tag()).or_insert(0) += 1;
        }
        for pair in tokens.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            *bigrams.entry((prev.tag(), next.tag())).or_insert(0) += 1;
            *word_tags.entry((next.word(), next.tag())).or_insert(0) += 1;
        }
        Self {
            first: tokens.first(),
            tags,
            bigrams,
            word_tags,
        }
    }

    /// Approximates p*(t|w).
    ///
    /// With an empty `prev_tag` this is the likelihood C(t, w) / C(t), where the first token
    /// counts toward C(t, w). Otherwise it is the prior times the likelihood,
    /// (C(t, prev) / C(t)) * (C(t, w) / C(t)), where C(t, w) only counts tokens that have a
    /// predecessor.
    fn score(&self, tag: &str, prev_tag: &str, word: &str) -> f64 {
        let n_tag = self.tags.get(tag).copied().unwrap_or(0);
        let n_word_tag = self.word_tags.get(&(word, tag)).copied().unwrap_or(0);
        if prev_tag.is_empty() {
            let first_matches = self
                .first
                .map_or(false, |t| t.word() == word && t.tag() == tag);
            (n_word_tag + usize::from(first_matches)) as f64 / n_tag as f64
        } else {
            let n_bigram = self.bigrams.get(&(prev_tag, tag)).copied().unwrap_or(0);
            (n_bigram as f64 / n_tag as f64) * (n_word_tag as f64 / n_tag as f64)
        }
    }
}

/// Most-likely-tag trainer.
///
/// # Examples
///
/// ```
/// use mlt::{Corpus, Trainer};
///
/// let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
/// let trainer = Trainer::new(&corpus);
/// let model = trainer.train();
///
/// let entry = model.lookup("Fly").unwrap();
/// assert_eq!("VB", entry.tag());
/// assert_eq!(1.0, entry.score());
/// ```
pub struct Trainer<'a> {
    corpus: &'a Corpus,
    counts: TagCounts<'a>,
}

impl<'a> Trainer<'a> {
    /// Creates a new trainer and collects the tag statistics of `corpus`.
    pub fn new(corpus: &'a Corpus) -> Self {
        let counts = TagCounts::new(corpus.tokens());
        log::debug!(
            "{} tokens, {} tags, {} tag bigrams, {} word/tag pairs",
            corpus.len(),
            counts.tags.len(),
            counts.bigrams.len(),
            counts.word_tags.len(),
        );
        Self { corpus, counts }
    }

    /// Trains a model.
    pub fn train(&self) -> Model {
        self.train_with_progress(|_, _| {})
    }

    /// Trains a model, reporting progress.
    ///
    /// # Arguments
    ///
    /// * `progress` - Called with `(0, n)` before the first token and with `(i + 1, n)` after
    ///   token `i`, where `n` is the corpus length.
    ///
    /// # Returns
    ///
    /// A model holding, for every distinct word, the tag of its highest scoring occurrence.
    /// Ties keep the earlier occurrence.
    pub fn train_with_progress<F>(&self, mut progress: F) -> Model
    where
        F: FnMut(usize, usize),
    {
        let tokens = self.corpus.tokens();
        let n_tokens = tokens.len();

        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<WordTag> = vec![];

        progress(0, n_tokens);
        for (i, token) in tokens.iter().enumerate() {
            let prev_tag = if i == 0 { "" } else { tokens[i - 1].tag() };
            let id = *ids.entry(token.word()).or_insert_with(|| {
                entries.push(WordTag {
                    word: token.word().to_string(),
                    tag: String::new(),
                    score: 0.0,
                });
                entries.len() - 1
            });

            let score = self.counts.score(token.tag(), prev_tag, token.word());
            let entry = &mut entries[id];
            if score > entry.score {
                entry.tag.clear();
                entry.tag.push_str(token.tag());
                entry.score = score;
            }
            progress(i + 1, n_tokens);
        }

        let tag_set = self
            .corpus
            .tag_set()
            .into_iter()
            .map(str::to_string)
            .collect();
        Model::new(entries, tag_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "time/NN flies/VBZ like/IN an/DT arrow/NN ./. \
                          fruit/NN flies/NNS like/VBP a/DT banana/NN ./. \
                          The/DT dog/NN barks/VBZ ./.";

    // Scores an occurrence by rescanning the whole corpus.
    fn naive_score(tokens: &[TaggedToken], tag: &str, prev_tag: &str, word: &str) -> f64 {
        let mut n_prior = 0;
        let mut n_likelihood = 0;
        let mut n_tag = 0;
        if prev_tag.is_empty() {
            for t in tokens {
                if t.tag() == tag {
                    n_tag += 1;
                    if t.word() == word {
                        n_likelihood += 1;
                    }
                }
            }
            return n_likelihood as f64 / n_tag as f64;
        }
        if tokens[0].tag() == tag {
            n_tag += 1;
        }
        for i in 0..tokens.len() - 1 {
            if tokens[i + 1].tag() == tag {
                n_tag += 1;
                if tokens[i].tag() == prev_tag {
                    n_prior += 1;
                }
                if tokens[i + 1].word() == word {
                    n_likelihood += 1;
                }
            }
        }
        (n_prior as f64 / n_tag as f64) * (n_likelihood as f64 / n_tag as f64)
    }

    fn naive_train(corpus: &Corpus) -> Vec<(String, String, f64)> {
        let tokens = corpus.tokens();
        let mut result: Vec<(String, String, f64)> = vec![];
        for (i, token) in tokens.iter().enumerate() {
            let prev_tag = if i == 0 { "" } else { tokens[i - 1].tag() };
            let score = naive_score(tokens, token.tag(), prev_tag, token.word());
            let pos = match result.iter().position(|(w, _, _)| w == token.word()) {
                Some(pos) => pos,
                None => {
                    result.push((token.word().to_string(), String::new(), 0.0));
                    result.len() - 1
                }
            };
            if score > result[pos].2 {
                result[pos].1 = token.tag().to_string();
                result[pos].2 = score;
            }
        }
        result
    }

    fn entries_of(model: &Model) -> Vec<(String, String, f64)> {
        model
            .entries()
            .iter()
            .map(|e| (e.word().to_string(), e.tag().to_string(), e.score()))
            .collect()
    }

    #[test]
    fn test_train_empty() {
        let corpus = Corpus::new();
        let model = Trainer::new(&corpus).train();

        assert!(model.is_empty());
        assert!(model.tag_set().is_empty());
    }

    #[test]
    fn test_train_single_sentence() {
        let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
        let model = Trainer::new(&corpus).train();

        let expected = vec![
            ("Fly".to_string(), "VB".to_string(), 1.0),
            ("like".to_string(), "IN".to_string(), 1.0),
            ("an".to_string(), "DT".to_string(), 1.0),
            ("arrow".to_string(), "NN".to_string(), 1.0),
        ];
        assert_eq!(expected, entries_of(&model));
        assert_eq!(&["DT", "IN", "NN", "VB"], model.tag_set());
    }

    #[test]
    fn test_train_scores() {
        let corpus = Corpus::from_tagged_text(CORPUS).unwrap();
        let model = Trainer::new(&corpus).train();

        let lookup = |w: &str| {
            let e = model.lookup(w).unwrap();
            (e.tag(), e.score())
        };
        // corpus-initial: C(NN, time) / C(NN) = 1 / 5
        assert_eq!(("NN", 0.2), lookup("time"));
        // VBZ scores 1 * 1/2, NNS scores 1 * 1
        assert_eq!(("NNS", 1.0), lookup("flies"));
        // (1/5) * (1/5)
        assert_eq!(("NN", 0.04000000000000001), lookup("fruit"));
        assert_eq!(("DT", 0.1111111111111111), lookup("an"));
        assert_eq!(("NN", 0.12), lookup("arrow"));
        assert_eq!((".", 0.6666666666666666), lookup("."));
        assert_eq!(("VBZ", 0.5), lookup("barks"));
    }

    #[test]
    fn test_train_tie_keeps_earlier_tag() {
        let corpus = Corpus::from_tagged_text(CORPUS).unwrap();
        let model = Trainer::new(&corpus).train();

        // IN and VBP both score 1.0
        assert_eq!("IN", model.lookup("like").unwrap().tag());
    }

    #[test]
    fn test_train_first_token_in_likelihood() {
        // The first token counts toward C(t, w) only when it is scored itself.
        let corpus = Corpus::from_tagged_text("dog/NN dog/NN").unwrap();
        let model = Trainer::new(&corpus).train();

        // i = 0: 2 / 2; i = 1: (1/2) * (1/2)
        assert_eq!(1.0, model.lookup("dog").unwrap().score());
    }

    #[test]
    fn test_train_empty_previous_tag() {
        // An empty previous tag selects the likelihood-only score in the middle of a corpus.
        let corpus = Corpus::from_tagged_text("a/DT odd/ dog/NN the/DT dog/NN").unwrap();
        let model = Trainer::new(&corpus).train();

        let odd = model.lookup("odd").unwrap();
        assert_eq!("", odd.tag());
        assert_eq!(1.0, odd.score());
        // i = 2: C(NN, dog) / C(NN) = 2 / 2; the prior would have halved it
        assert_eq!(1.0, model.lookup("dog").unwrap().score());
    }

    #[test]
    fn test_train_matches_naive_scan() {
        let text = format!(
            "{CORPUS} flies/VBZ like/IN time/NN ./. time/VB the/DT runners/NNS ./. \
             I/PRP like/VBP time/NN ./. the/DT time/NN flies/VBZ"
        );
        let corpus = Corpus::from_tagged_text(&text).unwrap();
        let model = Trainer::new(&corpus).train();

        let expected = naive_train(&corpus);
        assert_eq!(expected.len(), model.len());
        for ((w, t, s), e) in expected.iter().zip(model.entries()) {
            assert_eq!(w, e.word());
            assert_eq!(t, e.tag());
            assert_eq!(s.to_bits(), e.score().to_bits(), "score of {w}");
        }
    }

    #[test]
    fn test_train_scores_in_unit_interval() {
        let corpus = Corpus::from_tagged_text(CORPUS).unwrap();
        let model = Trainer::new(&corpus).train();

        for e in model.entries() {
            assert!((0.0..=1.0).contains(&e.score()), "{e:?}");
        }
    }

    #[test]
    fn test_train_idempotent() {
        let corpus = Corpus::from_tagged_text(CORPUS).unwrap();
        let trainer = Trainer::new(&corpus);

        assert_eq!(trainer.train(), trainer.train());
        assert_eq!(trainer.train(), Trainer::new(&corpus).train());
    }

    #[test]
    fn test_train_progress() {
        let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
        let mut calls = vec![];
        Trainer::new(&corpus).train_with_progress(|i, n| calls.push((i, n)));

        assert_eq!(vec![(0, 4), (1, 4), (2, 4), (3, 4), (4, 4)], calls);
    }
}
