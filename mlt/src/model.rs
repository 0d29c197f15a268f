use std::io::{Read, Write};

use bincode::{Decode, Encode};
use hashbrown::{HashMap, HashSet};

use crate::errors::{MltError, Result};

/// The most likely tag of a word and its p*(t|w) score.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct WordTag {
    pub(crate) word: String,
    pub(crate) tag: String,
    pub(crate) score: f64,
}

impl WordTag {
    #[inline]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The most likely tag. Empty if no occurrence of the word scored above zero.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The approximated p*(t|w) of [`Self::tag()`].
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Debug, PartialEq, Encode, Decode)]
struct ModelData {
    // In order of first occurrence in the training corpus.
    entries: Vec<WordTag>,
    tag_set: Vec<String>,
}

/// Trained word-to-tag lookup.
///
/// A model is produced by [`Trainer`](crate::Trainer) and never modified afterwards.
#[derive(Debug)]
pub struct Model {
    data: ModelData,
    index: HashMap<String, usize>,
}

impl Model {
    pub(crate) fn new(entries: Vec<WordTag>, mut tag_set: Vec<String>) -> Self {
        tag_set.sort_unstable();
        tag_set.dedup();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.word.clone(), i))
            .collect();
        Self {
            data: ModelData { entries, tag_set },
            index,
        }
    }

    /// Looks up the most likely tag of a word.
    ///
    /// # Returns
    ///
    /// `None` if the word was not seen in training. Callers decide the fallback, usually
    /// [`FALLBACK_TAG`](crate::FALLBACK_TAG).
    ///
    /// # Examples
    ///
    /// ```
    /// use mlt::{Corpus, Trainer, FALLBACK_TAG};
    ///
    /// let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN").unwrap();
    /// let model = Trainer::new(&corpus).train();
    ///
    /// assert_eq!("VB", model.lookup("Fly").unwrap().tag());
    /// assert!(model.lookup("fly").is_none());
    /// assert_eq!("NN", model.lookup("time").map_or(FALLBACK_TAG, |e| e.tag()));
    /// ```
    pub fn lookup(&self, word: &str) -> Option<&WordTag> {
        self.index.get(word).map(|&i| &self.data.entries[i])
    }

    /// All entries in order of first occurrence in the training corpus.
    pub fn entries(&self) -> &[WordTag] {
        &self.data.entries
    }

    /// Distinct tags of the training corpus in sorted order.
    pub fn tag_set(&self) -> &[String] {
        &self.data.tag_set
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        bincode::encode_into_std_write(&self.data, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is. An invalid model error is
    /// returned when the data contains duplicate words, a score outside `[0, 1]`, or a tag
    /// that is not in the tag set.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let data: ModelData = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        let index = build_index(&data)?;
        Ok(Self { data, index })
    }
}

/// Maps every word to its entry, rejecting inconsistent data.
fn build_index(data: &ModelData) -> Result<HashMap<String, usize>> {
    let tags: HashSet<&str> = data.tag_set.iter().map(String::as_str).collect();
    let mut index = HashMap::with_capacity(data.entries.len());
    for (i, entry) in data.entries.iter().enumerate() {
        if !(0.0..=1.0).contains(&entry.score) {
            return Err(MltError::invalid_model(format!(
                "score of {:?} is out of range: {}",
                entry.word, entry.score
            )));
        }
        if !entry.tag.is_empty() && !tags.contains(entry.tag.as_str()) {
            return Err(MltError::invalid_model(format!(
                "tag of {:?} is not in the tag set: {}",
                entry.word, entry.tag
            )));
        }
        if index.insert(entry.word.clone(), i).is_some() {
            return Err(MltError::invalid_model(format!(
                "duplicate word: {:?}",
                entry.word
            )));
        }
    }
    Ok(index)
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_tag(word: &str, tag: &str, score: f64) -> WordTag {
        WordTag {
            word: word.to_string(),
            tag: tag.to_string(),
            score,
        }
    }

    #[test]
    fn test_model_lookup() {
        let model = Model::new(
            vec![word_tag("Fly", "VB", 1.0), word_tag("arrow", "NN", 0.5)],
            vec!["VB".to_string(), "NN".to_string()],
        );

        assert_eq!(Some(&word_tag("arrow", "NN", 0.5)), model.lookup("arrow"));
        assert_eq!(None, model.lookup("Arrow"));
        assert_eq!(&["NN".to_string(), "VB".to_string()], model.tag_set());
    }

    #[test]
    fn test_model_write_read() {
        let model = Model::new(
            vec![
                word_tag("fruit", "NN", 0.04000000000000001),
                word_tag("flies", "NNS", 1.0),
                word_tag("unseen", "", 0.0),
            ],
            vec!["NN".to_string(), "NNS".to_string()],
        );

        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let restored = Model::read(&mut buf.as_slice()).unwrap();

        assert_eq!(model, restored);
        assert_eq!("NNS", restored.lookup("flies").unwrap().tag());
        assert_eq!(0.04000000000000001, restored.lookup("fruit").unwrap().score());
    }

    #[test]
    fn test_model_read_duplicate_word() {
        let data = ModelData {
            entries: vec![word_tag("a", "DT", 0.5), word_tag("a", "DT", 0.5)],
            tag_set: vec!["DT".to_string()],
        };
        let mut buf = vec![];
        bincode::encode_into_std_write(&data, &mut buf, bincode::config::standard()).unwrap();

        let result = Model::read(&mut buf.as_slice());

        assert!(matches!(result, Err(MltError::InvalidModel(_))));
    }

    #[test]
    fn test_model_read_unknown_tag() {
        let data = ModelData {
            entries: vec![word_tag("a", "DT", 0.5)],
            tag_set: vec!["NN".to_string()],
        };
        let mut buf = vec![];
        bincode::encode_into_std_write(&data, &mut buf, bincode::config::standard()).unwrap();

        let result = Model::read(&mut buf.as_slice());

        assert!(matches!(result, Err(MltError::InvalidModel(_))));
    }

    #[test]
    fn test_model_read_score_out_of_range() {
        let data = ModelData {
            entries: vec![word_tag("a", "DT", 1.5)],
            tag_set: vec!["DT".to_string()],
        };
        let mut buf = vec![];
        bincode::encode_into_std_write(&data, &mut buf, bincode::config::standard()).unwrap();

        let result = Model::read(&mut buf.as_slice());

        assert!(matches!(result, Err(MltError::InvalidModel(_))));
    }

    #[test]
    fn test_model_read_truncated() {
        let model = Model::new(vec![word_tag("a", "DT", 0.5)], vec!["DT".to_string()]);
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        buf.truncate(buf.len() - 3);

        let result = Model::read(&mut buf.as_slice());

        assert!(matches!(result, Err(MltError::DecodeError(_))));
    }
}
