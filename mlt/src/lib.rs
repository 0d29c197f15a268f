//! # mlt
//!
//! A most-likely-tag part-of-speech baseline.
//!
//! For every word in a tagged training corpus, the [`Trainer`] picks the tag maximizing the
//! approximation p*(t|w) = (C(t, prev) / C(t)) * (C(t, w) / C(t)). The resulting [`Model`] is used
//! by the [`Annotator`] to tag free text and by the [`Evaluator`] to compute a confusion matrix
//! against a golden standard. Words missing from the model get [`FALLBACK_TAG`].
//!
//! ## Examples
//!
//! ```
//! use mlt::{Annotator, Corpus, Evaluator, Trainer};
//!
//! let corpus = Corpus::from_tagged_text("Fly/VB like/IN an/DT arrow/NN ./.").unwrap();
//! let model = Trainer::new(&corpus).train();
//!
//! let annotator = Annotator::new(&model);
//! assert_eq!("Fly/VB like/IN a/NN banana/NN ./.", annotator.annotate("Fly like a banana."));
//!
//! let evaluation = Evaluator::new(&model).evaluate(&corpus);
//! assert_eq!(Some(1.0), evaluation.accuracy());
//! ```

pub mod annotator;
pub mod corpus;
pub mod errors;
pub mod evaluator;
mod model;
mod trainer;
mod utils;

pub use annotator::Annotator;
pub use corpus::{Corpus, TaggedToken};
pub use evaluator::{ConfusionMatrix, Evaluation, Evaluator};
pub use model::{Model, WordTag};
pub use trainer::Trainer;
pub use utils::format_float;

/// Tag assigned to words that are not in the model.
pub const FALLBACK_TAG: &str = "NN";
