//! Term-weighted vector spaces fit jointly over both populations

use crate::engine::preprocessor;
use crate::error::{MatcherError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Which corpus a vector space was fit on. Profile and skill spaces are fit
/// independently and their vectors are never compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    Profile,
    Skill,
}

/// An immutable vocabulary-to-dimension mapping plus IDF weighting.
///
/// Dimensions are assigned in lexical token order so that fitting the same
/// corpus always produces the same space.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    kind: SpaceKind,
    vocabulary: HashMap<String, usize>,
    feature_names: Vec<String>,
    idf: Vec<f32>,
}

/// TF-IDF vectorizer with English stop-word removal.
pub struct TfidfVectorizer {
    stop_words: &'static HashSet<&'static str>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            stop_words: preprocessor::stop_words(),
        }
    }

    /// Fit a vector space over the given corpus.
    ///
    /// Builds the vocabulary from all tokens that survive stop-word removal
    /// and computes smoothed IDF weights (`ln((1+n)/(1+df)) + 1`).
    /// Fails with `EmptyCorpus` when the corpus has no documents or yields
    /// an empty vocabulary.
    pub fn fit(&self, corpus: &[String], kind: SpaceKind) -> Result<VectorSpace> {
        if corpus.is_empty() {
            return Err(MatcherError::EmptyCorpus);
        }

        let mut doc_frequency: HashMap<String, usize> = HashMap::new();
        for document in corpus {
            let unique: HashSet<String> = tokenize(document)
                .filter(|token| !self.stop_words.contains(token.as_str()))
                .collect();
            for token in unique {
                *doc_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut feature_names: Vec<String> = doc_frequency.keys().cloned().collect();
        feature_names.sort_unstable();

        if feature_names.is_empty() {
            return Err(MatcherError::EmptyCorpus);
        }

        let total_docs = corpus.len() as f32;
        let mut vocabulary = HashMap::with_capacity(feature_names.len());
        let mut idf = Vec::with_capacity(feature_names.len());
        for (dim, token) in feature_names.iter().enumerate() {
            let df = doc_frequency[token] as f32;
            idf.push(((1.0 + total_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(token.clone(), dim);
        }

        Ok(VectorSpace {
            kind,
            vocabulary,
            feature_names,
            idf,
        })
    }
}

impl VectorSpace {
    pub fn kind(&self) -> SpaceKind {
        self.kind
    }

    /// Dimensionality of the space.
    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }

    /// Tokens in dimension order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Map text into an L2-normalized nonnegative weighted vector in this
    /// space's dimensionality. Tokens outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.len());
        for token in tokenize(text) {
            if let Some(&dim) = self.vocabulary.get(&token) {
                vector[dim] += 1.0;
            }
        }

        for (dim, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[dim];
        }

        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector.mapv_inplace(|weight| weight / norm);
        }
        vector
    }
}

/// Word tokens of at least two characters, lowercased. Underscores join
/// words under Unicode segmentation, so collapsed skills like
/// `machine_learning` stay single tokens.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_is_lexically_ordered() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["sql python", "machine_learning python"]), SpaceKind::Skill)
            .unwrap();
        assert_eq!(space.feature_names(), &["machine_learning", "python", "sql"]);
    }

    #[test]
    fn test_stop_words_are_excluded() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["python and the sql"]), SpaceKind::Profile)
            .unwrap();
        assert_eq!(space.feature_names(), &["python", "sql"]);
    }

    #[test]
    fn test_collapsed_skills_stay_single_tokens() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["machine_learning web_development"]), SpaceKind::Skill)
            .unwrap();
        assert_eq!(
            space.feature_names(),
            &["machine_learning", "web_development"]
        );
    }

    #[test]
    fn test_empty_corpus_fails() {
        let vectorizer = TfidfVectorizer::new();
        let result = vectorizer.fit(&[], SpaceKind::Profile);
        assert!(matches!(result, Err(MatcherError::EmptyCorpus)));
    }

    #[test]
    fn test_degenerate_corpus_fails() {
        let vectorizer = TfidfVectorizer::new();
        // Only stop words and single-character tokens: no vocabulary remains.
        let result = vectorizer.fit(&corpus(&["the and of", "a b c"]), SpaceKind::Profile);
        assert!(matches!(result, Err(MatcherError::EmptyCorpus)));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["python sql", "python aws"]), SpaceKind::Skill)
            .unwrap();
        let vector = space.transform("python sql");
        let norm = vector.dot(&vector).sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_ignores_unknown_tokens() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["python sql"]), SpaceKind::Skill)
            .unwrap();
        let vector = space.transform("rust golang");
        assert!(vector.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_transform_of_empty_text_is_zero() {
        let vectorizer = TfidfVectorizer::new();
        let space = vectorizer
            .fit(&corpus(&["python sql"]), SpaceKind::Skill)
            .unwrap();
        let vector = space.transform("");
        assert_eq!(vector.len(), space.len());
        assert!(vector.iter().all(|&w| w == 0.0));
    }
}
