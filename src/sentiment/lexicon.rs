//! Valence tables for [`LexiconAnalyzer`](super::LexiconAnalyzer).
//!
//! Valences are on VADER's scale (roughly -4..=4) and are loaded from a file
//! in the VADER distribution format with [`Lexicon::from_vader_file`].

use std::{collections::HashMap, fs, path::Path};

use crate::error::{PipelineError, Result};

/// Scalar added (or subtracted) by booster / dampener words.
pub const B_INCR: f64 = 0.293;
pub const B_DECR: f64 = -0.293;

#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            valences: pairs.into_iter().collect(),
        }
    }

    /// Parse the VADER distribution format: `token<TAB>mean<TAB>stddev<TAB>ratings`.
    /// Only the first two columns are used; blank lines are ignored.
    pub fn parse_vader(content: &str) -> Result<Self> {
        let mut valences = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            let (Some(token), Some(mean)) = (parts.next(), parts.next()) else {
                return Err(PipelineError::Config(format!(
                    "lexicon line {}: expected `token<TAB>valence`",
                    idx + 1
                )));
            };
            let mean: f64 = mean.trim().parse().map_err(|_| {
                PipelineError::Config(format!(
                    "lexicon line {}: `{}` is not a number",
                    idx + 1,
                    mean
                ))
            })?;
            valences.insert(token.trim().to_lowercase(), mean);
        }
        Ok(Self { valences })
    }

    pub fn from_vader_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(&path).map_err(|e| PipelineError::ConfigFile {
                path: path.as_ref().to_path_buf(),
                source: Box::new(e),
            })?;
        Self::parse_vader(&content)
    }

    /// Valence of an already lower-cased token.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// Intensity modifier for a lower-cased token, if it is one.
pub fn booster(token: &str) -> Option<f64> {
    BOOSTERS.iter().find(|(w, _)| *w == token).map(|(_, v)| *v)
}

/// Whether a lower-cased token negates what follows.
pub fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.contains("n't")
}

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("effing", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("flipping", B_INCR),
    ("freaking", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("hella", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sorta", B_DECR),
];
