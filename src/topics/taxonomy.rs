//! Topic taxonomy: ordered topics with their filter labels, icons and keywords.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a taxonomy from user data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("topic #{index} has an empty tag")]
    EmptyTag { index: usize },
    #[error("topic tag '{tag}' appears more than once")]
    DuplicateTag { tag: String },
    #[error("topic '{tag}' has no keywords")]
    NoKeywords { tag: String },
    #[error("taxonomy contains no topics")]
    Empty,
}

/// One research topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable identifier, used as CSS class and `data-*` attribute name.
    pub tag: String,
    /// Button label in the topic filter bar.
    pub label: String,
    /// Font Awesome icon class (without the `fas` prefix).
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Lower-cased keyword phrases, any of which assigns the topic.
    pub keywords: Vec<String>,
}

fn default_icon() -> String {
    "fa-tag".to_string()
}

/// Ordered topic list. Order drives both classification output and the
/// filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicTaxonomy {
    topics: Vec<Topic>,
}

impl TopicTaxonomy {
    /// Validates `topics` and lower-cases their keywords.
    ///
    /// # Errors
    /// [`TaxonomyError`] on an empty list, empty or duplicate tags, or a
    /// topic without keywords.
    pub fn new(topics: Vec<Topic>) -> Result<Self, TaxonomyError> {
        if topics.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(topics.len());
        for (index, topic) in topics.into_iter().enumerate() {
            let tag = topic.tag.trim().to_string();
            if tag.is_empty() {
                return Err(TaxonomyError::EmptyTag { index });
            }
            if !seen.insert(tag.clone()) {
                return Err(TaxonomyError::DuplicateTag { tag });
            }
            let keywords: Vec<String> = topic
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(TaxonomyError::NoKeywords { tag });
            }
            normalized.push(Topic {
                tag,
                label: topic.label,
                icon: topic.icon,
                keywords,
            });
        }
        Ok(Self { topics: normalized })
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Looks up a topic by tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.tag == tag)
    }
}

const DEFAULT_TOPICS: &[(&str, &str, &str, &[&str])] = &[
    (
        "deep-learning",
        "Deep Learning",
        "fa-brain",
        &[
            "deep learning",
            "neural network",
            "cnn",
            "rnn",
            "lstm",
            "transformer",
            "attention",
            "gnn",
            "graph neural",
            "convolution",
            "deep",
            "learning model",
        ],
    ),
    (
        "machine-learning",
        "Machine Learning",
        "fa-cogs",
        &[
            "machine learning",
            "classification",
            "clustering",
            "regression",
            "supervised",
            "unsupervised",
            "ensemble",
            "random forest",
            "svm",
        ],
    ),
    (
        "reinforcement-learning",
        "Reinforcement Learning",
        "fa-sync-alt",
        &[
            "reinforcement learning",
            "q-learning",
            "policy",
            "reward",
            "agent",
            "multi-armed bandit",
            "thompson sampling",
            "drl",
            "deep reinforcement",
        ],
    ),
    (
        "time-series",
        "Time Series",
        "fa-chart-line",
        &[
            "time series",
            "temporal",
            "forecasting",
            "prediction",
            "sequential",
            "arima",
            "spatiotemporal",
            "passenger flow",
            "traffic",
        ],
    ),
    (
        "anomaly-detection",
        "Anomaly Detection",
        "fa-search",
        &[
            "anomaly detection",
            "change detection",
            "outlier",
            "monitoring",
            "fault detection",
            "defect",
            "quality control",
        ],
    ),
    (
        "causal-inference",
        "Causal Inference",
        "fa-project-diagram",
        &[
            "causal",
            "causality",
            "dag",
            "directed acyclic",
            "causal discovery",
            "causal graph",
            "intervention",
        ],
    ),
    (
        "bayesian-methods",
        "Bayesian Methods",
        "fa-calculator",
        &[
            "bayesian",
            "prior",
            "posterior",
            "mcmc",
            "bayesian network",
            "probabilistic",
            "belief network",
        ],
    ),
    (
        "tensor-methods",
        "Tensor Methods",
        "fa-cube",
        &[
            "tensor",
            "tensor decomposition",
            "tucker",
            "cp decomposition",
            "tensor completion",
            "tensor factorization",
        ],
    ),
    (
        "functional-data",
        "Functional Data",
        "fa-wave-square",
        &[
            "functional data",
            "functional",
            "profile",
            "curve",
            "fda",
            "functional principal component",
        ],
    ),
    (
        "graph-learning",
        "Graph Learning",
        "fa-share-alt",
        &[
            "graph",
            "network",
            "community detection",
            "graph learning",
            "relational",
            "node",
            "edge",
            "connectivity",
        ],
    ),
    (
        "statistical-modeling",
        "Statistical Modeling",
        "fa-chart-bar",
        &[
            "statistical",
            "regression",
            "hypothesis",
            "significance",
            "inference",
            "estimation",
            "anova",
            "glm",
        ],
    ),
    (
        "optimization",
        "Optimization",
        "fa-bullseye",
        &[
            "optimization",
            "bilevel",
            "constraint",
            "objective function",
            "linear programming",
            "convex",
            "optimization problem",
        ],
    ),
    (
        "transportation",
        "Transportation",
        "fa-car",
        &[
            "metro",
            "subway",
            "transportation",
            "traffic",
            "urban",
            "passenger",
            "mobility",
            "transit",
        ],
    ),
    (
        "manufacturing",
        "Manufacturing",
        "fa-industry",
        &[
            "manufacturing",
            "production",
            "industrial",
            "semiconductor",
            "assembly",
            "supply chain",
            "remanufacturing",
        ],
    ),
    (
        "medical-ai",
        "Medical AI",
        "fa-heartbeat",
        &[
            "medical",
            "clinical",
            "diagnosis",
            "patient",
            "healthcare",
            "disease",
            "immunofixation",
            "glaucoma",
        ],
    ),
    (
        "llms",
        "LLMs",
        "fa-robot",
        &[
            "large language model",
            "large language models",
            "llm",
            "llms",
            "language model",
            "gpt",
            "bert",
            "natural language",
            "nlp",
            "text generation",
            "language understanding",
        ],
    ),
];

impl Default for TopicTaxonomy {
    /// The lab's sixteen research topics.
    fn default() -> Self {
        let topics = DEFAULT_TOPICS
            .iter()
            .map(|(tag, label, icon, keywords)| Topic {
                tag: (*tag).to_string(),
                label: (*label).to_string(),
                icon: (*icon).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self { topics }
    }
}

/// Substring rules mapping a venue string to a [`super::VenueCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRules {
    pub conference_keywords: Vec<String>,
    pub journal_keywords: Vec<String>,
}

impl Default for VenueRules {
    fn default() -> Self {
        Self {
            conference_keywords: ["conference", "proceedings", "aaai", "ijcai", "kdd", "ecml"]
                .map(String::from)
                .to_vec(),
            journal_keywords: ["journal", "transactions", "technometrics"]
                .map(String::from)
                .to_vec(),
        }
    }
}
