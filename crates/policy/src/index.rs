use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use peopleops_core::PolicyId;

use crate::document::PolicyDocument;

/// Sparse term-frequency vector: lowercase token → occurrence count.
pub type TermVector = HashMap<String, u32>;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new("[a-zA-Z]{2,}").expect("token pattern is valid"))
}

/// Lowercase alphabetic tokens of length ≥ 2, counted.
pub fn tokenize(text: &str) -> TermVector {
    let lowered = text.to_lowercase();
    let mut counts = TermVector::new();
    for token in token_regex().find_iter(&lowered) {
        *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity between two term-frequency vectors, in [0, 1].
///
/// Dot product over shared terms divided by the product of Euclidean norms;
/// 0 when either vector is empty.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, &count)| b.get(term).map(|&other| f64::from(count) * f64::from(other)))
        .sum();

    let norm = |v: &TermVector| -> f64 {
        v.values()
            .map(|&count| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt()
    };

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Per-document term vectors, built once at startup.
#[derive(Debug)]
pub struct PolicyIndex {
    vectors: HashMap<PolicyId, TermVector>,
}

impl PolicyIndex {
    /// Index every document over the concatenation of its searchable fields.
    pub fn build(documents: &[PolicyDocument]) -> Self {
        let vectors = documents
            .iter()
            .map(|doc| {
                let haystack = format!(
                    "{} {} {} {} {}",
                    doc.title,
                    doc.category,
                    doc.audience,
                    doc.content,
                    doc.tags.join(" ")
                );
                (doc.policy_id.clone(), tokenize(&haystack))
            })
            .collect();
        Self { vectors }
    }

    pub fn vector(&self, policy_id: &PolicyId) -> Option<&TermVector> {
        self.vectors.get(policy_id)
    }
}
