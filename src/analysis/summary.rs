// src/analysis/summary.rs

// --- Imports ---
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

// --- Constants ---
const TOP_SECTIONS: usize = 10;
const TOP_WORDS: usize = 20;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+").expect("Failed to compile WORD_RE")
});

// NLTK's English stop-word list
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
        "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
        "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
        "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
        "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
        "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
        "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
        "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
        "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
        "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
        "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
        "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
        "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
        "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// One row of the sentence CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentenceRow {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Sentence")]
    pub sentence: String,
    #[serde(rename = "Section", default)]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSummary {
    pub total_sentences: usize,
    pub unique_files: usize,
    pub average_sentence_length: f64,
    pub sentences_per_file: Vec<(String, usize)>,
    /// Only filled when the input had a `Section` column.
    pub sentences_per_section: Option<Vec<(String, usize)>>,
    pub top_words: Vec<(String, usize)>,
}

/// Builds the dataset summary. `has_sections` tells whether the input
/// carried a `Section` column at all.
pub fn summarize(rows: &[SentenceRow], has_sections: bool) -> SentenceSummary {
    let total_sentences = rows.len();
    let average_sentence_length = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| r.sentence.chars().count()).sum::<usize>() as f64 / total_sentences as f64
    };

    let sentences_per_file = owned(count_ranked(rows.iter().map(|r| r.file_name.as_str())));
    let unique_files = sentences_per_file.len();

    let sentences_per_section = has_sections.then(|| {
        let mut ranked = count_ranked(rows.iter().filter_map(|r| r.section.as_deref()));
        ranked.truncate(TOP_SECTIONS);
        owned(ranked)
    });

    let mut top_words = count_ranked(rows.iter().flat_map(|r| content_words(&r.sentence)));
    top_words.truncate(TOP_WORDS);

    SentenceSummary {
        total_sentences,
        unique_files,
        average_sentence_length,
        sentences_per_file,
        sentences_per_section,
        top_words,
    }
}

/// Lowercased alphabetic words with English stop-words removed.
pub fn content_words(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.chars().all(char::is_alphabetic))
        .filter(|w| !STOPWORDS.contains(*w))
        .map(str::to_string)
        .collect()
}

// Counts by value, most frequent first; ties keep first-seen order
fn count_ranked<T, I>(items: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: std::hash::Hash + Eq,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first))| (item, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().map(|(item, count, _)| (item, count)).collect()
}

fn owned(ranked: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    ranked.into_iter().map(|(item, count)| (item.to_string(), count)).collect()
}

impl SentenceSummary {
    /// Plain-text report, as written to the summary file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nBasic Dataset Summary:");
        let _ = writeln!(out, "  Total Sentences: {}", self.total_sentences);
        let _ = writeln!(out, "  Unique Files: {}", self.unique_files);
        let _ = writeln!(out, "  Average Sentence Length: {:.2} characters", self.average_sentence_length);

        let _ = writeln!(out, "\nSentences per File:");
        for (file, count) in &self.sentences_per_file {
            let _ = writeln!(out, "{}: {}", file, count);
        }

        if let Some(sections) = &self.sentences_per_section {
            let _ = writeln!(out, "\nSentences per Section:");
            for (section, count) in sections {
                let _ = writeln!(out, "{}: {}", section, count);
            }
        }

        let _ = writeln!(out, "\nMost Common Words (Excluding Stopwords):");
        for (word, count) in &self.top_words {
            let _ = writeln!(out, "{}: {}", word, count);
        }
        out
    }
}
