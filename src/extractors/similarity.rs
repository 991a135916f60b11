// src/extractors/similarity.rs

// --- Imports ---
use std::collections::HashMap;

/// Approximate string similarity on a 0–100 scale.
///
/// Implementations must be total: any two strings, empty ones included,
/// produce a score and never panic.
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Partial-ratio scoring: the shorter string is slid across the longer one and
/// the best-aligned window decides the score.
///
/// Each window is scored with the Indel similarity `2 * LCS / (len_a + len_b)`.
/// Windows of the needle's length are tried at every offset, and the shorter
/// prefix/suffix windows at both edges are tried as well, so a needle that is
/// cut off by the start or end of the haystack can still align.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        partial_ratio(&needle, &haystack)
    }
}

fn partial_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();

    let forward = BitLcs::new(needle);
    let codes = forward.encode(haystack);
    let mut best = 0.0_f64;

    // Prefix windows haystack[..k], k < m, fall out of a single incremental pass.
    let mut state = forward.start();
    for (k, code) in codes.iter().take(m - 1).enumerate() {
        forward.step(&mut state, *code);
        best = best.max(similarity(forward.count(&state), m + k + 1));
    }

    // Full-length windows. A window whose first char is absent from the needle
    // never beats the window one step to its right (or the suffix windows).
    for start in 0..=(n - m) {
        if codes[start].is_none() {
            continue;
        }
        let score = similarity(forward.lcs(&codes[start..start + m]), 2 * m);
        if score > best {
            best = score;
            if best >= 100.0 {
                return 100.0;
            }
        }
    }

    // Suffix windows haystack[n-k..], k < m, via LCS of the reversed strings.
    if m > 1 {
        let reversed_needle: Vec<char> = needle.iter().rev().copied().collect();
        let backward = BitLcs::new(&reversed_needle);
        let mut state = backward.start();
        for (k, ch) in haystack.iter().rev().take(m - 1).enumerate() {
            backward.step(&mut state, backward.code(ch));
            best = best.max(similarity(backward.count(&state), m + k + 1));
        }
    }

    best
}

fn similarity(lcs: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 0.0;
    }
    200.0 * lcs as f64 / total_len as f64
}

/// Bit-parallel LCS length (Hyyrö) for a fixed pattern, using as many
/// 64-bit words as the pattern needs.
struct BitLcs {
    len: usize,
    words: usize,
    alphabet: HashMap<char, usize>,
    masks: Vec<Vec<u64>>,
}

impl BitLcs {
    fn new(pattern: &[char]) -> Self {
        let len = pattern.len();
        let words = len.div_ceil(64).max(1);
        let mut alphabet = HashMap::new();
        let mut masks: Vec<Vec<u64>> = Vec::new();

        for (i, ch) in pattern.iter().enumerate() {
            let idx = *alphabet.entry(*ch).or_insert_with(|| {
                masks.push(vec![0u64; words]);
                masks.len() - 1
            });
            masks[idx][i / 64] |= 1u64 << (i % 64);
        }

        Self { len, words, alphabet, masks }
    }

    fn code(&self, ch: &char) -> Option<usize> {
        self.alphabet.get(ch).copied()
    }

    fn encode(&self, text: &[char]) -> Vec<Option<usize>> {
        text.iter().map(|ch| self.code(ch)).collect()
    }

    fn start(&self) -> Vec<u64> {
        vec![!0u64; self.words]
    }

    // V' = (V + (V & M)) | (V & !M), carried across words
    fn step(&self, state: &mut [u64], code: Option<usize>) {
        let Some(idx) = code else { return };
        let mask = &self.masks[idx];
        let mut carry = 0u64;
        for (v, m) in state.iter_mut().zip(mask.iter()) {
            let u = *v & *m;
            let (sum, c1) = v.overflowing_add(u);
            let (sum, c2) = sum.overflowing_add(carry);
            carry = u64::from(c1 || c2);
            *v = sum | (*v & !*m);
        }
    }

    fn count(&self, state: &[u64]) -> usize {
        let mut zeros = 0usize;
        for (w, v) in state.iter().enumerate() {
            let bits = (self.len - w * 64).min(64);
            let live = if bits == 64 { !0u64 } else { (1u64 << bits) - 1 };
            zeros += (!*v & live).count_ones() as usize;
        }
        zeros
    }

    fn lcs(&self, codes: &[Option<usize>]) -> usize {
        let mut state = self.start();
        for code in codes {
            self.step(&mut state, *code);
        }
        self.count(&state)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn lcs_dp(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                dp[i][j] = if a[i - 1] == b[j - 1] {
                    dp[i - 1][j - 1] + 1
                } else {
                    dp[i - 1][j].max(dp[i][j - 1])
                };
            }
        }
        dp[a.len()][b.len()]
    }

    #[test]
    fn empty_inputs_score_zero() {
        let scorer = PartialRatio;
        assert_eq!(scorer.score("", ""), 0.0);
        assert_eq!(scorer.score("", "name of element"), 0.0);
        assert_eq!(scorer.score("name of element", ""), 0.0);
    }

    #[test]
    fn embedded_needle_scores_full() {
        let scorer = PartialRatio;
        let text = "1. title of the element: the art of falconry (tab 2)";
        assert_eq!(scorer.score(text, "title of the element"), 100.0);
        assert_eq!(scorer.score("title of the element", text), 100.0);
    }

    #[test]
    fn identical_strings_score_full() {
        assert_eq!(PartialRatio.score("documentation", "documentation"), 100.0);
    }

    #[test]
    fn unrelated_text_scores_low() {
        let score = PartialRatio.score(
            "this document discusses heritage practices broadly.",
            "name of element",
        );
        assert!(score < 85.0, "unexpected score {score}");
    }

    #[test]
    fn needle_cut_off_at_edge_uses_edge_windows() {
        // "elemen" is a suffix window of the haystack against "element"
        let score = PartialRatio.score("the name of the elemen", "element");
        let expected = 200.0 * 6.0 / 13.0;
        assert!((score - expected).abs() < 1e-9, "score {score}");
    }

    #[test]
    fn bit_parallel_lcs_agrees_with_dynamic_programming() {
        let samples = [
            ("safeguarding measures proposed", "planned safeguarding efforts"),
            ("community involvement and consent", "free, prior and informed consent"),
            ("abcabcabc", "cbacbacba"),
            ("x", "yyyy"),
        ];
        for (a, b) in samples {
            let pattern: Vec<char> = a.chars().collect();
            let text: Vec<char> = b.chars().collect();
            let matcher = BitLcs::new(&pattern);
            assert_eq!(matcher.lcs(&matcher.encode(&text)), lcs_dp(a, b), "{a} / {b}");
        }
    }

    #[test]
    fn bit_parallel_lcs_spans_multiple_words() {
        let long_pattern = "brief statement of the viability of the element, its need for safeguarding and the proposed safeguarding measures";
        let text = "the viability of the element is weak and its need for safeguarding is urgent; the proposed measures follow";
        let pattern: Vec<char> = long_pattern.chars().collect();
        assert!(pattern.len() > 64);
        let matcher = BitLcs::new(&pattern);
        let codes = matcher.encode(&text.chars().collect::<Vec<_>>());
        assert_eq!(matcher.lcs(&codes), lcs_dp(long_pattern, text));
    }

    #[test]
    fn scoring_is_symmetric_in_argument_order() {
        let a = "contact person for correspondence";
        let b = "annex: correspondence contact and primary contact details";
        assert_eq!(PartialRatio.score(a, b), PartialRatio.score(b, a));
    }
}
