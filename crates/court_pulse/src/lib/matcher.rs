//! # Player Name Matcher
//!
//! Caption tracks routinely mangle player names ("Yokic", "Giannis
//! Antetokounmpo" split into odd fragments). Capitalised words in the
//! transcript are compared against the roster with a token-set similarity
//! score and swapped for the best roster name when the score is high enough.

use std::collections::{BTreeSet, HashMap};

/// Minimum [`token_set_ratio`] score for a word to be replaced by a player name
pub const MATCH_THRESHOLD: u8 = 80;

/// Similarity in `0..=100` based on the longest common subsequence, i.e.
/// `2 * LCS / (len(a) + len(b))` rounded half to even.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    let a = a.chars().collect::<Vec<_>>();
    let b = b.chars().collect::<Vec<_>>();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let score = 200.0 * lcs as f64 / (a.len() + b.len()) as f64;

    score.round_ties_even() as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Drops Latin-1 supplement characters, then lowercases and replaces
/// everything but word characters with spaces. Transcripts have already lost
/// their non-ASCII letters, so "Schröder" must compare as "schrder".
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Order-insensitive similarity that scores 100 whenever the tokens of one
/// string are a subset of the other's, so "Davis" fully matches "Anthony Davis".
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tokens_a = a.split_whitespace().collect::<BTreeSet<_>>();
    let tokens_b = b.split_whitespace().collect::<BTreeSet<_>>();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let sect = join(tokens_a.intersection(&tokens_b).copied().collect());
    let diff_ab = join(tokens_a.difference(&tokens_b).copied().collect());
    let diff_ba = join(tokens_b.difference(&tokens_a).copied().collect());

    let combined_ab = format!("{sect} {diff_ab}").trim().to_string();
    let combined_ba = format!("{sect} {diff_ba}").trim().to_string();

    [
        ratio(&sect, &combined_ab),
        ratio(&sect, &combined_ba),
        ratio(&combined_ab, &combined_ba),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Mirrors Python's `str.istitle`: every cased run starts with exactly one
/// uppercase letter, and there is at least one cased letter.
pub fn is_title_case(word: &str) -> bool {
    let mut cased_seen = false;
    let mut prev_cased = false;

    for c in word.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else {
            prev_cased = false;
        }
    }

    cased_seen
}

/// Returns the first name with the best score, provided it clears `threshold`
pub fn find_closest_player_name<'a>(
    word: &str,
    names: &'a [String],
    threshold: u8,
) -> Option<&'a str> {
    let mut best: Option<(&str, u8)> = None;

    for name in names {
        let score = token_set_ratio(word, name);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((name, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(name, _)| name)
}

/// Outcome of a correction pass over a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub text: String,
    pub replaced_words: usize,
}

/// Replaces capitalised transcript words with the closest roster name
#[derive(Debug, Clone)]
pub struct NameCorrector {
    names: Vec<String>,
    threshold: u8,
}

impl NameCorrector {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            threshold: MATCH_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[tracing::instrument(skip_all, fields(names = self.names.len(), threshold = self.threshold))]
    pub fn correct(&self, text: &str) -> Correction {
        if self.names.is_empty() {
            return Correction {
                text: text.to_string(),
                replaced_words: 0,
            };
        }

        // captions repeat the same names constantly, so score each word once
        let mut memo: HashMap<&str, Option<&str>> = HashMap::new();
        let mut replaced_words = 0;
        let mut corrected = Vec::new();

        for word in text.split_whitespace() {
            if !is_title_case(word) {
                corrected.push(word);
                continue;
            }

            let matched = *memo
                .entry(word)
                .or_insert_with(|| find_closest_player_name(word, &self.names, self.threshold));

            match matched {
                Some(name) => {
                    if name != word {
                        tracing::trace!(word, name, "Corrected player name");
                    }
                    replaced_words += 1;
                    corrected.push(name);
                }
                None => corrected.push(word),
            }
        }

        Correction {
            text: corrected.join(" "),
            replaced_words,
        }
    }
}

/// Convenience wrapper around [`NameCorrector`] with the default threshold
pub fn correct_player_names(text: &str, names: &[String]) -> String {
    NameCorrector::new(names.to_vec()).correct(text).text
}
