// Approximate substring matching
//
// *La Correspondance* (The Match) - Bounded edit distance against any substring

/// Best approximate occurrence of a pattern inside a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Edit operations needed (insert, delete, substitute, adjacent swap)
    pub errors: usize,

    /// Start of the matched text window (inclusive)
    pub start: usize,

    /// End of the matched text window (exclusive)
    pub end: usize,
}

impl FuzzyMatch {
    /// Errors relative to the pattern length, in [0, 1]
    pub fn distance(&self, pattern_len: usize) -> f32 {
        if pattern_len == 0 {
            return 0.0;
        }
        (self.errors as f32 / pattern_len as f32).min(1.0)
    }
}

/// Find the occurrence of `pattern` in `text` with the fewest edits
///
/// This is semi-global optimal string alignment: leading and trailing text is
/// free, and each insertion, deletion, substitution or transposition of two
/// adjacent characters costs one error. Returns `None` when every window
/// needs more than `max_errors` edits. On ties the leftmost window wins.
///
/// Both sides must already be folded (see [`crate::query::NormalizedText`]).
pub fn find(pattern: &[char], text: &[char], max_errors: usize) -> Option<FuzzyMatch> {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return Some(FuzzyMatch {
            errors: 0,
            start: 0,
            end: 0,
        });
    }

    // Three DP rows (transpositions look two rows back), each paired with the
    // start offset of the text window that produced the cell's cost.
    let mut older: Vec<(usize, usize)> = vec![(0, 0); n + 1];
    let mut prev: Vec<(usize, usize)> = (0..=n).map(|j| (0, j)).collect();
    let mut curr: Vec<(usize, usize)> = vec![(0, 0); n + 1];
    let mut prev_row_min = 0;

    for i in 1..=m {
        curr[0] = (i, 0);
        let mut row_min = i;

        for j in 1..=n {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);

            let mut best = (prev[j - 1].0 + cost, prev[j - 1].1);
            if prev[j].0 + 1 < best.0 {
                best = (prev[j].0 + 1, prev[j].1);
            }
            if curr[j - 1].0 + 1 < best.0 {
                best = (curr[j - 1].0 + 1, curr[j - 1].1);
            }
            if i > 1
                && j > 1
                && pattern[i - 1] == text[j - 2]
                && pattern[i - 2] == text[j - 1]
                && older[j - 2].0 + 1 < best.0
            {
                best = (older[j - 2].0 + 1, older[j - 2].1);
            }

            curr[j] = best;
            row_min = row_min.min(best.0);
        }

        // Two consecutive rows over budget: no later row can come back under.
        if row_min > max_errors && prev_row_min > max_errors {
            return None;
        }
        prev_row_min = row_min;

        std::mem::swap(&mut older, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let (end, &(errors, start)) = prev
        .iter()
        .enumerate()
        .min_by_key(|(_, &(errors, _))| errors)?;

    if errors > max_errors {
        return None;
    }

    Some(FuzzyMatch { errors, start, end })
}
