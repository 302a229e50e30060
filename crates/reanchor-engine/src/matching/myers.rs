//! Myers' bit-parallel edit distance, extended to patterns longer than one
//! machine word by processing the pattern in 32-row blocks.
//!
//! Each text character advances only the blocks that can still produce a
//! match within the error budget (`0..=y`). The window grows when the bottom
//! active block is under budget and shrinks when it is hopelessly over, so
//! total work is roughly `O(max_errors / 32 * text.len())`.

use std::collections::HashMap;

use super::MatchEnd;

/// Bits per block.
pub(crate) const WORD: usize = 32;

/// Per-character bitmasks marking where that character occurs in the pattern.
struct PatternMasks {
    /// `masks[0]` is the all-zero mask for characters absent from the pattern.
    masks: Vec<Vec<u32>>,
    /// Direct lookup for small code points.
    ascii: [usize; 256],
    others: HashMap<char, usize>,
}

impl PatternMasks {
    fn new(pattern: &[char], blocks: usize) -> Self {
        let mut this = Self {
            masks: vec![vec![0; blocks]],
            ascii: [0; 256],
            others: HashMap::new(),
        };
        for (row, &ch) in pattern.iter().enumerate() {
            let index = match this.index_of(ch) {
                0 => {
                    this.masks.push(vec![0; blocks]);
                    let index = this.masks.len() - 1;
                    match u8::try_from(u32::from(ch)) {
                        Ok(small) => this.ascii[usize::from(small)] = index,
                        Err(_) => {
                            this.others.insert(ch, index);
                        }
                    }
                    index
                }
                existing => existing,
            };
            this.masks[index][row / WORD] |= 1 << (row % WORD);
        }
        this
    }

    fn index_of(&self, ch: char) -> usize {
        match u8::try_from(u32::from(ch)) {
            Ok(small) => self.ascii[usize::from(small)],
            Err(_) => self.others.get(&ch).copied().unwrap_or(0),
        }
    }

    fn lookup(&self, ch: char) -> &[u32] {
        &self.masks[self.index_of(ch)]
    }
}

/// Vertical delta vectors for every block of the current text column.
struct Blocks {
    p: Vec<u32>,
    m: Vec<u32>,
    /// Bit of the last pattern row inside each block.
    last_row_mask: Vec<u32>,
}

impl Blocks {
    fn new(blocks: usize, pattern_len: usize) -> Self {
        let mut last_row_mask = vec![1 << (WORD - 1); blocks];
        last_row_mask[blocks - 1] = 1 << ((pattern_len - 1) % WORD);
        Self {
            p: vec![0; blocks],
            m: vec![0; blocks],
            last_row_mask,
        }
    }

    fn reset(&mut self, block: usize) {
        self.p[block] = !0;
        self.m[block] = 0;
    }

    /// Advance `block` by one text column.
    ///
    /// `h_in` is the horizontal delta (-1, 0 or 1) carried in from the block
    /// above; the return value is the delta carried out of the block's last
    /// row, i.e. the change in that row's score.
    fn advance(&mut self, peq: &[u32], block: usize, h_in: i32) -> i32 {
        let mut pv = self.p[block];
        let mut mv = self.m[block];
        let h_in_negative = u32::from(h_in < 0);
        let eq = peq[block] | h_in_negative;

        // Horizontal deltas.
        let xv = eq | mv;
        let xh = ((eq & pv).wrapping_add(pv) ^ pv) | eq;
        let mut ph = mv | !(xh | pv);
        let mut mh = pv & xh;

        let last = self.last_row_mask[block];
        let h_out = i32::from(ph & last != 0) - i32::from(mh & last != 0);

        // Vertical deltas for the next column.
        ph <<= 1;
        mh <<= 1;
        mh |= h_in_negative;
        ph |= u32::from(h_in > 0);

        pv = mh | !(xv | ph);
        mv = ph & xv;

        self.p[block] = pv;
        self.m[block] = mv;
        h_out
    }
}

/// End offsets of every lowest-cost occurrence of `pattern` in `text` with at
/// most `max_errors` edits.
///
/// Only matches sharing the minimum error count are returned: finding a
/// cheaper match discards everything recorded so far and tightens the budget
/// for the rest of the scan. Empty patterns never match.
pub fn find_match_ends(text: &[char], pattern: &[char], max_errors: usize) -> Vec<MatchEnd> {
    if pattern.is_empty() {
        return Vec::new();
    }

    // Keeps the `max_errors` row and the last pattern row in reach of the
    // block window below.
    let mut max_errors = max_errors.min(pattern.len()) as i64;
    let word = WORD as i64;

    let blocks = pattern.len().div_ceil(WORD);
    let b_max = blocks - 1;

    let peq = PatternMasks::new(pattern, blocks);
    let mut state = Blocks::new(blocks, pattern.len());

    // Deepest block processed for the current column.
    let mut y = (max_errors as usize).div_ceil(WORD).saturating_sub(1);

    // Score of the last row of each block.
    let mut score = vec![0i64; blocks];
    for (b, s) in score.iter_mut().enumerate().take(y + 1) {
        *s = (b as i64 + 1) * word;
    }
    score[b_max] = pattern.len() as i64;
    for b in 0..=y {
        state.reset(b);
    }

    let mut matches = Vec::new();
    for (j, &ch) in text.iter().enumerate() {
        let char_peq = peq.lookup(ch);

        let mut carry = 0;
        for b in 0..=y {
            carry = state.advance(char_peq, b, carry);
            score[b] += i64::from(carry);
        }

        if score[y] - i64::from(carry) <= max_errors
            && y < b_max
            && (char_peq[y + 1] & 1 != 0 || carry < 0)
        {
            // Bottom block is under budget: bring the next one into the window.
            y += 1;
            state.reset(y);

            let block_rows = if y == b_max {
                match pattern.len() % WORD {
                    0 => WORD,
                    rem => rem,
                }
            } else {
                WORD
            };
            let h_out = state.advance(char_peq, y, carry);
            score[y] = score[y - 1] + block_rows as i64 - i64::from(carry) + i64::from(h_out);
        } else {
            while y > 0 && score[y] >= max_errors + word {
                y -= 1;
            }
        }

        if y == b_max && score[y] <= max_errors {
            if score[y] < max_errors {
                matches.clear();
            }
            matches.push(MatchEnd {
                end: j + 1,
                errors: score[y] as usize,
            });
            max_errors = score[y];
        }
    }

    matches
}
