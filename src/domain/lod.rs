// ============================================================
// Layer 3 — Level-of-Detail Tensor
// ============================================================
// A batch of variable-length word sequences stored without
// padding: one flat buffer of word indices plus the length of
// each sequence.
//
// Example with three sentences of length 3, 4 and 2:
//   data    = [a a a b b b b c c]
//   lengths = [3, 4, 2]
//   offsets = [0, 3, 7, 9]
//
// Invariant: lengths always sum to data.len(). Every constructor
// checks it, so a LodTensor that exists is well formed.
//
// Padding only happens later, in the batcher, when the sequences
// are turned into a dense model input.

use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LodTensor {
    data:    Vec<i64>,
    lengths: Vec<usize>,
}

impl LodTensor {
    /// Pack a list of sequences. Empty sequences are kept.
    pub fn from_sequences<S: AsRef<[i64]>>(sequences: &[S]) -> Self {
        let lengths: Vec<usize> = sequences.iter().map(|s| s.as_ref().len()).collect();
        let data: Vec<i64> = sequences
            .iter()
            .flat_map(|s| s.as_ref().iter().copied())
            .collect();
        Self { data, lengths }
    }

    /// Build from an already flattened buffer and per-sequence lengths.
    pub fn from_parts(data: Vec<i64>, lengths: Vec<usize>) -> Result<Self> {
        let total: usize = lengths.iter().sum();
        if total != data.len() {
            bail!(
                "LoD lengths sum to {total} but the buffer holds {} indices",
                data.len()
            );
        }
        Ok(Self { data, lengths })
    }

    pub fn num_sequences(&self) -> usize {
        self.lengths.len()
    }

    /// Flattened index count; equal to the sum of `lengths()`.
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Offset-based form of the lengths: `[0, l0, l0 + l1, ...]`.
    pub fn offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.lengths.len() + 1);
        let mut acc = 0usize;
        offsets.push(acc);
        for len in &self.lengths {
            acc += len;
            offsets.push(acc);
        }
        offsets
    }

    /// The `i`-th sequence, or `None` past the end.
    pub fn sequence(&self, i: usize) -> Option<&[i64]> {
        let len = *self.lengths.get(i)?;
        let start: usize = self.lengths[..i].iter().sum();
        Some(&self.data[start..start + len])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[i64]> + '_ {
        let mut start = 0usize;
        self.lengths.iter().map(move |&len| {
            let seq = &self.data[start..start + len];
            start += len;
            seq
        })
    }

    /// Length of the longest sequence, 0 for an empty batch.
    pub fn max_len(&self) -> usize {
        self.lengths.iter().copied().max().unwrap_or(0)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_sum_to_total() {
        let seqs: Vec<Vec<i64>> = vec![vec![1, 2, 3], vec![4], vec![], vec![5, 6]];
        let t = LodTensor::from_sequences(&seqs);
        assert_eq!(t.lengths(), &[3, 1, 0, 2]);
        assert_eq!(t.lengths().iter().sum::<usize>(), t.total_len());
        assert_eq!(t.total_len(), 6);
        assert_eq!(t.num_sequences(), 4);
    }

    #[test]
    fn test_single_word_and_empty_review() {
        let seqs: Vec<Vec<i64>> = vec![vec![7], vec![]];
        let t = LodTensor::from_sequences(&seqs);
        assert_eq!(t.lengths().iter().sum::<usize>(), t.data().len());
        assert_eq!(t.sequence(0), Some(&[7i64][..]));
        assert_eq!(t.sequence(1), Some(&[][..]));
        assert_eq!(t.sequence(2), None);
    }

    #[test]
    fn test_offsets() {
        let seqs: Vec<Vec<i64>> = vec![vec![0; 3], vec![0; 4], vec![0; 2]];
        let t = LodTensor::from_sequences(&seqs);
        assert_eq!(t.offsets(), vec![0, 3, 7, 9]);
        assert_eq!(t.max_len(), 4);
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        assert!(LodTensor::from_parts(vec![1, 2, 3], vec![1, 1]).is_err());
        assert!(LodTensor::from_parts(vec![1, 2, 3], vec![1, 2]).is_ok());
        assert!(LodTensor::from_parts(vec![], vec![0, 0]).is_ok());
    }

    #[test]
    fn test_iter_matches_input() {
        let seqs: Vec<Vec<i64>> = vec![vec![1, 2], vec![], vec![3]];
        let t = LodTensor::from_sequences(&seqs);
        let back: Vec<Vec<i64>> = t.iter().map(|s| s.to_vec()).collect();
        assert_eq!(back, seqs);
    }

    #[test]
    fn test_empty_batch() {
        let t = LodTensor::from_sequences::<Vec<i64>>(&[]);
        assert_eq!(t.num_sequences(), 0);
        assert_eq!(t.max_len(), 0);
        assert_eq!(t.offsets(), vec![0]);
    }
}
