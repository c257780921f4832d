//! Candidate generator: the space of all binary vectors of length N.
//!
//! Every index `k` in `[0, 2^N)` maps to exactly one [`Assignment`], so the
//! space can be split into disjoint index ranges and consumed by several
//! workers without any shared iterator state.

use std::ops::Range;

use crate::assignment::Assignment;
use crate::error::{Result, SiteForgeError};

/// Largest site count whose candidate space `2^N` fits in a `u64`.
pub const MAX_SITES: usize = 63;

/// The candidate space for N sites.
///
/// # Examples
///
/// ```
/// use siteforge_core::CandidateSpace;
///
/// let space = CandidateSpace::new(3).unwrap();
/// assert_eq!(space.size(), 8);
///
/// let bits: Vec<String> = space.iter().map(|a| a.to_string()).collect();
/// assert_eq!(bits[0], "0, 0, 0");
/// assert_eq!(bits[1], "1, 0, 0");
/// assert_eq!(bits[7], "1, 1, 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSpace {
    n: usize,
}

impl CandidateSpace {
    /// Creates the candidate space for `n` sites.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] if `n` exceeds [`MAX_SITES`].
    pub fn new(n: usize) -> Result<Self> {
        if n > MAX_SITES {
            return Err(SiteForgeError::InvalidInput(format!(
                "{} sites exceed the exhaustive search limit of {}",
                n, MAX_SITES
            )));
        }
        Ok(Self { n })
    }

    /// Returns the number of sites N.
    #[inline]
    pub fn site_count(&self) -> usize {
        self.n
    }

    /// Returns the number of candidates, `2^N`.
    #[inline]
    pub fn size(&self) -> u64 {
        1u64 << self.n
    }

    /// Returns the candidate at `index`, or `None` past the end.
    pub fn get(&self, index: u64) -> Option<Assignment> {
        (index < self.size()).then(|| Assignment::from_index(index, self.n))
    }

    /// Iterates over every candidate in binary counting order.
    pub fn iter(&self) -> CandidateIter {
        self.range(0..self.size())
    }

    /// Iterates over the candidates whose indices fall in `range`.
    ///
    /// The range is clamped to the space.
    pub fn range(&self, range: Range<u64>) -> CandidateIter {
        let end = range.end.min(self.size());
        CandidateIter {
            n: self.n,
            next: range.start.min(end),
            end,
        }
    }

    /// Splits the index space into contiguous ranges of at most `chunk_size`.
    ///
    /// The ranges are disjoint and together cover `[0, 2^N)` exactly once.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn chunks(&self, chunk_size: u64) -> impl Iterator<Item = Range<u64>> {
        let space = *self;
        (0..self.chunk_count(chunk_size)).map(move |c| space.chunk(c, chunk_size))
    }

    /// Returns how many ranges [`chunks`](Self::chunks) yields.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[inline]
    pub fn chunk_count(&self, chunk_size: u64) -> u64 {
        assert!(chunk_size > 0, "chunk size must be positive");
        self.size().div_ceil(chunk_size)
    }

    /// Returns the index range of chunk number `chunk`.
    ///
    /// Workers can compute their own ranges from a chunk number alone.
    #[inline]
    pub fn chunk(&self, chunk: u64, chunk_size: u64) -> Range<u64> {
        let size = self.size();
        let start = chunk.saturating_mul(chunk_size).min(size);
        start..start.saturating_add(chunk_size).min(size)
    }
}

impl IntoIterator for CandidateSpace {
    type Item = Assignment;
    type IntoIter = CandidateIter;

    fn into_iter(self) -> CandidateIter {
        self.iter()
    }
}

/// Lazy iterator over a range of candidate indices.
///
/// Finite and single-pass; call [`CandidateSpace::iter`] again to restart.
#[derive(Debug, Clone)]
pub struct CandidateIter {
    n: usize,
    next: u64,
    end: u64,
}

impl Iterator for CandidateIter {
    type Item = Assignment;

    #[inline]
    fn next(&mut self) -> Option<Assignment> {
        if self.next >= self.end {
            return None;
        }
        let assignment = Assignment::from_index(self.next, self.n);
        self.next += 1;
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(r) => (r, Some(r)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(CandidateSpace::new(0).unwrap().size(), 1);
        assert_eq!(CandidateSpace::new(4).unwrap().size(), 16);
        assert_eq!(CandidateSpace::new(MAX_SITES).unwrap().size(), 1 << 63);
    }

    #[test]
    fn test_too_many_sites() {
        let err = CandidateSpace::new(MAX_SITES + 1).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_iter_visits_every_vector_once() {
        let space = CandidateSpace::new(5).unwrap();
        let seen: HashSet<Vec<u8>> = space.iter().map(|a| a.to_bits()).collect();
        assert_eq!(seen.len(), 32);
        assert!(space.iter().all(|a| a.len() == 5));
    }

    #[test]
    fn test_empty_space_has_single_empty_candidate() {
        let space = CandidateSpace::new(0).unwrap();
        let all: Vec<Assignment> = space.iter().collect();
        assert_eq!(all, vec![Assignment::default()]);
    }

    #[test]
    fn test_range_is_clamped() {
        let space = CandidateSpace::new(2).unwrap();
        assert_eq!(space.range(2..100).count(), 2);
        assert_eq!(space.range(10..20).count(), 0);
        assert_eq!(space.range(3..1).count(), 0);
    }

    #[test]
    fn test_get() {
        let space = CandidateSpace::new(3).unwrap();
        assert_eq!(space.get(6).unwrap().to_bits(), vec![0, 1, 1]);
        assert!(space.get(8).is_none());
    }

    #[test]
    fn test_chunks_cover_space() {
        let space = CandidateSpace::new(5).unwrap();
        let chunks: Vec<Range<u64>> = space.chunks(7).collect();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0], 0..7);
        assert_eq!(chunks[4], 28..32);

        let covered: u64 = chunks.iter().map(|r| r.end - r.start).sum();
        assert_eq!(covered, 32);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_chunked_ranges_match_full_iteration() {
        let space = CandidateSpace::new(6).unwrap();
        let chunked: Vec<Assignment> = space.chunks(5).flat_map(|r| space.range(r)).collect();
        let full: Vec<Assignment> = space.iter().collect();
        assert_eq!(chunked, full);
    }

    #[test]
    fn test_size_hint() {
        let space = CandidateSpace::new(4).unwrap();
        let mut iter = space.iter();
        assert_eq!(iter.size_hint(), (16, Some(16)));
        iter.next();
        assert_eq!(iter.size_hint(), (15, Some(15)));
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_zero_chunk_size() {
        let space = CandidateSpace::new(2).unwrap();
        let _ = space.chunks(0).count();
    }
}
