//! Binary site-selection vectors.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{Result, SiteForgeError};

/// Inline capacity; exhaustive search never gets far past this many sites.
const INLINE_SITES: usize = 32;

/// One 0/1 decision per site, indexed by site id.
///
/// Assignments are values: the search builds a fresh one per candidate and
/// replaces the incumbent wholesale, never editing one in place.
///
/// # Examples
///
/// ```
/// use siteforge_core::Assignment;
///
/// let assignment = Assignment::from_bits(&[0, 1, 1, 0]).unwrap();
/// assert_eq!(assignment.len(), 4);
/// assert_eq!(assignment.selected_count(), 2);
/// assert_eq!(assignment.selected_sites().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(assignment.to_string(), "0, 1, 1, 0");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Assignment {
    decisions: SmallVec<[bool; INLINE_SITES]>,
}

impl Assignment {
    /// Maps a candidate index to its assignment.
    ///
    /// Bit `i` of `index` is the decision for site `i`, so the result is the
    /// binary representation of `index` zero-padded to `n` sites. Bits at or
    /// above `n` are ignored.
    #[inline]
    pub fn from_index(index: u64, n: usize) -> Self {
        Self {
            decisions: (0..n)
                .map(|site| site < 64 && (index >> site) & 1 == 1)
                .collect(),
        }
    }

    /// Builds an assignment from explicit 0/1 values.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] for any value other than 0 or 1.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        bits.iter()
            .enumerate()
            .map(|(site, &bit)| match bit {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(SiteForgeError::InvalidInput(format!(
                    "decision for site {} must be 0 or 1, got {}",
                    site, other
                ))),
            })
            .collect::<Result<SmallVec<_>>>()
            .map(|decisions| Self { decisions })
    }

    /// Builds an assignment of `n` sites with the given sites selected.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] if a site is not below `n`.
    pub fn from_selected(n: usize, sites: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut decisions: SmallVec<[bool; INLINE_SITES]> = SmallVec::from_elem(false, n);
        for site in sites {
            let slot = decisions.get_mut(site).ok_or_else(|| {
                SiteForgeError::InvalidInput(format!(
                    "site {} out of range for {} sites",
                    site, n
                ))
            })?;
            *slot = true;
        }
        Ok(Self { decisions })
    }

    /// Returns the number of sites.
    #[inline]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Returns true if the assignment covers no sites.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Returns whether `site` is selected, or `None` if out of range.
    #[inline]
    pub fn get(&self, site: usize) -> Option<bool> {
        self.decisions.get(site).copied()
    }

    /// Returns the decisions as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.decisions
    }

    /// Returns the number of selected sites.
    #[inline]
    pub fn selected_count(&self) -> usize {
        self.decisions.iter().filter(|&&d| d).count()
    }

    /// Iterates over the ids of the selected sites in ascending order.
    pub fn selected_sites(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter_map(|(site, &d)| d.then_some(site))
    }

    /// Returns the decisions as 0/1 values.
    pub fn to_bits(&self) -> Vec<u8> {
        self.decisions.iter().map(|&d| u8::from(d)).collect()
    }
}

impl FromIterator<bool> for Assignment {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            decisions: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (site, &d) in self.decisions.iter().enumerate() {
            if site > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", u8::from(d))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Assignment[{}]", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_is_zero_padded_binary() {
        let a = Assignment::from_index(0b101, 5);
        assert_eq!(a.to_bits(), vec![1, 0, 1, 0, 0]);

        let zero = Assignment::from_index(0, 3);
        assert_eq!(zero.to_bits(), vec![0, 0, 0]);

        let all = Assignment::from_index(0b111, 3);
        assert_eq!(all.selected_count(), 3);
    }

    #[test]
    fn test_from_index_ignores_high_bits() {
        let a = Assignment::from_index(0b1_0001, 4);
        assert_eq!(a.to_bits(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_from_index_full_width() {
        let a = Assignment::from_index(u64::MAX, 64);
        assert_eq!(a.selected_count(), 64);
    }

    #[test]
    fn test_from_bits_rejects_non_binary() {
        let err = Assignment::from_bits(&[0, 2, 1]).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("site 1"));
    }

    #[test]
    fn test_from_selected() {
        let a = Assignment::from_selected(5, [4, 1]).unwrap();
        assert_eq!(a.to_bits(), vec![0, 1, 0, 0, 1]);
        assert!(Assignment::from_selected(3, [3]).is_err());
    }

    #[test]
    fn test_get_and_selected_sites() {
        let a = Assignment::from_bits(&[1, 0, 1]).unwrap();
        assert_eq!(a.get(0), Some(true));
        assert_eq!(a.get(1), Some(false));
        assert_eq!(a.get(3), None);
        assert_eq!(a.selected_sites().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_display_and_debug() {
        let a = Assignment::from_bits(&[0, 1]).unwrap();
        assert_eq!(a.to_string(), "0, 1");
        assert_eq!(format!("{:?}", a), "Assignment[0, 1]");
        assert_eq!(Assignment::default().to_string(), "");
    }

    #[test]
    fn test_from_iterator() {
        let a: Assignment = [true, false, true].into_iter().collect();
        assert_eq!(a, Assignment::from_bits(&[1, 0, 1]).unwrap());
    }
}
