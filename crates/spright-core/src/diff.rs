//! Differing line range between the live buffer and the model.
//!
//! This is a prefix/suffix trim, not an LCS diff. It is minimal when the edit is localized,
//! which holds for property edits: one line rewritten, inserted or removed.

/// The contiguous line range of `current` to replace with `diff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRangeDiff {
    /// First differing line (index into both arrays).
    pub first: usize,
    /// Exclusive end of the replaced range in `current`.
    pub last: usize,
    /// Replacement lines taken from `proposed`.
    pub diff: Vec<String>,
}

impl LineRangeDiff {
    /// Number of lines of `current` that are replaced.
    pub fn replaced_len(&self) -> usize {
        self.last - self.first
    }

    /// Returns `true` if the edit only deletes lines.
    pub fn is_deletion(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Compute the range of `current` that must be replaced to obtain `proposed`.
///
/// Returns `None` if both are equal.
pub fn differing_range<A, B>(current: &[A], proposed: &[B]) -> Option<LineRangeDiff>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let shorter = current.len().min(proposed.len());
    let first = (0..shorter)
        .find(|&i| current[i].as_ref() != proposed[i].as_ref())
        .unwrap_or(shorter);

    if first == current.len() && first == proposed.len() {
        return None;
    }

    let (mut last_current, mut last_proposed) = (current.len(), proposed.len());
    while last_current > first
        && last_proposed > first
        && current[last_current - 1].as_ref() == proposed[last_proposed - 1].as_ref()
    {
        last_current -= 1;
        last_proposed -= 1;
    }

    Some(LineRangeDiff {
        first,
        last: last_current,
        diff: proposed[first..last_proposed]
            .iter()
            .map(|line| line.as_ref().to_string())
            .collect(),
    })
}
