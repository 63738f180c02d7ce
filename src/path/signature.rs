use std::collections::BTreeSet;
use std::fmt;

/// Canonical, comparable form of an explored API: one string per path.
///
/// Two paths that render to the same string are the same signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureSet {
    signatures: BTreeSet<String>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signature: impl Into<String>) -> bool {
        self.signatures.insert(signature.into())
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.signatures.contains(signature)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Signatures in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(String::as_str)
    }

    /// Every signature of `self` is also in `other`.
    pub fn is_subset(&self, other: &SignatureSet) -> bool {
        self.signatures.is_subset(&other.signatures)
    }

    /// `self` holds everything in `other` and at least one more signature.
    pub fn is_strict_superset(&self, other: &SignatureSet) -> bool {
        self.signatures.len() > other.signatures.len()
            && self.signatures.is_superset(&other.signatures)
    }

    /// Signatures of `self` missing from `newer`.
    pub fn removed_from(&self, newer: &SignatureSet) -> Vec<String> {
        self.signatures
            .difference(&newer.signatures)
            .cloned()
            .collect()
    }

    /// Signatures of `newer` absent from `self`.
    pub fn added_in(&self, newer: &SignatureSet) -> Vec<String> {
        newer
            .signatures
            .difference(&self.signatures)
            .cloned()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            signatures: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SignatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .signatures
            .iter()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings_collapse() {
        let set: SignatureSet = ["m.f(x)", "m.f(x)", "m.g"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "m.f(x), m.g");
    }

    #[test]
    fn subset_and_strict_superset() {
        let small: SignatureSet = ["a"].into_iter().collect();
        let large: SignatureSet = ["a", "b"].into_iter().collect();
        assert!(small.is_subset(&large));
        assert!(large.is_strict_superset(&small));
        assert!(!small.is_strict_superset(&small));
        assert!(small.is_subset(&small));
        assert!(!large.is_subset(&small));
    }

    #[test]
    fn differences_in_both_directions() {
        let old: SignatureSet = ["a", "b"].into_iter().collect();
        let new: SignatureSet = ["a", "c"].into_iter().collect();
        assert_eq!(old.removed_from(&new), vec!["b"]);
        assert_eq!(old.added_in(&new), vec!["c"]);
    }
}
