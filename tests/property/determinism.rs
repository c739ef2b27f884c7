//! Property-based tests for the Merkle commitment

use proptest::prelude::*;
use treeseal::digest::hash_bytes;
use treeseal::merkle;

/// Arbitrary non-empty sequence of well-formed digests.
fn digest_sequences() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any::<Vec<u8>>(), 1..32)
        .prop_map(|contents| contents.iter().map(|c| hash_bytes(c)).collect())
}

proptest! {
    /// Same ordered sequence always produces the same root.
    #[test]
    fn root_is_pure_function_of_sequence(digests in digest_sequences()) {
        let first = merkle::build_root(&digests).unwrap();
        let second = merkle::build_root(&digests).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Swapping two distinct elements changes the root.
    #[test]
    fn swapping_distinct_elements_changes_root(
        digests in digest_sequences(),
        i in any::<prop::sample::Index>(),
        j in any::<prop::sample::Index>(),
    ) {
        let i = i.index(digests.len());
        let j = j.index(digests.len());
        prop_assume!(digests[i] != digests[j]);

        let original = merkle::build_root(&digests).unwrap();
        let mut swapped = digests.clone();
        swapped.swap(i, j);
        prop_assert_ne!(merkle::build_root(&swapped).unwrap(), original);
    }

    /// Appending an element changes the root.
    #[test]
    fn appending_changes_root(digests in digest_sequences(), extra in any::<Vec<u8>>()) {
        let original = merkle::build_root(&digests).unwrap();
        let mut extended = digests.clone();
        extended.push(hash_bytes(&extra));
        prop_assert_ne!(merkle::build_root(&extended).unwrap(), original);
    }

    /// Changing any single digest changes the root.
    #[test]
    fn mutating_any_element_changes_root(
        digests in digest_sequences(),
        at in any::<prop::sample::Index>(),
        replacement in any::<Vec<u8>>(),
    ) {
        let at = at.index(digests.len());
        let new_digest = hash_bytes(&replacement);
        prop_assume!(digests[at] != new_digest);

        let original = merkle::build_root(&digests).unwrap();
        let mut mutated = digests.clone();
        mutated[at] = new_digest;
        prop_assert_ne!(merkle::build_root(&mutated).unwrap(), original);
    }

    /// The root always looks like a SHA-256 digest.
    #[test]
    fn root_is_well_formed(digests in digest_sequences()) {
        let root = merkle::build_root(&digests).unwrap();
        prop_assert_eq!(root.len(), 64);
        prop_assert!(root.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }
}
