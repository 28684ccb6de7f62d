//! Built-in sayings. Each new random worm carries one, a character per
//! segment, with the first character at the head.

/// Sayings picked from when a worm is created at random.
pub const SAYINGS: &[&str] = &[
    "<make-it-work-then-make-it-fast>",
    "<every-program-has-one-more-bug>",
    "<premature-optimization-is-the-root-of-all-evil>",
    "<simple-is-better-than-complex>",
    "<there-are-two-hard-things:naming,caching,off-by-one>",
    "<0123456789abcdef>",
    "<zyxwvutsrqponmlkjihgfedcba>",
    "<Grace-Hopper>",
    "<Alan-Turing>",
    "<Barbara-Liskov>",
    "<Ken-Thompson>",
    "<Ada-Lovelace>",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_saying_makes_a_viable_worm() {
        assert!(!SAYINGS.is_empty());
        assert!(SAYINGS.iter().all(|s| s.chars().count() >= 2));
    }
}
