//! Round-robin pairing generation for tournament matches
//!
//! Every unordered pair of roster slots plays once, self-pairings included.
//! Pairs are listed in row-major order: `(0,0), (0,1), .., (0,n-1), (1,1), ..`.
//! `pair_for_match` computes any entry directly, without building the list.

/// Total number of matches for `n` players: n(n+1)/2
pub fn match_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// All pairings `(i, j)` with `i <= j < n`, row-major
pub fn round_robin(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(match_count(n));
    for i in 0..n {
        for j in i..n {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Get the pairing for a specific match index. O(1), no allocation.
pub fn pair_for_match(n: usize, match_index: usize) -> Option<(usize, usize)> {
    let total = match_count(n);
    if match_index >= total {
        return None;
    }

    // Counting from the back, row-major order over (i, j) becomes
    // colexicographic order over (n-1-j, n-1-i).
    let (a, b) = unrank_pair(total - 1 - match_index);
    Some((n - 1 - b, n - 1 - a))
}

/// Colexicographic unranking with repetition: rank → (a, b) with a ≤ b.
///
/// rank = b*(b+1)/2 + a
fn unrank_pair(rank: usize) -> (usize, usize) {
    // Estimate b via integer floor(sqrt(1 + 8·rank))
    let val = 1 + 8 * rank as u64;
    let mut s = val;
    let mut t = (s + 1) / 2;
    while t < s {
        s = t;
        t = (s + val / s) / 2;
    }
    // s = floor(sqrt(val))
    let mut b = ((s - 1) / 2) as usize;

    // Correct estimate
    while b > 0 && b * (b + 1) / 2 > rank {
        b -= 1;
    }
    while (b + 1) * (b + 2) / 2 <= rank {
        b += 1;
    }

    let a = rank - b * (b + 1) / 2;
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_roster() {
        assert_eq!(match_count(0), 0);
        assert!(round_robin(0).is_empty());
        assert_eq!(pair_for_match(0, 0), None);
    }

    #[test]
    fn test_single_player_plays_itself() {
        assert_eq!(round_robin(1), vec![(0, 0)]);
        assert_eq!(pair_for_match(1, 0), Some((0, 0)));
        assert_eq!(pair_for_match(1, 1), None);
    }

    #[test]
    fn test_three_players_order() {
        assert_eq!(
            round_robin(3),
            vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_match_count_formula() {
        for (n, expected) in [(1, 1), (2, 3), (4, 10), (10, 55), (100, 5050)] {
            assert_eq!(match_count(n), expected, "n={}", n);
            assert_eq!(round_robin(n).len(), expected, "n={}", n);
        }
    }

    #[test]
    fn test_unrank_pair_covers_all() {
        let mut seen = HashSet::new();
        for r in 0..match_count(20) {
            let (a, b) = unrank_pair(r);
            assert!(a <= b, "not ordered: {} > {}", a, b);
            assert!(b < 20, "out of range: b={}", b);
            assert!(seen.insert((a, b)), "duplicate pair at rank {}", r);
        }
        assert_eq!(seen.len(), 210);
    }

    #[test]
    fn test_every_pair_once() {
        let n = 12;
        let pairs = round_robin(n);
        let unique: HashSet<_> = pairs.iter().copied().collect();
        assert_eq!(unique.len(), pairs.len());

        // Each slot appears in n + 1 seat positions: once per other slot,
        // twice in its self-pairing
        let mut counts = vec![0usize; n];
        for (a, b) in &pairs {
            counts[*a] += 1;
            counts[*b] += 1;
        }
        assert!(counts.iter().all(|c| *c == n + 1), "{:?}", counts);
    }

    proptest! {
        #[test]
        fn prop_pair_for_match_agrees_with_list(n in 0usize..60) {
            let pairs = round_robin(n);
            for (i, expected) in pairs.iter().enumerate() {
                prop_assert_eq!(pair_for_match(n, i), Some(*expected));
            }
            prop_assert_eq!(pair_for_match(n, pairs.len()), None);
        }

        #[test]
        fn prop_pairs_ordered_and_in_range(n in 1usize..500, idx in 0usize..125_250) {
            match pair_for_match(n, idx) {
                Some((a, b)) => {
                    prop_assert!(idx < match_count(n));
                    prop_assert!(a <= b && b < n);
                }
                None => prop_assert!(idx >= match_count(n)),
            }
        }
    }
}
