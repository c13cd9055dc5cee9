use crate::domain::models::PlayerId;

/// Smallest power of two that fits the field
pub fn bracket_size(player_count: usize) -> usize {
    player_count.max(1).next_power_of_two()
}

/// Number of rounds needed to decide a field of the given count,
/// after padding to a power of two
pub fn round_count(player_count: usize) -> u32 {
    bracket_size(player_count).ilog2()
}

/// Order entrants by rating, best first. Stable, so equal ratings keep
/// their entry order.
pub fn seed_players(entrants: &[(PlayerId, i32)]) -> Vec<PlayerId> {
    let mut sorted = entrants.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.into_iter().map(|(id, _)| id).collect()
}

/// Seed indices in bracket order. Built by doubling: each expansion
/// pairs seed s with its mirror (2n - 1 - s), which keeps the top two
/// seeds in opposite halves and gives byes to the best seeds.
pub fn build_seed_order(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    while order.len() < size {
        let doubled = order.len() * 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, doubled - 1 - seed])
            .collect();
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_size_rounds_up_to_power_of_two() {
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(3), 4);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(bracket_size(9), 16);
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(3), 2);
        assert_eq!(round_count(4), 2);
        assert_eq!(round_count(5), 3);
        assert_eq!(round_count(6), 3);
        assert_eq!(round_count(8), 3);
        assert_eq!(round_count(9), 4);
        assert_eq!(round_count(16), 4);
    }

    #[test]
    fn test_seed_order_for_small_brackets() {
        assert_eq!(build_seed_order(2), vec![0, 1]);
        assert_eq!(build_seed_order(4), vec![0, 3, 1, 2]);
        assert_eq!(build_seed_order(8), vec![0, 7, 3, 4, 1, 6, 2, 5]);
    }

    #[test]
    fn test_seed_order_is_a_permutation() {
        for size in [2usize, 4, 8, 16, 32] {
            let mut order = build_seed_order(size);
            order.sort_unstable();
            let expected: Vec<usize> = (0..size).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn test_seed_order_pairs_sum_to_size_minus_one() {
        // Every round-one pairing is seed s against seed (size - 1 - s),
        // which is what sends all the byes to the top seeds.
        for size in [2usize, 4, 8, 16] {
            let order = build_seed_order(size);
            for pair in order.chunks(2) {
                assert_eq!(pair[0] + pair[1], size - 1);
            }
        }
    }

    #[test]
    fn test_top_seeds_land_in_opposite_halves() {
        for size in [4usize, 8, 16, 32] {
            let order = build_seed_order(size);
            let pos_of = |seed: usize| order.iter().position(|&s| s == seed).unwrap();
            let half = size / 2;
            assert!(pos_of(0) < half);
            assert!(pos_of(1) >= half);
        }
    }

    #[test]
    fn test_seeding_sorts_by_rating_descending() {
        let entrants = vec![(10, 1200), (11, 1500), (12, 1350)];
        assert_eq!(seed_players(&entrants), vec![11, 12, 10]);
    }

    #[test]
    fn test_seeding_keeps_entry_order_on_ties() {
        let entrants = vec![(10, 1200), (11, 1200), (12, 1200)];
        assert_eq!(seed_players(&entrants), vec![10, 11, 12]);
    }
}
