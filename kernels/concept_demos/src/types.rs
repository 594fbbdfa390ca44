// Shared types for the interactive concept demos

// ============================================================================
// GEOMETRY AND VOTING
// ============================================================================

// 3D position in demo scene space
pub type Position = [f64; 3];

// Outcome of a majority vote over class labels
//
// A tie is a first-class result: the demos teach why K should be odd, so an
// even split must render as "tie", never as an arbitrary winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Majority(usize),
    Tie,
}

impl Vote {
    // Encoding used at the wasm boundary: class index, or -1 for a tie
    #[inline]
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Majority(class) => *class as i32,
            Self::Tie => -1,
        }
    }
}

// Decide a vote from per-class counts: the strict maximum wins, any shared
// maximum (including the all-zero case) is a tie
pub fn tally_vote(counts: &[usize]) -> Vote {
    let max = counts.iter().copied().max().unwrap_or(0);
    let winners: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == max)
        .map(|(i, _)| i)
        .collect();

    if max > 0 && winners.len() == 1 {
        Vote::Majority(winners[0])
    } else {
        Vote::Tie
    }
}

// Fixed demo class colors (linear RGB): class 0 red, class 1 blue
pub const CLASS_COLORS: [[f32; 3]; 2] = [
    [0.937, 0.267, 0.267],
    [0.231, 0.510, 0.965],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_majority_wins() {
        assert_eq!(tally_vote(&[2, 1]), Vote::Majority(0));
        assert_eq!(tally_vote(&[0, 3, 1]), Vote::Majority(1));
    }

    #[test]
    fn test_shared_maximum_is_a_tie() {
        assert_eq!(tally_vote(&[2, 2]), Vote::Tie);
        assert_eq!(tally_vote(&[1, 3, 3]), Vote::Tie);
    }

    #[test]
    fn test_empty_tally_is_a_tie() {
        assert_eq!(tally_vote(&[0, 0]), Vote::Tie);
        assert_eq!(tally_vote(&[]), Vote::Tie);
    }

    #[test]
    fn test_wasm_encoding() {
        assert_eq!(Vote::Majority(1).as_i32(), 1);
        assert_eq!(Vote::Tie.as_i32(), -1);
    }
}
