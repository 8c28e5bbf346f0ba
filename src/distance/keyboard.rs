//! Keyboard adjacency costs for substitution weighting.

use ahash::AHashMap;

use super::CharDistance;

/// Cost of substituting keys that sit next to each other in a row.
pub const DIRECT_CONNECT: f64 = 0.1;
/// Cost of substituting keys that touch across rows.
pub const DIAGONAL_CONNECT: f64 = 0.4;
/// Cost of any other substitution.
pub const DEFAULT_COST: f64 = 1.0;

/// Substitution costs derived from a keyboard layout.
///
/// Each row is offset half a key to the right of the row above, so a key in
/// column `c` touches columns `c - 1` and `c` of the row below and columns `c`
/// and `c + 1` of the row above.
#[derive(Debug, Clone)]
pub struct KeyboardDistance {
    costs: AHashMap<(char, char), f64>,
}

impl KeyboardDistance {
    /// Build a table from letter rows, top row first.
    pub fn from_rows(rows: &[&str]) -> Self {
        let rows: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let mut costs = AHashMap::new();
        let mut connect = |a: char, b: char, cost: f64| {
            costs.insert((a, b), cost);
            costs.insert((b, a), cost);
        };

        for (r, row) in rows.iter().enumerate() {
            for pair in row.windows(2) {
                connect(pair[0], pair[1], DIRECT_CONNECT);
            }

            let Some(below) = rows.get(r + 1) else {
                continue;
            };
            for (c, &key) in row.iter().enumerate() {
                for col in [c.checked_sub(1), Some(c)].into_iter().flatten() {
                    if let Some(&other) = below.get(col) {
                        connect(key, other, DIAGONAL_CONNECT);
                    }
                }
            }
        }

        KeyboardDistance { costs }
    }

    pub fn qwerty() -> Self {
        Self::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"])
    }

    pub fn qwertz() -> Self {
        Self::from_rows(&["qwertzuiopü", "asdfghjklöä", "yxcvbnm"])
    }
}

impl CharDistance for KeyboardDistance {
    fn distance(&self, a: char, b: char) -> f64 {
        if a == b {
            return 0.0;
        }
        self.costs.get(&(a, b)).copied().unwrap_or(DEFAULT_COST)
    }
}
