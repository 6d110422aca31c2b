use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{GameError, GameResult};

/// Prize per level in rupiah, level 1 first.
pub const DEFAULT_PRIZES: [u64; 11] = [
    500_000,
    1_000_000,
    2_000_000,
    5_000_000,
    10_000_000, // safe zone
    25_000_000,
    50_000_000,
    100_000_000,
    250_000_000,
    500_000_000, // safe zone
    1_000_000_000, // jackpot
];

pub const DEFAULT_SAFE_ZONES: [u32; 2] = [5, 10];

/// Ordered prize ladder with its guaranteed (safe-zone) levels.
///
/// Levels are 1-based. Lookups past the end reuse the jackpot amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrizeTable {
    prizes: Vec<u64>,
    safe_zones: BTreeSet<u32>,
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self {
            prizes: DEFAULT_PRIZES.to_vec(),
            safe_zones: DEFAULT_SAFE_ZONES.into_iter().collect(),
        }
    }
}

impl PrizeTable {
    pub fn new(prizes: Vec<u64>, safe_zones: impl IntoIterator<Item = u32>) -> GameResult<Self> {
        if prizes.is_empty() {
            return Err(GameError::InvalidPrizeTable(
                "prize list must not be empty".to_string(),
            ));
        }
        if prizes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(GameError::InvalidPrizeTable(
                "prizes must be strictly increasing".to_string(),
            ));
        }

        let safe_zones: BTreeSet<u32> = safe_zones.into_iter().collect();
        let len = prizes.len() as u32;
        if let Some(bad) = safe_zones.iter().find(|level| **level == 0 || **level > len) {
            return Err(GameError::InvalidPrizeTable(format!(
                "safe zone level {} is outside 1..={}",
                bad, len
            )));
        }

        Ok(Self { prizes, safe_zones })
    }

    pub fn prize_for_level(&self, level: u32) -> u64 {
        let index = (level.max(1) as usize - 1).min(self.prizes.len() - 1);
        self.prizes[index]
    }

    pub fn is_safe_zone(&self, level: u32) -> bool {
        self.safe_zones.contains(&level)
    }

    pub fn safe_zone_levels(&self) -> Vec<u32> {
        self.safe_zones.iter().copied().collect()
    }

    /// Number of levels, which is also the jackpot level.
    pub fn len(&self) -> u32 {
        self.prizes.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn jackpot(&self) -> u64 {
        self.prize_for_level(self.len())
    }

    pub fn prizes(&self) -> &[u64] {
        &self.prizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_strictly_increasing() {
        let table = PrizeTable::default();
        for level in 1..table.len() {
            assert!(table.prize_for_level(level) < table.prize_for_level(level + 1));
        }
        assert_eq!(table.prize_for_level(1), 500_000);
        assert_eq!(table.prize_for_level(11), 1_000_000_000);
    }

    #[test]
    fn lookups_are_clamped() {
        let table = PrizeTable::default();
        assert_eq!(table.prize_for_level(12), table.prize_for_level(11));
        assert_eq!(table.prize_for_level(0), table.prize_for_level(1));
        assert_eq!(table.jackpot(), 1_000_000_000);
    }

    #[test]
    fn only_five_and_ten_are_safe_by_default() {
        let table = PrizeTable::default();
        for level in 1..=11 {
            assert_eq!(table.is_safe_zone(level), level == 5 || level == 10);
        }
        assert_eq!(table.safe_zone_levels(), vec![5, 10]);
    }

    #[test]
    fn rejects_non_increasing_prizes() {
        assert!(PrizeTable::new(vec![10, 10, 20], []).is_err());
        assert!(PrizeTable::new(vec![], []).is_err());
    }

    #[test]
    fn rejects_safe_zone_outside_table() {
        assert!(PrizeTable::new(vec![1, 2, 3], [4]).is_err());
        assert!(PrizeTable::new(vec![1, 2, 3], [0]).is_err());
        assert!(PrizeTable::new(vec![1, 2, 3], [2]).is_ok());
    }
}
