use serde::{Deserialize, Serialize};

const DIAMOND_THRESHOLD: i32 = 1600;
const PLATINUM_THRESHOLD: i32 = 1450;
const GOLD_THRESHOLD: i32 = 1300;
const SILVER_THRESHOLD: i32 = 1150;
const BRONZE_THRESHOLD: i32 = 1000;

/// Named rating band shown next to a player on the standings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Plumavit,
}

impl Tier {
    pub fn for_rating(rating: i32) -> Tier {
        if rating >= DIAMOND_THRESHOLD {
            Tier::Diamond
        } else if rating >= PLATINUM_THRESHOLD {
            Tier::Platinum
        } else if rating >= GOLD_THRESHOLD {
            Tier::Gold
        } else if rating >= SILVER_THRESHOLD {
            Tier::Silver
        } else if rating >= BRONZE_THRESHOLD {
            Tier::Bronze
        } else {
            Tier::Plumavit
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tier::Diamond => "Diamond",
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Bronze => "Bronze",
            Tier::Plumavit => "Plumavit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::for_rating(1600), Tier::Diamond);
        assert_eq!(Tier::for_rating(1599), Tier::Platinum);
        assert_eq!(Tier::for_rating(1450), Tier::Platinum);
        assert_eq!(Tier::for_rating(1300), Tier::Gold);
        assert_eq!(Tier::for_rating(1150), Tier::Silver);
        assert_eq!(Tier::for_rating(1000), Tier::Bronze);
        assert_eq!(Tier::for_rating(999), Tier::Plumavit);
        assert_eq!(Tier::for_rating(100), Tier::Plumavit);
    }

    #[test]
    fn test_starting_rating_lands_in_silver() {
        assert_eq!(Tier::for_rating(1200), Tier::Silver);
    }
}
