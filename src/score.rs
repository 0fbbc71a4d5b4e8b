//! Survival-duration scoring
//!
//! Maps how long the drop stayed standing to one of three tiers. Message
//! text is a static lookup, not game logic.

use serde::{Deserialize, Serialize};

/// Score for surviving the full session
pub const MAX_SCORE: u8 = 3;

/// Tier threshold in seconds: at or above is tier 3
pub const HIGH_THRESHOLD_SECS: f64 = 20.0;
/// Tier threshold in seconds: at or above (but below high) is tier 2
pub const MID_THRESHOLD_SECS: f64 = 15.0;

/// Message pair shown for one scoring tier
struct TierMessage {
    msg: &'static str,
    sub: &'static str,
}

const HIGH_SCORE: TierMessage = TierMessage {
    msg: "腎氣充盈，穩若靜水",
    sub: "你維持得非常出色。",
};

const MID_SCORE: TierMessage = TierMessage {
    msg: "腎氣不錯，靜中帶穩",
    sub: "再多一點耐心，平衡會越來越穩。",
};

const LOW_SCORE: TierMessage = TierMessage {
    msg: "腎氣偏弱，需多調養",
    sub: "調整呼吸與專注，下一次會更好。",
};

/// Outcome of one completed session
///
/// Created exactly once, at the Running -> Finished transition; immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Scoring tier, 1..=3
    pub score: u8,
    /// Survival time in seconds (exactly the cap on a time-out win)
    pub duration_secs: f64,
    pub message: String,
    pub sub_message: String,
}

impl GameResult {
    /// Build the result for a finished session
    ///
    /// Thresholds are inclusive on the lower bound: 15.0 is tier 2, 20.0 is
    /// tier 3.
    pub fn for_duration(duration_secs: f64) -> Self {
        let (score, tier) = if duration_secs >= HIGH_THRESHOLD_SECS {
            (3, HIGH_SCORE)
        } else if duration_secs >= MID_THRESHOLD_SECS {
            (2, MID_SCORE)
        } else {
            (1, LOW_SCORE)
        };

        Self {
            score,
            duration_secs,
            message: tier.msg.to_string(),
            sub_message: tier.sub.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(GameResult::for_duration(0.0).score, 1);
        assert_eq!(GameResult::for_duration(14.999).score, 1);
        assert_eq!(GameResult::for_duration(15.0).score, 2);
        assert_eq!(GameResult::for_duration(19.999).score, 2);
        assert_eq!(GameResult::for_duration(20.0).score, 3);
        assert_eq!(GameResult::for_duration(25.0).score, 3);
    }

    #[test]
    fn test_messages_match_tier() {
        let win = GameResult::for_duration(20.0);
        assert_eq!(win.message, HIGH_SCORE.msg);
        assert_eq!(win.sub_message, HIGH_SCORE.sub);

        let mid = GameResult::for_duration(17.3);
        assert_eq!(mid.message, MID_SCORE.msg);

        let low = GameResult::for_duration(3.2);
        assert_eq!(low.message, LOW_SCORE.msg);
    }

    #[test]
    fn test_duration_is_preserved() {
        let result = GameResult::for_duration(12.34);
        assert_eq!(result.duration_secs, 12.34);
    }

    proptest! {
        #[test]
        fn prop_score_total_and_monotone(a in 0.0f64..60.0, b in 0.0f64..60.0) {
            let ra = GameResult::for_duration(a);
            let rb = GameResult::for_duration(b);
            prop_assert!((1..=MAX_SCORE).contains(&ra.score));
            if a <= b {
                prop_assert!(ra.score <= rb.score);
            }
        }
    }
}
