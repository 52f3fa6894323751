//! Fantasy point scoring for skaters and goalies.

use serde::{Deserialize, Serialize};

/// Season statistics of a player, split by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "position", rename_all = "lowercase")]
pub enum PlayerStats {
    Skater {
        goals: u32,
        assists: u32,
        plus_minus: i32,
        shots: u32,
        penalty_minutes: u32,
    },
    Goalie {
        wins: u32,
        saves: u32,
        goals_against: u32,
        shutouts: u32,
    },
}

impl PlayerStats {
    pub fn is_goalie(&self) -> bool {
        matches!(self, PlayerStats::Goalie { .. })
    }
}

/// Points awarded per stat. Loaded from the `[scoring]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub goal: f64,
    pub assist: f64,
    pub plus_minus: f64,
    pub shot: f64,
    pub penalty_minute: f64,
    pub goalie_win: f64,
    pub save: f64,
    pub goal_against: f64,
    pub shutout: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            goal: 3.0,
            assist: 2.0,
            plus_minus: 1.0,
            shot: 0.5,
            penalty_minute: -0.5,
            goalie_win: 5.0,
            save: 0.2,
            goal_against: -1.0,
            shutout: 3.0,
        }
    }
}

impl ScoringRules {
    /// Fantasy points for one player's stat line.
    pub fn score(&self, stats: &PlayerStats) -> f64 {
        match *stats {
            PlayerStats::Skater {
                goals,
                assists,
                plus_minus,
                shots,
                penalty_minutes,
            } => {
                goals as f64 * self.goal
                    + assists as f64 * self.assist
                    + plus_minus as f64 * self.plus_minus
                    + shots as f64 * self.shot
                    + penalty_minutes as f64 * self.penalty_minute
            }
            PlayerStats::Goalie {
                wins,
                saves,
                goals_against,
                shutouts,
            } => {
                wins as f64 * self.goalie_win
                    + saves as f64 * self.save
                    + goals_against as f64 * self.goal_against
                    + shutouts as f64 * self.shutout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skater(goals: u32, assists: u32, plus_minus: i32, shots: u32, pim: u32) -> PlayerStats {
        PlayerStats::Skater {
            goals,
            assists,
            plus_minus,
            shots,
            penalty_minutes: pim,
        }
    }

    #[test]
    fn test_skater_default_scoring() {
        let rules = ScoringRules::default();
        // 10*3 + 5*2 + (-3)*1 + 20*0.5 + 4*(-0.5) = 30 + 10 - 3 + 10 - 2
        assert_eq!(rules.score(&skater(10, 5, -3, 20, 4)), 45.0);
    }

    #[test]
    fn test_goalie_default_scoring() {
        let rules = ScoringRules::default();
        let stats = PlayerStats::Goalie {
            wins: 3,
            saves: 100,
            goals_against: 7,
            shutouts: 1,
        };
        // 15 + 20 - 7 + 3
        assert!((rules.score(&stats) - 31.0).abs() < 1e-9);
        assert!(stats.is_goalie());
    }

    #[test]
    fn test_empty_stat_line_scores_zero() {
        assert_eq!(ScoringRules::default().score(&skater(0, 0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ScoringRules {
            goal: 1.0,
            assist: 1.0,
            ..ScoringRules::default()
        };
        assert_eq!(rules.score(&skater(2, 3, 0, 0, 0)), 5.0);
    }

    #[test]
    fn test_stats_tagged_by_position() {
        let json = r#"{"position":"goalie","wins":1,"saves":30,"goals_against":2,"shutouts":0}"#;
        let stats: PlayerStats = serde_json::from_str(json).unwrap();
        assert!(stats.is_goalie());

        let back = serde_json::to_string(&skater(1, 0, 0, 0, 0)).unwrap();
        assert!(back.contains(r#""position":"skater""#));
    }

    #[test]
    fn test_partial_rules_fall_back_to_defaults() {
        let rules: ScoringRules = toml::from_str("goal = 4.0").unwrap();
        assert_eq!(rules.goal, 4.0);
        assert_eq!(rules.assist, ScoringRules::default().assist);
    }
}
