//! Monthly leaderboard ranking and lifetime-points levels.

use serde::Serialize;

use crate::types::DbId;

/// Maximum length of an award title.
pub const MAX_AWARD_TITLE_LENGTH: usize = 120;

/// Maximum length of an award description.
pub const MAX_AWARD_DESCRIPTION_LENGTH: usize = 1_000;

/// Level thresholds in ascending order: `(name, minimum lifetime points)`.
pub const LEVELS: &[(&str, i64)] = &[
    ("rookie", 0),
    ("bronze", 500),
    ("silver", 1_500),
    ("gold", 4_000),
    ("diamond", 10_000),
];

/// A designer's score going into the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub designer_id: DbId,
    pub designer_name: String,
    pub points: i64,
    pub quantity: i64,
}

/// A ranked leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    pub rank: u32,
    pub designer_id: DbId,
    pub designer_name: String,
    pub points: i64,
    pub quantity: i64,
}

/// Rank scores by points, then quantity (both descending).
///
/// Uses competition ranking: entries with equal points and quantity share a
/// rank and the next rank skips accordingly (1, 2, 2, 4).
pub fn rank(mut scores: Vec<Score>) -> Vec<RankedScore> {
    scores.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.quantity.cmp(&a.quantity))
            .then_with(|| a.designer_name.cmp(&b.designer_name))
    });

    let mut ranked: Vec<RankedScore> = Vec::with_capacity(scores.len());
    for (index, score) in scores.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.points == score.points && prev.quantity == score.quantity => {
                prev.rank
            }
            _ => index as u32 + 1,
        };
        ranked.push(RankedScore {
            rank,
            designer_id: score.designer_id,
            designer_name: score.designer_name,
            points: score.points,
            quantity: score.quantity,
        });
    }
    ranked
}

/// Where a designer stands on the level ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelInfo {
    pub level: &'static str,
    pub lifetime_points: i64,
    pub level_min_points: i64,
    pub next_level: Option<&'static str>,
    pub next_level_points: Option<i64>,
    /// Progress from the current threshold to the next, 0..=100.
    pub progress_pct: f64,
}

/// Compute the level reached with `lifetime_points`.
pub fn level_for(lifetime_points: i64) -> LevelInfo {
    let points = lifetime_points.max(0);
    let index = LEVELS
        .iter()
        .rposition(|(_, min)| points >= *min)
        .unwrap_or(0);
    let (level, level_min_points) = LEVELS[index];
    let next = LEVELS.get(index + 1).copied();

    let progress_pct = match next {
        Some((_, next_min)) => {
            let span = (next_min - level_min_points) as f64;
            ((points - level_min_points) as f64 / span * 10_000.0).round() / 100.0
        }
        None => 100.0,
    };

    LevelInfo {
        level,
        lifetime_points: points,
        level_min_points,
        next_level: next.map(|(name, _)| name),
        next_level_points: next.map(|(_, min)| min),
        progress_pct,
    }
}

pub fn validate_award_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Award title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_AWARD_TITLE_LENGTH {
        return Err(format!(
            "Award title exceeds maximum length of {MAX_AWARD_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_award_description(description: Option<&str>) -> Result<(), String> {
    match description {
        Some(d) if d.chars().count() > MAX_AWARD_DESCRIPTION_LENGTH => Err(format!(
            "Award description exceeds maximum length of {MAX_AWARD_DESCRIPTION_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(id: DbId, name: &str, points: i64, quantity: i64) -> Score {
        Score {
            designer_id: id,
            designer_name: name.to_string(),
            points,
            quantity,
        }
    }

    #[test]
    fn ranking_orders_by_points_then_quantity() {
        let ranked = rank(vec![
            score(1, "ana", 10, 5),
            score(2, "bia", 30, 1),
            score(3, "cris", 10, 8),
        ]);
        let ids: Vec<_> = ranked.iter().map(|r| r.designer_id).collect();
        assert_eq!(ids, [2, 3, 1]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn ties_share_rank_and_skip() {
        let ranked = rank(vec![
            score(1, "ana", 50, 5),
            score(2, "bia", 20, 2),
            score(3, "cris", 20, 2),
            score(4, "duda", 10, 1),
        ]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 2, 4]);
    }

    #[test]
    fn empty_ranking() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(level_for(0).level, "rookie");
        assert_eq!(level_for(499).level, "rookie");
        assert_eq!(level_for(500).level, "bronze");
        assert_eq!(level_for(4_000).level, "gold");
        assert_eq!(level_for(250_000).level, "diamond");
        assert_eq!(level_for(-5).lifetime_points, 0);
    }

    #[test]
    fn level_progress() {
        let info = level_for(1_000);
        assert_eq!(info.level, "bronze");
        assert_eq!(info.next_level, Some("silver"));
        assert_eq!(info.next_level_points, Some(1_500));
        assert_eq!(info.progress_pct, 50.0);

        let top = level_for(12_000);
        assert_eq!(top.next_level, None);
        assert_eq!(top.progress_pct, 100.0);
    }

    #[test]
    fn award_text_validation() {
        assert!(validate_award_title("Designer of the month").is_ok());
        assert!(validate_award_title(" ").is_err());
        assert!(validate_award_description(Some(&"d".repeat(1_001))).is_err());
        assert!(validate_award_description(None).is_ok());
    }
}
