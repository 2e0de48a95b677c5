use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    board::{Board, BoardSizeError},
    piece::PieceTemplate,
    shape::ShapeKind,
};

/// Complete game configuration.
///
/// Every field has a default, so a configuration file only needs to name the
/// settings it changes:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "board": { "width": 10 } }"#).unwrap();
/// assert_eq!(config.board.width, 10);
/// assert_eq!(config.board.height, 22);
/// assert_eq!(config.score_table.points(4), 800);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board geometry.
    pub board: BoardConfig,
    /// Driver pacing. The engine itself has no notion of time.
    pub timing: TimingConfig,
    /// Points awarded per line-clear event, indexed by the number of lines cleared at once.
    pub score_table: ScoreTable,
    /// Shape and color of each kind, in [`ShapeKind::ALL`] order.
    pub pieces: [PieceTemplate; ShapeKind::LEN],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            timing: TimingConfig::default(),
            score_table: ScoreTable::default(),
            pieces: ShapeKind::ALL.map(PieceTemplate::canonical),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Number of rows (default 22).
    pub height: usize,
    /// Number of columns (default 12).
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 22,
            width: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Seconds between automatic ticks (default 0.5).
    pub fall_interval_secs: f64,
    /// Seconds between screen refreshes (default 0.05). Only the driver uses this.
    pub frame_interval_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fall_interval_secs: 0.5,
            frame_interval_secs: 0.05,
        }
    }
}

impl TimingConfig {
    /// Longest accepted interval, in seconds (one day).
    pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

    /// Interval between automatic ticks.
    ///
    /// Out-of-range values, which a validated configuration never holds, are
    /// clamped to `[0, MAX_INTERVAL_SECS]`.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        interval(self.fall_interval_secs)
    }

    /// Interval between screen refreshes, clamped like [`fall_interval`](Self::fall_interval).
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        interval(self.frame_interval_secs)
    }
}

fn interval(secs: f64) -> Duration {
    let max = Duration::from_secs_f64(TimingConfig::MAX_INTERVAL_SECS);
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) => duration.min(max),
        Err(_) if secs > 0.0 => max,
        Err(_) => Duration::ZERO,
    }
}

/// Line-clear score table.
///
/// Entry `n` is the score for clearing `n` lines with a single piece. Counts
/// beyond the end of the table reuse the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(Vec<usize>);

impl Default for ScoreTable {
    fn default() -> Self {
        Self(vec![0, 100, 300, 500, 800])
    }
}

impl ScoreTable {
    #[must_use]
    pub fn new(points: Vec<usize>) -> Self {
        Self(points)
    }

    #[must_use]
    pub fn entries(&self) -> &[usize] {
        &self.0
    }

    /// Points for clearing `lines` rows at once.
    ///
    /// ```
    /// use blockfall_engine::ScoreTable;
    ///
    /// let table = ScoreTable::default();
    /// assert_eq!(table.points(0), 0);
    /// assert_eq!(table.points(2), 300);
    /// assert_eq!(table.points(6), 800);
    /// ```
    #[must_use]
    pub fn points(&self, lines: usize) -> usize {
        self.0
            .get(lines)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid board configuration: {_0}")]
    BoardSize(BoardSizeError),
    #[display("score table must have at least one entry")]
    EmptyScoreTable,
    #[display(
        "{name} must be a positive number of seconds up to {}, got {value}",
        TimingConfig::MAX_INTERVAL_SECS
    )]
    InvalidInterval { name: &'static str, value: f64 },
    #[display("board is {actual_width}x{actual_height}, configuration expects {width}x{height}")]
    BoardMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

impl GameConfig {
    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let BoardConfig { width, height } = self.board;
        if width == 0 || height == 0 {
            return Err(ConfigError::BoardSize(BoardSizeError { width, height }));
        }
        if self.score_table.entries().is_empty() {
            return Err(ConfigError::EmptyScoreTable);
        }
        let intervals = [
            ("fall interval", self.timing.fall_interval_secs),
            ("frame interval", self.timing.frame_interval_secs),
        ];
        for (name, value) in intervals {
            let in_range = value > 0.0 && value <= TimingConfig::MAX_INTERVAL_SECS;
            if !in_range || Duration::try_from_secs_f64(value).is_err() {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }
        Ok(())
    }

    /// Creates the empty board described by this configuration.
    pub fn new_board(&self) -> Result<Board, ConfigError> {
        Board::new(self.board.width, self.board.height).map_err(ConfigError::BoardSize)
    }

    /// Template of `kind`.
    #[must_use]
    pub fn template(&self, kind: ShapeKind) -> PieceTemplate {
        self.pieces[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board, BoardConfig { height: 22, width: 12 });
        assert_eq!(config.timing.fall_interval(), Duration::from_millis(500));
        assert_eq!(config.timing.frame_interval(), Duration::from_millis(50));
        assert_eq!(config.score_table.entries(), [0, 100, 300, 500, 800]);
        assert_eq!(
            config.template(ShapeKind::T),
            PieceTemplate::canonical(ShapeKind::T)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_score_table_clamps_to_last_entry() {
        let table = ScoreTable::new(vec![0, 40]);
        assert_eq!(table.points(1), 40);
        assert_eq!(table.points(4), 40);
        assert_eq!(ScoreTable::new(vec![]).points(1), 0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.board.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardSize(BoardSizeError { width: 0, .. }))
        ));

        let mut config = GameConfig::default();
        config.score_table = ScoreTable::new(vec![]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyScoreTable));

        let mut config = GameConfig::default();
        config.timing.fall_interval_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInterval {
                name: "fall interval",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.timing.frame_interval_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_intervals() {
        for value in [1e20, f64::INFINITY, TimingConfig::MAX_INTERVAL_SECS + 1.0] {
            let mut config = GameConfig::default();
            config.timing.fall_interval_secs = value;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidInterval {
                    name: "fall interval",
                    ..
                })
            ));
        }

        let mut config = GameConfig::default();
        config.timing.fall_interval_secs = TimingConfig::MAX_INTERVAL_SECS;
        assert!(config.validate().is_ok());
        assert_eq!(config.timing.fall_interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_interval_accessors_never_panic() {
        let timing = TimingConfig {
            fall_interval_secs: 1e20,
            frame_interval_secs: f64::NAN,
        };
        assert_eq!(timing.fall_interval(), Duration::from_secs(86_400));
        assert_eq!(timing.frame_interval(), Duration::ZERO);
    }

    #[test]
    fn test_partial_config_file() {
        let json = r#"{
            "score_table": [0, 40, 100, 300, 1200],
            "timing": { "fall_interval_secs": 0.25 }
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.score_table.points(4), 1200);
        assert_eq!(config.timing.fall_interval_secs, 0.25);
        assert_eq!(config.timing.frame_interval_secs, 0.05);
        assert_eq!(config.board, BoardConfig::default());
    }

    #[test]
    fn test_custom_piece_templates() {
        let mut value = serde_json::to_value(GameConfig::default()).unwrap();
        value["pieces"][0] = serde_json::json!({ "shape": [[1, 1], [1, 0]], "color": 7 });
        let config: GameConfig = serde_json::from_value(value).unwrap();
        let template = config.template(ShapeKind::I);
        assert_eq!(template.shape, Shape::from_matrix([[1, 1], [1, 0]]));
        assert_eq!(template.color.get(), 7);
    }

    #[test]
    fn test_config_rejects_unknown_and_invalid_fields() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#).is_err());
        let mut value = serde_json::to_value(GameConfig::default()).unwrap();
        value["pieces"][2]["color"] = serde_json::json!(0);
        assert!(serde_json::from_value::<GameConfig>(value).is_err());
    }
}
