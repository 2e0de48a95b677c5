/// Running totals of a game.
///
/// - **Score**: sum of line-clear points, never decreases
/// - **Completed pieces**: pieces frozen into the board
/// - **Cleared lines**: rows removed across all line clears
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece();
/// stats.record_line_clear(4, 800);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.completed_pieces(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Records one piece frozen into the board.
    pub const fn complete_piece(&mut self) {
        self.completed_pieces += 1;
    }

    /// Records a line-clear event of `cleared_lines` rows worth `points`.
    pub const fn record_line_clear(&mut self, cleared_lines: usize, points: usize) {
        self.total_cleared_lines += cleared_lines;
        self.score = self.score.saturating_add(points);
    }
}
