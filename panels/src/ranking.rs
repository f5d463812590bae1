//! Top-points leaderboard and the current user's rank.
//!
//! Both are re-polled on an interval by the client. Each poll is tagged
//! with a sequence number so a slow response never overwrites a newer one.

#[cfg(test)]
#[path = "ranking_test.rs"]
mod ranking_test;

use crate::api::{RankEntry, UserRank};
use crate::error::ApiError;
use crate::format;

pub const TOP_LIMIT: u32 = 5;

pub const MSG_EMPTY: &str = "No ranking data yet.";
pub const MSG_FAILED: &str = "Could not load the ranking.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRow {
    pub rank: u32,
    pub nickname: String,
    pub points: String,
}

impl From<&RankEntry> for RankRow {
    fn from(entry: &RankEntry) -> Self {
        Self { rank: entry.rank, nickname: entry.nickname.clone(), points: format::points(entry.total_point) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Board {
    Loading,
    Empty,
    Entries(Vec<RankRow>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyRank {
    pub rank: u32,
    pub points: i64,
}

impl MyRank {
    #[must_use]
    pub fn rank_label(&self) -> String {
        format!("#{}", self.rank)
    }

    #[must_use]
    pub fn points_label(&self) -> String {
        format::points(self.points)
    }
}

#[derive(Debug, Clone)]
pub struct RankingState {
    board: Board,
    me: Option<MyRank>,
    top_seq: u64,
    user_seq: u64,
}

impl Default for RankingState {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingState {
    #[must_use]
    pub fn new() -> Self {
        Self { board: Board::Loading, me: None, top_seq: 0, user_seq: 0 }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn me(&self) -> Option<&MyRank> {
        self.me.as_ref()
    }

    pub fn begin_top(&mut self) -> u64 {
        self.top_seq += 1;
        self.top_seq
    }

    pub fn begin_user(&mut self) -> u64 {
        self.user_seq += 1;
        self.user_seq
    }

    /// Returns `false` for a superseded poll.
    pub fn apply_top(&mut self, seq: u64, result: Result<Vec<RankEntry>, ApiError>) -> bool {
        if seq != self.top_seq {
            return false;
        }
        self.board = match result {
            Ok(entries) if entries.is_empty() => Board::Empty,
            Ok(entries) => Board::Entries(entries.iter().map(RankRow::from).collect()),
            Err(err) => {
                log::warn!("ranking: top-points poll failed: {err}");
                Board::Failed(MSG_FAILED.to_owned())
            }
        };
        true
    }

    /// Apply a user-rank poll. Returns the points to write into the cached
    /// `points` key on success.
    pub fn apply_user(&mut self, seq: u64, result: Result<UserRank, ApiError>) -> Option<i64> {
        if seq != self.user_seq {
            return None;
        }
        match result {
            Ok(rank) => {
                self.me = Some(MyRank { rank: rank.rank, points: rank.total_point });
                Some(rank.total_point)
            }
            Err(err) => {
                log::warn!("ranking: user-rank poll failed: {err}");
                None
            }
        }
    }
}
