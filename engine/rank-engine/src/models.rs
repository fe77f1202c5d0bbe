use crate::error::RankError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A fixed, ordered set of stat columns for one kind of ranked entity
pub trait StatColumn: Copy + Ord + fmt::Debug + 'static {
    /// Every column of this kind, in scoring order
    const ALL: &'static [Self];

    /// Source column name (e.g. "tgt_sh")
    fn name(self) -> &'static str;
}

/// An entity that can be standardized and scored against its population
pub trait Scorable {
    type Stat: StatColumn;

    /// Observed value for a stat, `None` when absent or non-finite
    fn stat(&self, stat: Self::Stat) -> Option<f64>;

    fn score_card(&self) -> &ScoreCard<Self::Stat>;

    fn score_card_mut(&mut self) -> &mut ScoreCard<Self::Stat>;

    /// Composite score, `None` until the scorer has run
    fn score(&self) -> Option<f64> {
        self.score_card().score()
    }
}

/// Entities carrying the outcome metric that stat weights are derived from
pub trait WithOutcome: Scorable {
    fn outcome(&self) -> Option<f64>;
}

/// Entities bucketed by category when ranking
pub trait Categorized {
    type Category: Copy + Eq + fmt::Debug;

    fn category(&self) -> Self::Category;
}

/// Standardized stats and composite score written by the scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard<S: StatColumn> {
    normalized: BTreeMap<S, f64>,
    score: Option<f64>,
}

impl<S: StatColumn> Default for ScoreCard<S> {
    fn default() -> Self {
        Self { normalized: BTreeMap::new(), score: None }
    }
}

impl<S: StatColumn> ScoreCard<S> {
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Z-score for a single stat
    pub fn normalized(&self, stat: S) -> Option<f64> {
        self.normalized.get(&stat).copied()
    }

    pub fn normalized_stats(&self) -> &BTreeMap<S, f64> {
        &self.normalized
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    pub(crate) fn record(&mut self, normalized: BTreeMap<S, f64>, score: f64) {
        self.normalized = normalized;
        self.score = Some(score);
    }
}

fn observed(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Offensive position (ranking category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Qb, Position::Rb, Position::Wr, Position::Te];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::Qb),
            "RB" => Ok(Position::Rb),
            "WR" => Ok(Position::Wr),
            "TE" => Ok(Position::Te),
            _ => Err(RankError::UnknownPosition(s.to_string())),
        }
    }
}

/// Player share stats used to rank players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerStat {
    /// Target share
    TgtSh,
    /// Air yards share
    AySh,
    /// Yards after catch share
    YacSh,
    /// Weighted opportunity rating
    WoprY,
    /// Receiving yards share
    RySh,
    /// Receiving TD share
    RtdSh,
    /// Receiving first down share
    RfdSh,
    /// Receiving TD + first down share
    RtdfdSh,
    /// Dominator rating
    Dom,
    /// Weighted dominator rating
    W8dom,
    /// Yards per team pass attempt
    Yptmpa,
}

impl StatColumn for PlayerStat {
    const ALL: &'static [Self] = &[
        PlayerStat::TgtSh,
        PlayerStat::AySh,
        PlayerStat::YacSh,
        PlayerStat::WoprY,
        PlayerStat::RySh,
        PlayerStat::RtdSh,
        PlayerStat::RfdSh,
        PlayerStat::RtdfdSh,
        PlayerStat::Dom,
        PlayerStat::W8dom,
        PlayerStat::Yptmpa,
    ];

    fn name(self) -> &'static str {
        match self {
            PlayerStat::TgtSh => "tgt_sh",
            PlayerStat::AySh => "ay_sh",
            PlayerStat::YacSh => "yac_sh",
            PlayerStat::WoprY => "wopr_y",
            PlayerStat::RySh => "ry_sh",
            PlayerStat::RtdSh => "rtd_sh",
            PlayerStat::RfdSh => "rfd_sh",
            PlayerStat::RtdfdSh => "rtdfd_sh",
            PlayerStat::Dom => "dom",
            PlayerStat::W8dom => "w8dom",
            PlayerStat::Yptmpa => "yptmpa",
        }
    }
}

impl FromStr for PlayerStat {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerStat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| RankError::UnknownStat(s.to_string()))
    }
}

impl fmt::Display for PlayerStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Team defense stats used to rank defenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefenseStat {
    Sacks,
    FantasyPoints,
    FantasyPointsPpr,
}

impl StatColumn for DefenseStat {
    const ALL: &'static [Self] =
        &[DefenseStat::Sacks, DefenseStat::FantasyPoints, DefenseStat::FantasyPointsPpr];

    fn name(self) -> &'static str {
        match self {
            DefenseStat::Sacks => "sacks",
            DefenseStat::FantasyPoints => "fantasy_points",
            DefenseStat::FantasyPointsPpr => "fantasy_points_ppr",
        }
    }
}

impl FromStr for DefenseStat {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefenseStat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| RankError::UnknownStat(s.to_string()))
    }
}

impl fmt::Display for DefenseStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Season share metrics for a player (nflverse column names)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareStats {
    pub tgt_sh: Option<f64>,
    pub ay_sh: Option<f64>,
    pub yac_sh: Option<f64>,
    pub wopr_y: Option<f64>,
    pub ry_sh: Option<f64>,
    pub rtd_sh: Option<f64>,
    pub rfd_sh: Option<f64>,
    pub rtdfd_sh: Option<f64>,
    pub dom: Option<f64>,
    pub w8dom: Option<f64>,
    pub yptmpa: Option<f64>,
    /// PPR fantasy point share, the outcome the weights are fitted against
    pub ppr_sh: Option<f64>,
}

impl ShareStats {
    pub fn get(&self, stat: PlayerStat) -> Option<f64> {
        match stat {
            PlayerStat::TgtSh => self.tgt_sh,
            PlayerStat::AySh => self.ay_sh,
            PlayerStat::YacSh => self.yac_sh,
            PlayerStat::WoprY => self.wopr_y,
            PlayerStat::RySh => self.ry_sh,
            PlayerStat::RtdSh => self.rtd_sh,
            PlayerStat::RfdSh => self.rfd_sh,
            PlayerStat::RtdfdSh => self.rtdfd_sh,
            PlayerStat::Dom => self.dom,
            PlayerStat::W8dom => self.w8dom,
            PlayerStat::Yptmpa => self.yptmpa,
        }
    }

    pub fn set(&mut self, stat: PlayerStat, value: Option<f64>) {
        let slot = match stat {
            PlayerStat::TgtSh => &mut self.tgt_sh,
            PlayerStat::AySh => &mut self.ay_sh,
            PlayerStat::YacSh => &mut self.yac_sh,
            PlayerStat::WoprY => &mut self.wopr_y,
            PlayerStat::RySh => &mut self.ry_sh,
            PlayerStat::RtdSh => &mut self.rtd_sh,
            PlayerStat::RfdSh => &mut self.rfd_sh,
            PlayerStat::RtdfdSh => &mut self.rtdfd_sh,
            PlayerStat::Dom => &mut self.dom,
            PlayerStat::W8dom => &mut self.w8dom,
            PlayerStat::Yptmpa => &mut self.yptmpa,
        };
        *slot = value;
    }
}

/// Season receiving volume for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceivingStats {
    pub games: u32,
    pub targets: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub receiving_air_yards: f64,
    pub receiving_yards_after_catch: f64,
    pub receiving_first_downs: f64,
    pub fantasy_points_ppr: f64,
}

/// An NFL player with season stats and ranking results
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub player_id: String,
    pub player_name: String,
    pub last_name: String,
    position: Position,
    pub team: Option<String>,
    pub season: i32,
    pub season_type: String,
    pub receiving: ReceivingStats,
    pub shares: ShareStats,
    score_card: ScoreCard<PlayerStat>,
}

impl Player {
    pub fn new(
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        last_name: impl Into<String>,
        position: Position,
        season: i32,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            last_name: last_name.into(),
            position,
            team: None,
            season,
            season_type: "REG".to_string(),
            receiving: ReceivingStats::default(),
            shares: ShareStats::default(),
            score_card: ScoreCard::default(),
        }
    }

    pub fn with_shares(mut self, shares: ShareStats) -> Self {
        self.shares = shares;
        self
    }

    pub fn with_receiving(mut self, receiving: ReceivingStats) -> Self {
        self.receiving = receiving;
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn ppr_sh(&self) -> Option<f64> {
        observed(self.shares.ppr_sh)
    }

    pub fn normalized_stat(&self, stat: PlayerStat) -> Option<f64> {
        self.score_card.normalized(stat)
    }

    /// Look up a raw stat by its source column name.
    ///
    /// Covers the ranking stats plus `ppr_sh`; anything else has no value.
    pub fn stat_by_name(&self, name: &str) -> Option<f64> {
        if name == "ppr_sh" {
            return self.ppr_sh();
        }
        name.parse::<PlayerStat>().ok().and_then(|stat| self.stat(stat))
    }
}

impl Scorable for Player {
    type Stat = PlayerStat;

    fn stat(&self, stat: PlayerStat) -> Option<f64> {
        observed(self.shares.get(stat))
    }

    fn score_card(&self) -> &ScoreCard<PlayerStat> {
        &self.score_card
    }

    fn score_card_mut(&mut self) -> &mut ScoreCard<PlayerStat> {
        &mut self.score_card
    }
}

impl WithOutcome for Player {
    fn outcome(&self) -> Option<f64> {
        self.ppr_sh()
    }
}

impl Categorized for Player {
    type Category = Position;

    fn category(&self) -> Position {
        self.position
    }
}

/// Season totals for a team defense
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseStats {
    pub sacks: Option<f64>,
    pub fantasy_points: Option<f64>,
    pub fantasy_points_ppr: Option<f64>,
}

impl DefenseStats {
    pub fn get(&self, stat: DefenseStat) -> Option<f64> {
        match stat {
            DefenseStat::Sacks => self.sacks,
            DefenseStat::FantasyPoints => self.fantasy_points,
            DefenseStat::FantasyPointsPpr => self.fantasy_points_ppr,
        }
    }
}

/// An NFL team defense with season stats and ranking results
#[derive(Debug, Clone, PartialEq)]
pub struct Defense {
    /// Team abbreviation (e.g., "BAL")
    pub team: String,
    /// Display name (e.g., "Ravens")
    pub team_name: String,
    pub season: i32,
    pub season_type: String,
    pub stats: DefenseStats,
    score_card: ScoreCard<DefenseStat>,
}

impl Defense {
    pub fn new(team: impl Into<String>, team_name: impl Into<String>, season: i32) -> Self {
        Self {
            team: team.into(),
            team_name: team_name.into(),
            season,
            season_type: "REG".to_string(),
            stats: DefenseStats::default(),
            score_card: ScoreCard::default(),
        }
    }

    pub fn with_stats(mut self, stats: DefenseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn normalized_stat(&self, stat: DefenseStat) -> Option<f64> {
        self.score_card.normalized(stat)
    }

    pub fn stat_by_name(&self, name: &str) -> Option<f64> {
        name.parse::<DefenseStat>().ok().and_then(|stat| self.stat(stat))
    }
}

impl Scorable for Defense {
    type Stat = DefenseStat;

    fn stat(&self, stat: DefenseStat) -> Option<f64> {
        observed(self.stats.get(stat))
    }

    fn score_card(&self) -> &ScoreCard<DefenseStat> {
        &self.score_card
    }

    fn score_card_mut(&mut self) -> &mut ScoreCard<DefenseStat> {
        &mut self.score_card
    }
}
