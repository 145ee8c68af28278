use std::str::FromStr;

use crate::error::{Error, Result};

use super::Snapshot;

/// Characters that mark an empty cell in the textual grid
const EMPTY: [char; 2] = ['.', ' '];

/// A [`Snapshot`] parsed from the textual state handed over by the game loop
///
/// The first line is a header of whitespace-separated `name=value` fields:
/// `x`, `y` and `score` are required, `goal` and `done` are optional flags
/// (`1`/`0`/`true`/`false`). Every following line is one grid row, top row first.
///
/// ```
/// use frogger_q::env::{GridState, Snapshot};
///
/// let state: GridState = "x=1 y=1 score=4\nC..\n.F.\n...".parse().unwrap();
/// assert_eq!(state.get(0, 0), Some('C'));
/// assert_eq!(state.get(2, 0), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    rows: Vec<Vec<char>>,
    x: i64,
    y: i64,
    score: i64,
    at_goal: bool,
    is_done: bool,
}

impl GridState {
    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

impl Snapshot for GridState {
    fn get(&self, x: i64, y: i64) -> Option<char> {
        let row = self.rows.get(usize::try_from(y).ok()?)?;
        let cell = *row.get(usize::try_from(x).ok()?)?;
        (!EMPTY.contains(&cell)).then_some(cell)
    }

    fn x(&self) -> i64 {
        self.x
    }

    fn y(&self) -> i64 {
        self.y
    }

    fn at_goal(&self) -> bool {
        self.at_goal
    }

    fn is_done(&self) -> bool {
        self.is_done
    }

    fn score(&self) -> i64 {
        self.score
    }
}

impl FromStr for GridState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines();
        let header = lines
            .next()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| Error::InvalidSnapshot("missing header line".into()))?;

        let (mut x, mut y, mut score) = (None, None, None);
        let (mut at_goal, mut is_done) = (false, false);
        for field in header.split_whitespace() {
            let (name, value) = field
                .split_once('=')
                .ok_or_else(|| Error::InvalidSnapshot(format!("malformed header field `{field}`")))?;
            match name {
                "x" => x = Some(parse_int(name, value)?),
                "y" => y = Some(parse_int(name, value)?),
                "score" => score = Some(parse_int(name, value)?),
                "goal" => at_goal = parse_flag(name, value)?,
                "done" => is_done = parse_flag(name, value)?,
                _ => {}
            }
        }

        Ok(Self {
            rows: lines.map(|l| l.chars().collect()).collect(),
            x: x.ok_or_else(|| missing("x"))?,
            y: y.ok_or_else(|| missing("y"))?,
            score: score.ok_or_else(|| missing("score"))?,
            at_goal,
            is_done,
        })
    }
}

fn missing(name: &str) -> Error {
    Error::InvalidSnapshot(format!("missing header field `{name}`"))
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| Error::InvalidSnapshot(format!("`{name}` is not an integer: `{value}`")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(Error::InvalidSnapshot(format!(
            "`{name}` is not a flag: `{value}`"
        ))),
    }
}
