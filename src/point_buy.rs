// /point_buy.rs

// Interactive SPECIAL point-buy session.
//
// Raising a stat above its current value costs points, lowering it refunds
// them. The session can only be confirmed with `ok` once every point is
// spent, at which point the finished `Special` is handed back to the caller.
use thiserror::Error;

use crate::{
    console::{Console, TEXT_WIDTH, Tone},
    descriptions,
    error::{AppError, Result},
    special::{Special, SpecialError, SpecialStat},
};

pub const STARTING_POINTS: i32 = 5;
pub const PROMPT: &str = "Enter a command (or 'help'): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Confirm,
    Help(Option<String>), // Raw topic, resolved when the command is applied.
    Assign { stat: SpecialStat, value: i32 },
    Raise(SpecialStat),
    Lower(SpecialStat),
}

impl Command {
    /// Parses one line of input. A blank line yields `Ok(None)`.
    ///
    /// Commands are case-insensitive and whitespace around `=`, `+` and `-`
    /// is ignored, so `P = 3` and `p=3` are the same assignment.
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, Rejection> {
        let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
        let Some(first) = words.first() else {
            return Ok(None);
        };

        if words.len() == 1 && first == "ok" {
            return Ok(Some(Command::Confirm));
        }
        if first == "help" {
            let topic = words[1..].join(" ");
            return Ok(Some(Command::Help((!topic.is_empty()).then_some(topic))));
        }

        let compact: String = words.concat();
        let malformed = || Rejection::MalformedCommand(line.trim().to_string());

        if let Some((key, value)) = compact.split_once('=') {
            if key.is_empty() || value.is_empty() {
                return Err(malformed());
            }
            let stat = SpecialStat::from_key(key).ok_or_else(|| Rejection::UnknownKey(key.to_string()))?;
            let value = value
                .parse::<i32>()
                .map_err(|_| Rejection::NotANumber(value.to_string()))?;
            return Ok(Some(Command::Assign { stat, value }));
        }

        let (key, raise) = if let Some(key) = compact.strip_suffix('+') {
            (key, true)
        } else if let Some(key) = compact.strip_suffix('-') {
            (key, false)
        } else {
            return Err(malformed());
        };
        if key.is_empty() {
            return Err(malformed());
        }
        let stat = SpecialStat::from_key(key).ok_or_else(|| Rejection::UnknownKey(key.to_string()))?;
        Ok(Some(if raise {
            Command::Raise(stat)
        } else {
            Command::Lower(stat)
        }))
    }
}

// Every way a command can be turned down. None of these end the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid input format: '{0}'")]
    MalformedCommand(String),

    #[error("Unknown attribute - {0}")]
    UnknownKey(String),

    #[error("The attribute value is not a number: '{0}'")]
    NotANumber(String),

    #[error("{stat} must be between 1 and 10, got {value}")]
    OutOfRange { stat: SpecialStat, value: i32 },

    #[error("Not enough points for {stat}: it costs {cost}, {points_left} left")]
    InsufficientBudget {
        stat: SpecialStat,
        cost: i32,
        points_left: i32,
    },

    #[error("{0} SPECIAL point(s) left to distribute, spend them all before 'ok'")]
    PointsRemaining(i32),

    #[error("Unknown option - {0}")]
    UnknownHelpTopic(String),

    #[error("{0} is already 10 and cannot be raised")]
    AtUpperBound(SpecialStat),

    #[error("{0} is already 1 and cannot be lowered")]
    AtLowerBound(SpecialStat),

    #[error("The SPECIAL allocation is already confirmed")]
    SessionClosed,
}

impl Rejection {
    // Unknown attributes and help topics only get the message, not the whole panel again.
    pub fn redisplays_panel(&self) -> bool {
        !matches!(self, Rejection::UnknownKey(_) | Rejection::UnknownHelpTopic(_))
    }
}

impl From<SpecialError> for Rejection {
    fn from(error: SpecialError) -> Self {
        match error {
            SpecialError::UnknownKey(key) => Rejection::UnknownKey(key),
            SpecialError::OutOfRange { stat, value } => Rejection::OutOfRange { stat, value },
            SpecialError::AtUpperBound(stat) => Rejection::AtUpperBound(stat),
            SpecialError::AtLowerBound(stat) => Rejection::AtLowerBound(stat),
            incomplete @ (SpecialError::MissingKey(_) | SpecialError::DuplicateKey(_)) => {
                Rejection::MalformedCommand(incomplete.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    AwaitingCommand,
    HelpDisplay, // Lasts until the next command.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Accepted,
    Help(&'static str),
    Rejected(Rejection),
    Confirmed(Special),
}

#[derive(Debug, Clone)]
pub struct PointBuyEditor {
    special: Special,
    baseline: Special,
    starting_points: i32,
    points_left: i32,
    state: EditorState,
}

impl Default for PointBuyEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PointBuyEditor {
    /// All stats at 5 with 5 points to spend.
    pub fn new() -> Self {
        Self::with_points(Special::default(), STARTING_POINTS)
    }

    pub fn with_points(baseline: Special, points: i32) -> Self {
        Self {
            special: baseline,
            baseline,
            starting_points: points,
            points_left: points,
            state: EditorState::AwaitingCommand,
        }
    }

    pub fn special(&self) -> &Special {
        &self.special
    }

    pub fn points_left(&self) -> i32 {
        self.points_left
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    // Net points moved into the stats since the session started.
    pub fn spent(&self) -> i32 {
        self.special.total() - self.baseline.total()
    }

    pub fn starting_points(&self) -> i32 {
        self.starting_points
    }

    pub fn handle(&mut self, line: &str) -> Response {
        if self.state == EditorState::Confirmed {
            return Response::Rejected(Rejection::SessionClosed);
        }
        self.state = EditorState::AwaitingCommand;

        let response = match Command::parse(line) {
            Ok(None) => Response::Ignored,
            Ok(Some(command)) => self.apply(command).unwrap_or_else(Response::Rejected),
            Err(rejection) => Response::Rejected(rejection),
        };

        match &response {
            Response::Rejected(rejection) => log::debug!("SPECIAL command '{line}' rejected: {rejection}"),
            Response::Accepted => log::debug!(
                "SPECIAL command '{line}' accepted, {} point(s) left",
                self.points_left
            ),
            _ => {}
        }
        response
    }

    fn apply(&mut self, command: Command) -> std::result::Result<Response, Rejection> {
        match command {
            Command::Confirm => {
                if self.points_left != 0 {
                    return Err(Rejection::PointsRemaining(self.points_left));
                }
                self.state = EditorState::Confirmed;
                Ok(Response::Confirmed(self.special))
            }
            Command::Help(None) => {
                self.state = EditorState::HelpDisplay;
                Ok(Response::Help(descriptions::GENERAL))
            }
            Command::Help(Some(topic)) => {
                let stat = SpecialStat::from_topic(&topic).ok_or(Rejection::UnknownHelpTopic(topic))?;
                self.state = EditorState::HelpDisplay;
                Ok(Response::Help(descriptions::for_stat(stat)))
            }
            Command::Assign { stat, value } => {
                self.assign(stat, value)?;
                Ok(Response::Accepted)
            }
            Command::Raise(stat) => {
                let mut next = self.special;
                next.increment(stat)?;
                self.commit(stat, next)?;
                Ok(Response::Accepted)
            }
            Command::Lower(stat) => {
                let mut next = self.special;
                next.decrement(stat)?;
                self.commit(stat, next)?;
                Ok(Response::Accepted)
            }
        }
    }

    fn assign(&mut self, stat: SpecialStat, value: i32) -> std::result::Result<(), Rejection> {
        let mut next = self.special;
        next.set(stat, value)?;
        self.commit(stat, next)
    }

    // Swaps in `next` if the points cover the difference on `stat`.
    fn commit(&mut self, stat: SpecialStat, next: Special) -> std::result::Result<(), Rejection> {
        let cost = i32::from(next.get(stat)) - i32::from(self.special.get(stat));
        let projected = self.points_left - cost;
        if projected < 0 {
            return Err(Rejection::InsufficientBudget {
                stat,
                cost,
                points_left: self.points_left,
            });
        }
        self.points_left = projected;
        self.special = next;
        Ok(())
    }

    /// Runs the session on `console` until the player confirms.
    pub fn run<C: Console>(mut self, console: &mut C) -> Result<Special> {
        console.println(&descriptions::wrapped(descriptions::SPECIAL_INTRO, TEXT_WIDTH))?;
        self.render_panel(console)?;
        console.print(PROMPT)?;

        loop {
            let line = console.read_line()?.ok_or(AppError::InputClosed)?;
            match self.handle(&line) {
                Response::Ignored => {}
                Response::Accepted => self.render_panel(console)?,
                Response::Help(text) => {
                    console.println(&descriptions::wrapped(text, TEXT_WIDTH))?;
                }
                Response::Rejected(rejection) => {
                    console.error(&rejection.to_string())?;
                    if rejection.redisplays_panel() {
                        self.render_panel(console)?;
                    }
                }
                Response::Confirmed(special) => {
                    console.say("SPECIAL set:", Tone::Title)?;
                    for (stat, value) in special.snapshot() {
                        console.println(&format!("\t{} = {}", stat.key(), value))?;
                    }
                    log::info!("SPECIAL confirmed: {special:?}");
                    return Ok(special);
                }
            }
            console.print(PROMPT)?;
        }
    }

    fn render_panel<C: Console>(&self, console: &mut C) -> std::io::Result<()> {
        console.println(&format!(
            "SPECIAL points left to distribute - {}",
            self.points_left
        ))?;
        for (stat, value) in self.special.snapshot() {
            let line = format!("  {} = {}", stat.key().to_uppercase(), value);
            console.say(&line, Tone::Value)?;
        }
        if self.points_left == 0 {
            console.say("Type 'ok' to confirm your points if you are sure.", Tone::Hint)?;
        }
        Ok(())
    }
}
