//! Command validation and length-aware round-robin interleaving.

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::types::{RoverId, Warning, WarningKind};

/// A single rover instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
}

impl Command {
    /// Map a command character; only lower-case `l`, `r`, `f`, `b` are valid.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'l' => Some(Command::TurnLeft),
            'r' => Some(Command::TurnRight),
            'f' => Some(Command::Forward),
            'b' => Some(Command::Backward),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Command::TurnLeft => 'l',
            Command::TurnRight => 'r',
            Command::Forward => 'f',
            Command::Backward => 'b',
        }
    }
}

/// Command string submitted for one rover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    pub rover: String,
    pub commands: String,
}

impl CommandRequest {
    pub fn new(rover: impl Into<String>, commands: impl Into<String>) -> Self {
        Self {
            rover: rover.into(),
            commands: commands.into(),
        }
    }
}

/// A request whose rover has been resolved and whose commands parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRequest {
    pub rover: RoverId,
    pub commands: Vec<Command>,
}

/// One scheduled unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub rover: RoverId,
    pub command: Command,
}

/// FIFO of orders consumed strictly in sequence.
#[derive(Debug, Default)]
pub struct OrderQueue {
    queue: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.queue.push_back(order);
    }

    pub fn try_pop(&mut self) -> Option<Order> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Check every request against the command alphabet.
///
/// Returns one `InvalidCommand` warning per offending request; an empty
/// vector means the whole batch may run.
pub fn validate(requests: &[CommandRequest]) -> Vec<Warning> {
    requests
        .iter()
        .filter_map(|request| {
            let invalid: String = request
                .commands
                .chars()
                .filter(|ch| Command::from_char(*ch).is_none())
                .collect();
            if invalid.is_empty() {
                return None;
            }
            Some(Warning::new(
                request.rover.clone(),
                WarningKind::InvalidCommand,
                format!(
                    "command string {:?} contains {:?}; only l, r, f, b are allowed",
                    request.commands, invalid
                ),
            ))
        })
        .collect()
}

/// Parse a command string that already passed [`validate`].
pub fn parse_commands(commands: &str) -> Vec<Command> {
    commands.chars().filter_map(Command::from_char).collect()
}

/// Merge per-rover command rows column by column.
///
/// Rows are visited longest first; equal lengths keep submission order.
/// Exhausted rows stop contributing while longer ones continue alone.
pub fn interleave(requests: &[ParsedRequest]) -> OrderQueue {
    let mut rows: Vec<&ParsedRequest> = requests.iter().collect();
    // `sort_by_key` is stable, which keeps ties in submission order.
    rows.sort_by_key(|request| Reverse(request.commands.len()));
    let max_len = rows.first().map_or(0, |request| request.commands.len());

    let mut queue = OrderQueue::new();
    for column in 0..max_len {
        for request in &rows {
            if let Some(command) = request.commands.get(column) {
                queue.push(Order {
                    rover: request.rover,
                    command: *command,
                });
            }
        }
    }
    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(rover: RoverId, commands: &str) -> ParsedRequest {
        ParsedRequest {
            rover,
            commands: parse_commands(commands),
        }
    }

    fn drain(mut queue: OrderQueue) -> Vec<(RoverId, char)> {
        let mut out = Vec::new();
        while let Some(order) = queue.try_pop() {
            out.push((order.rover, order.command.as_char()));
        }
        out
    }

    #[test]
    fn shorter_row_finishes_early() {
        let queue = interleave(&[parsed(0, "lrf"), parsed(1, "fffbb")]);
        assert_eq!(queue.len(), 8);
        let orders = drain(queue);
        assert_eq!(
            orders,
            vec![
                (1, 'f'),
                (0, 'l'),
                (1, 'f'),
                (0, 'r'),
                (1, 'f'),
                (0, 'f'),
                (1, 'b'),
                (1, 'b'),
            ]
        );
        // Each rover keeps its own command order.
        let short: String = orders.iter().filter(|o| o.0 == 0).map(|o| o.1).collect();
        assert_eq!(short, "lrf");
    }

    #[test]
    fn ties_keep_submission_order() {
        let orders = drain(interleave(&[parsed(2, "ff"), parsed(0, "ll"), parsed(1, "r")]));
        assert_eq!(
            orders,
            vec![(2, 'f'), (0, 'l'), (1, 'r'), (2, 'f'), (0, 'l')]
        );
    }

    #[test]
    fn empty_batch_yields_no_orders() {
        assert!(interleave(&[]).is_empty());
        assert!(interleave(&[parsed(0, "")]).is_empty());
    }

    #[test]
    fn invalid_characters_are_reported_per_rover() {
        let warnings = validate(&[
            CommandRequest::new("Alpha", "lrx"),
            CommandRequest::new("Bravo", "ffb"),
            CommandRequest::new("Charlie", "F"),
        ]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].rover, "Alpha");
        assert_eq!(warnings[0].kind, WarningKind::InvalidCommand);
        assert!(warnings[0].message.contains("\"x\""));
        assert_eq!(warnings[1].rover, "Charlie");
    }

    #[test]
    fn valid_batch_has_no_warnings() {
        assert!(validate(&[CommandRequest::new("Alpha", "lrfb"), CommandRequest::new("Bravo", "")]).is_empty());
    }
}
