use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between sender and body in a serialized motif key.
///
/// Not escaped: a sender containing it cannot be split back unambiguously.
pub const MOTIF_KEY_SEPARATOR: &str = "|||";

/// A single chat message. `time` carries a lower-case meridiem, e.g. `10:05 am`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Message {
    pub time: String,
    pub sender: String,
    pub body: String,
}

impl Message {
    pub fn new(time: impl Into<String>, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Append a continuation line, space-joined. Empty fragments change nothing.
    pub fn extend_body(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.body.push(' ');
        self.body.push_str(fragment);
    }
}

/// A run of messages sharing one date, keyed by the date as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateGroup {
    pub date: String,
    pub messages: Vec<Message>,
}

impl DateGroup {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            messages: Vec::new(),
        }
    }
}

/// Parsed transcript: date groups in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    pub groups: Vec<DateGroup>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total messages across all groups.
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|g| g.messages.len()).sum()
    }

    /// Messages in transcript order, paired with their group date.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.groups
            .iter()
            .flat_map(|g| g.messages.iter().map(move |m| (g.date.as_str(), m)))
    }

    /// Render every message as a transcript line, in order.
    pub fn to_lines(&self) -> Vec<String> {
        self.messages()
            .map(|(date, m)| render_line(date, &m.time, &m.sender, &m.body))
            .collect()
    }
}

/// Format a reconstructed line: `<date> <time> <sender>: <body>`.
pub fn render_line(date: &str, time: &str, sender: &str, body: &str) -> String {
    format!("{date} {time} {sender}: {body}")
}

/// A unique (sender, body) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Motif {
    pub sender: String,
    pub body: String,
}

impl Motif {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// `<sender>|||<body>`.
    pub fn composite_key(&self) -> String {
        format!("{}{MOTIF_KEY_SEPARATOR}{}", self.sender, self.body)
    }

    /// Split a composite key on the first separator. `None` if it has none.
    pub fn from_composite_key(key: &str) -> Option<Self> {
        key.split_once(MOTIF_KEY_SEPARATOR)
            .map(|(sender, body)| Self::new(sender, body))
    }
}

/// Surrogate token for a motif, rendered as `$P<n>$`. Numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub const FIRST: Symbol = Symbol(1);

    /// `None` for zero, which is never allocated.
    pub fn new(n: u32) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$P{}$", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSymbolError(pub String);

impl fmt::Display for ParseSymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a motif symbol: {:?}", self.0)
    }
}

impl std::error::Error for ParseSymbolError {}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("$P")
            .and_then(|rest| rest.strip_suffix('$'))
            .filter(|digits| !digits.starts_with('0') && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
            .and_then(Symbol::new)
            .ok_or_else(|| ParseSymbolError(s.to_string()))
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
