//! Chat export parser: `M/D/YY, H:MM AM - Sender: Body` lines into dated groups.

use crate::junk::JunkFilter;
use crate::normalize::{normalize_line, split_lines};
use crate::traits::TranscriptParser;
use gp_core::config::ParserConfig;
use gp_core::{DateGroup, Message, Transcript};
use regex::Regex;
use std::sync::LazyLock;

static RE_MESSAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"^(\d{1,2}/\d{1,2}/\d{2}(?:\d{2})?),\s*(\d{1,2}:\d{2})\s*((?i:am|pm))\s*-\s*(.*?):\s*(.*)$"
).unwrap());

/// Counters collected during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub messages: usize,
    pub junk: usize,
    pub continuations: usize,
    /// Non-matching lines seen before the first kept message.
    pub dropped: usize,
}

/// A matched message line, before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine<'a> {
    pub date: &'a str,
    pub time: String,
    pub sender: &'a str,
    pub body: &'a str,
}

/// Match a normalized line against the message pattern.
pub fn match_message_line(line: &str) -> Option<MessageLine<'_>> {
    let caps = RE_MESSAGE.captures(line)?;
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    Some(MessageLine {
        date: field(1),
        time: format!("{} {}", field(2), field(3).to_lowercase()),
        sender: field(4),
        body: field(5),
    })
}

/// Parser for exported chat transcripts.
#[derive(Debug, Clone, Default)]
pub struct ChatExportParser {
    junk: JunkFilter,
}

impl ChatExportParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self { junk: JunkFilter::from_config(config) }
    }

    pub fn with_junk_filter(junk: JunkFilter) -> Self {
        Self { junk }
    }

    /// Parse and report what was kept, merged and dropped.
    pub fn parse_with_stats(&self, content: &str) -> (Transcript, ParseStats) {
        let mut transcript = Transcript::new();
        let mut stats = ParseStats::default();

        for raw in split_lines(content) {
            stats.lines += 1;
            let line = normalize_line(raw);

            if let Some(m) = match_message_line(&line) {
                if self.junk.is_junk(m.body) {
                    stats.junk += 1;
                    continue;
                }
                let needs_group = transcript
                    .groups
                    .last()
                    .map_or(true, |g| g.date != m.date);
                if needs_group {
                    transcript.groups.push(DateGroup::new(m.date));
                }
                if let Some(group) = transcript.groups.last_mut() {
                    group.messages.push(Message::new(m.time, m.sender, m.body));
                }
                stats.messages += 1;
                continue;
            }

            // Junk messages never enter the transcript, so this is the last kept one.
            let last = transcript.groups.last_mut().and_then(|g| g.messages.last_mut());
            match last {
                Some(message) => {
                    message.extend_body(&line);
                    stats.continuations += 1;
                }
                None => stats.dropped += 1,
            }
        }

        tracing::debug!(
            lines = stats.lines,
            messages = stats.messages,
            junk = stats.junk,
            continuations = stats.continuations,
            dropped = stats.dropped,
            groups = transcript.groups.len(),
            "parsed transcript"
        );
        (transcript, stats)
    }
}

impl TranscriptParser for ChatExportParser {
    fn parse_content(&self, content: &str) -> Transcript {
        self.parse_with_stats(content).0
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![".txt".into()]
    }
}
