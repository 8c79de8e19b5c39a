//! Slash-command parsing: `/name[@bot] arg1 arg2 ...`.

use serde::{Deserialize, Serialize};

/// A parsed bot command. `name` is lowercased and stripped of the leading `/` and any `@botname` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    /// Bot named after `@` (`/help@SomeBot` → `SomeBot`), if any.
    pub target: Option<String>,
    /// Text after the command word, trimmed.
    pub arg_text: String,
}

impl Command {
    /// Returns `None` unless `text` starts with `/` followed by a non-empty command word.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;
        let (head, tail) = match rest.find(char::is_whitespace) {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };
        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target).filter(|t| !t.is_empty())),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_lowercase(),
            target: target.map(str::to_string),
            arg_text: tail.trim().to_string(),
        })
    }

    /// True unless the command names a different bot. Usernames compare case-insensitively; with
    /// no known `bot_username` every command is accepted.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (&self.target, bot_username) {
            (Some(target), Some(own)) => target.eq_ignore_ascii_case(own.trim_start_matches('@')),
            _ => true,
        }
    }

    /// Whitespace-delimited arguments.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.arg_text.split_whitespace()
    }

    /// First argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args().next()
    }
}
