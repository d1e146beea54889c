//! Commit bodies.
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>          (zero or more)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```

use super::{Error, Result};
use std::borrow::Cow;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Key {
    Tree,
    Parent,
    Author,
    Committer,
}

impl Key {
    fn new(field: &str) -> Result<Self> {
        match field {
            "tree" => Ok(Self::Tree),
            "parent" => Ok(Self::Parent),
            "author" => Ok(Self::Author),
            "committer" => Ok(Self::Committer),
            _ => Err(Error::UnknownField(field.into())),
        }
    }
}

/// A decoded commit.
///
/// Keys repeated in the body overwrite earlier values, except `parent` which
/// accumulates. A key that never appears is left empty.
///
/// The body is decoded as UTF-8 line by line; invalid sequences, including in
/// the message, become U+FFFD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    tree: String,
    parents: Vec<String>,
    author: String,
    committer: String,
    message: String,
}

impl Commit {
    pub fn parse(body: &[u8]) -> Result<Self> {
        let lines: Vec<Cow<'_, str>> = body
            .split(|&b| b == b'\n')
            .map(String::from_utf8_lossy)
            .collect();
        let mut commit = Self::default();

        for (i, line) in lines.iter().enumerate() {
            let mut fields = line.split_whitespace();

            // a blank line ends the metadata; everything after it is the message
            let Some(field) = fields.next() else {
                commit.message = lines[(i + 1)..].join("\n");
                break;
            };

            let key = Key::new(field)?;
            tracing::trace!(?key, "commit field");

            match key {
                Key::Tree => commit.tree = value_of(field, fields.next())?,
                Key::Parent => commit.parents.push(value_of(field, fields.next())?),
                Key::Author => commit.author = fields.collect::<Vec<_>>().join(" "),
                Key::Committer => commit.committer = fields.collect::<Vec<_>>().join(" "),
            }
        }

        Ok(commit)
    }

    pub fn tree(&self) -> &str {
        self.tree.as_str()
    }

    /// Parent ids in the order they were written; the first is the primary parent.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    pub fn committer(&self) -> &str {
        self.committer.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

fn value_of(key: &str, value: Option<&str>) -> Result<String> {
    value
        .map(String::from)
        .ok_or_else(|| Error::MalformedCommit(format!("{key:?} line has no value")))
}
