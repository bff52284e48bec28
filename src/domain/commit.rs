use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// A single commit as seen by the classification engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit id; empty when the caller only has messages
    pub hash: String,
    pub author: String,
    pub date: NaiveDate,
    /// First line of the message
    pub subject: String,
    /// Remainder of the message, possibly empty
    pub body: String,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        author: impl Into<String>,
        date: NaiveDate,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        CommitRecord {
            hash: hash.into(),
            author: author.into(),
            date,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Build a record from a subject line alone (no hash, author or body)
    pub fn from_subject(subject: impl Into<String>) -> Self {
        CommitRecord {
            hash: String::new(),
            author: String::new(),
            date: NaiveDate::default(),
            subject: subject.into(),
            body: String::new(),
        }
    }

    /// Build a record from a full commit message, splitting subject and body
    pub fn from_message(
        hash: impl Into<String>,
        author: impl Into<String>,
        date: NaiveDate,
        message: &str,
    ) -> Self {
        let (subject, body) = split_message(message);
        CommitRecord::new(hash, author, date, subject, body)
    }

    /// Attach a body to the record
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a hash to the record
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Hash truncated to `len` characters, or `None` when no hash is known
    pub fn short_hash(&self, len: usize) -> Option<&str> {
        if self.hash.is_empty() {
            return None;
        }
        let end = self
            .hash
            .char_indices()
            .nth(len)
            .map(|(i, _)| i)
            .unwrap_or(self.hash.len());
        Some(&self.hash[..end])
    }

    /// Subject with its leading `type(scope)!:` prefix removed
    pub fn description(&self) -> &str {
        static PREFIX_RE: OnceLock<Regex> = OnceLock::new();
        let re = PREFIX_RE
            .get_or_init(|| Regex::new(r"^\w+(?:\([^)]+\))?!?:\s*").expect("valid prefix regex"));

        match re.find(&self.subject) {
            Some(m) => &self.subject[m.end()..],
            None => &self.subject,
        }
    }
}

/// Split a raw commit message into its subject line and trimmed body
pub fn split_message(message: &str) -> (String, String) {
    let mut parts = message.splitn(2, '\n');
    let subject = parts.next().unwrap_or_default().trim().to_string();
    let body = parts.next().unwrap_or_default().trim().to_string();
    (subject, body)
}
