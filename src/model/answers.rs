//! Answer document types and the frozen key grammars
//!
//! Two key grammars are wire-frozen and must never change, or stored
//! documents become unreadable:
//! - answer keys inside a step: `"<section>-<question>"` (`^\d+-\d+$`)
//! - attachment question references: `"<step>.<section>-<question>"`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::errors::ModelError;

fn parse_index(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Addresses a question within a step: `"<section>-<question>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerKey {
    pub section: u32,
    pub question: u32,
}

impl AnswerKey {
    pub fn new(section: u32, question: u32) -> Self {
        Self { section, question }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.question)
    }
}

impl FromStr for AnswerKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidAnswerKey { got: s.to_string() };
        let (section, question) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            section: parse_index(section).ok_or_else(invalid)?,
            question: parse_index(question).ok_or_else(invalid)?,
        })
    }
}

impl Serialize for AnswerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnswerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = AnswerKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an answer key of the form '<section>-<question>'")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<AnswerKey, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

/// Addresses a question across the whole form: `"<step>.<section>-<question>"`.
/// Used by attachments to record which question they were uploaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionRef {
    pub step: u32,
    pub section: u32,
    pub question: u32,
}

impl QuestionRef {
    pub fn new(step: u32, section: u32, question: u32) -> Self {
        Self {
            step,
            section,
            question,
        }
    }

    /// The in-step answer key this reference points at
    pub fn answer_key(&self) -> AnswerKey {
        AnswerKey::new(self.section, self.question)
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}-{}", self.step, self.section, self.question)
    }
}

impl FromStr for QuestionRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidQuestionRef { got: s.to_string() };
        let (step, rest) = s.split_once('.').ok_or_else(invalid)?;
        let (section, question) = rest.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            step: parse_index(step).ok_or_else(invalid)?,
            section: parse_index(section).ok_or_else(invalid)?,
            question: parse_index(question).ok_or_else(invalid)?,
        })
    }
}

impl Serialize for QuestionRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A primitive answer value: string, non-negative integer, boolean, or null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Flag(bool),
    Int(u64),
    Text(String),
    Empty,
}

/// One row of a grid answer: column key to primitive value
pub type GridRow = BTreeMap<String, Primitive>;

/// The value stored under an answer key: a primitive, or grid rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Grid(Vec<GridRow>),
    Single(Primitive),
}

impl From<Primitive> for AnswerValue {
    fn from(value: Primitive) -> Self {
        AnswerValue::Single(value)
    }
}

/// Per-step answer state.
///
/// `is_valid` is tri-state: null until the client has run its own step
/// validation, then the recorded outcome. It is always serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub is_valid: Option<bool>,
    pub answers: BTreeMap<AnswerKey, AnswerValue>,
}

impl StepState {
    pub fn empty() -> Self {
        Self {
            is_valid: None,
            answers: BTreeMap::new(),
        }
    }
}

/// The answer document collected against a questionnaire.
///
/// `schema_version` is baked in at creation from the questionnaire in force
/// and never changes across the document's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDocument {
    pub schema_version: String,
    pub active_step: u32,
    pub steps: Vec<StepState>,
}

impl AnswerDocument {
    /// The empty document handed out when an application is created:
    /// one empty state per questionnaire step, nothing answered yet.
    pub fn fresh(schema_version: impl Into<String>, step_count: usize) -> Self {
        Self {
            schema_version: schema_version.into(),
            active_step: 0,
            steps: (0..step_count).map(|_| StepState::empty()).collect(),
        }
    }
}
