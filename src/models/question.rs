//! Question model
//!
//! One node of the interview graph. Every question type shares a single
//! record; which fields matter is decided by `kind`.

use crate::flags::{DateThresholds, TextPatterns};
use crate::models::validation::StructureError;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Question type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Boolean,
    Text,
    Number,
    Date,
    Choice,
    MultipleChoice,
    /// Terminal node; reaching it ends the interview
    Summary,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Boolean => "boolean",
            QuestionKind::Text => "text",
            QuestionKind::Number => "number",
            QuestionKind::Date => "date",
            QuestionKind::Choice => "choice",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::Summary => "summary",
        }
    }

    /// Choice types must declare `options`
    pub fn has_options(&self) -> bool {
        matches!(self, QuestionKind::Choice | QuestionKind::MultipleChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(QuestionKind::Boolean),
            "text" => Ok(QuestionKind::Text),
            "number" => Ok(QuestionKind::Number),
            "date" => Ok(QuestionKind::Date),
            "choice" => Ok(QuestionKind::Choice),
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "summary" => Ok(QuestionKind::Summary),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// One follow-up branch: where to go next and which flags to add
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    pub next: Option<String>,
    pub flags: Vec<String>,
}

/// Conditional branching on the submitted answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowUp {
    pub if_true: Option<Branch>,
    pub if_false: Option<Branch>,
    /// Branches keyed by the literal answer of a choice question
    pub options: BTreeMap<String, Branch>,
}

impl FollowUp {
    /// Branch for a boolean answer
    pub fn for_bool(&self, answer: bool) -> Option<&Branch> {
        if answer {
            self.if_true.as_ref()
        } else {
            self.if_false.as_ref()
        }
    }

    /// Branch keyed by a literal text answer
    pub fn for_option(&self, answer: &str) -> Option<&Branch> {
        self.options.get(answer)
    }

    /// All branches, boolean ones first
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.if_true
            .iter()
            .chain(self.if_false.iter())
            .chain(self.options.values())
    }
}

/// One node of the interview graph
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    /// Display text; only summary questions may omit it
    pub prompt: Option<String>,
    pub required: bool,
    pub options: Vec<String>,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_choices: Option<usize>,
    pub max_choices: Option<usize>,

    /// Raised whenever the question is answered
    pub flags: Vec<String>,
    pub flags_from_text: TextPatterns,
    pub date_flags: DateThresholds,

    pub next: Option<String>,
    pub follow_up: Option<FollowUp>,
}

impl Question {
    /// A bare question of the given type with no constraints or transitions
    pub fn new(id: impl Into<String>, kind: QuestionKind, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            prompt: Some(prompt.into()),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            min_choices: None,
            max_choices: None,
            flags: Vec::new(),
            flags_from_text: TextPatterns::default(),
            date_flags: DateThresholds::new(),
            next: None,
            follow_up: None,
        }
    }

    /// Parse one raw question definition
    ///
    /// `index` is the question's position in the document and is only used
    /// in error messages when the id itself is missing. Null fields count as
    /// absent and unknown fields are ignored.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, StructureError> {
        let map = value
            .as_mapping()
            .ok_or(StructureError::NotAMapping { index })?;

        let fallback = format!("#{}", index);
        let id = match field(map, "id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
            Some(Value::String(_)) => {
                return Err(StructureError::invalid(fallback, "id", "must not be empty"))
            }
            Some(_) => return Err(StructureError::invalid(fallback, "id", "must be a string")),
            None => {
                return Err(StructureError::MissingField {
                    question: fallback,
                    field: "id",
                })
            }
        };
        let reader = FieldReader { id: &id, map };

        let kind = reader
            .string("type")?
            .ok_or_else(|| StructureError::MissingField {
                question: id.clone(),
                field: "type",
            })?
            .parse::<QuestionKind>()
            .map_err(|reason| StructureError::invalid(&id, "type", reason))?;

        let prompt = reader.string("prompt")?;
        if prompt.is_none() && kind != QuestionKind::Summary {
            return Err(StructureError::MissingField {
                question: id.clone(),
                field: "prompt",
            });
        }

        let options = reader.string_list("options")?.unwrap_or_default();
        if kind.has_options() && options.is_empty() {
            return Err(StructureError::MissingField {
                question: id.clone(),
                field: "options",
            });
        }

        let next = reader.string("next")?;
        let follow_up = match field(map, "follow_up") {
            Some(value) => Some(reader.follow_up(value)?),
            None => None,
        };

        if kind == QuestionKind::Summary {
            if next.is_some() {
                return Err(StructureError::SummaryTransition {
                    question: id.clone(),
                    field: "next",
                });
            }
            if follow_up.is_some() {
                return Err(StructureError::SummaryTransition {
                    question: id.clone(),
                    field: "follow_up",
                });
            }
        }

        let flags_from_text = match field(map, "flags_from_text") {
            Some(value) => TextPatterns::from_yaml(value)
                .map_err(|reason| StructureError::invalid(&id, "flags_from_text", reason))?,
            None => TextPatterns::default(),
        };

        let question = Question {
            kind,
            prompt,
            required: reader.boolean("required")?.unwrap_or(false),
            options,
            min: reader.number("min")?,
            max: reader.number("max")?,
            min_length: reader.count("min_length")?,
            max_length: reader.count("max_length")?,
            min_choices: reader.count("min_choices")?,
            max_choices: reader.count("max_choices")?,
            flags: reader.string_list("flags")?.unwrap_or_default(),
            flags_from_text,
            date_flags: reader.thresholds("date_flags")?,
            next,
            follow_up,
            id,
        };
        question.check_bounds()?;
        Ok(question)
    }

    fn check_bounds(&self) -> Result<(), StructureError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(StructureError::invalid(&self.id, "min", "greater than max"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(StructureError::invalid(
                    &self.id,
                    "min_length",
                    "greater than max_length",
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_choices, self.max_choices) {
            if min > max {
                return Err(StructureError::invalid(
                    &self.id,
                    "min_choices",
                    "greater than max_choices",
                ));
            }
        }
        Ok(())
    }

    pub fn is_summary(&self) -> bool {
        self.kind == QuestionKind::Summary
    }

    /// Prompt text, or an empty string for summaries without one
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }

    /// Every id this question can transition to, `next` first
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self.next.iter().map(String::as_str).collect();
        if let Some(follow_up) = &self.follow_up {
            targets.extend(follow_up.branches().filter_map(|b| b.next.as_deref()));
        }
        targets
    }
}

fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Typed accessors over one question's raw mapping
struct FieldReader<'a> {
    id: &'a str,
    map: &'a Mapping,
}

impl FieldReader<'_> {
    fn error(&self, field: &str, reason: impl Into<String>) -> StructureError {
        StructureError::invalid(self.id, field, reason)
    }

    fn string(&self, key: &str) -> Result<Option<String>, StructureError> {
        match field(self.map, key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.error(key, "must be a string")),
        }
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, StructureError> {
        match field(self.map, key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.error(key, "must be true or false")),
        }
    }

    fn number(&self, key: &str) -> Result<Option<f64>, StructureError> {
        match field(self.map, key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.error(key, "must be a number")),
        }
    }

    fn count(&self, key: &str) -> Result<Option<usize>, StructureError> {
        match field(self.map, key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.error(key, "must be a non-negative integer")),
        }
    }

    fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, StructureError> {
        let Some(value) = field(self.map, key) else {
            return Ok(None);
        };
        let items = value
            .as_sequence()
            .ok_or_else(|| self.error(key, "must be a list"))?;
        items
            .iter()
            .map(|item| scalar_string(item).ok_or_else(|| self.error(key, "entries must be strings")))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn thresholds(&self, key: &str) -> Result<DateThresholds, StructureError> {
        let Some(value) = field(self.map, key) else {
            return Ok(DateThresholds::new());
        };
        let map = value
            .as_mapping()
            .ok_or_else(|| self.error(key, "must be a mapping of flag to days"))?;

        let mut thresholds = DateThresholds::new();
        for (label, days) in map {
            let label = label
                .as_str()
                .ok_or_else(|| self.error(key, "flag labels must be strings"))?;
            let days = days
                .as_i64()
                .ok_or_else(|| self.error(key, format!("threshold for '{}' must be an integer", label)))?;
            thresholds.insert(label.to_string(), days);
        }
        Ok(thresholds)
    }

    fn follow_up(&self, value: &Value) -> Result<FollowUp, StructureError> {
        let map = value
            .as_mapping()
            .ok_or_else(|| self.error("follow_up", "must be a mapping"))?;

        let mut follow_up = FollowUp::default();
        for (key, branch) in map {
            match key.as_str() {
                Some("if_true") => {
                    follow_up.if_true = Some(self.branch("follow_up.if_true", branch)?)
                }
                Some("if_false") => {
                    follow_up.if_false = Some(self.branch("follow_up.if_false", branch)?)
                }
                Some("options") => {
                    let options = branch
                        .as_mapping()
                        .ok_or_else(|| self.error("follow_up.options", "must be a mapping"))?;
                    for (answer, branch) in options {
                        let answer = scalar_string(answer).ok_or_else(|| {
                            self.error("follow_up.options", "keys must be strings")
                        })?;
                        let field = format!("follow_up.options.{}", answer);
                        follow_up.options.insert(answer, self.branch(&field, branch)?);
                    }
                }
                _ => {}
            }
        }
        Ok(follow_up)
    }

    fn branch(&self, key: &str, value: &Value) -> Result<Branch, StructureError> {
        if value.is_null() {
            return Ok(Branch::default());
        }
        let map = value
            .as_mapping()
            .ok_or_else(|| self.error(key, "must be a mapping"))?;

        let next = match field(map, "next") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(self.error(&format!("{}.next", key), "must be a string")),
        };
        let flags = match field(map, "flags") {
            None => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|item| {
                    scalar_string(item)
                        .ok_or_else(|| self.error(&format!("{}.flags", key), "entries must be strings"))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(self.error(&format!("{}.flags", key), "must be a list")),
        };
        Ok(Branch { next, flags })
    }
}

/// Strings, numbers and booleans as text; YAML turns `- 1` or `yes` into non-strings
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
