use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A validated answer to one question
///
/// Text, date and choice questions all answer with `Text`; dates stay in
/// their `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Answer {
    /// Blank text or an empty selection. `false` and `0` are real answers.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Bool(_) | Answer::Number(_) => false,
            Answer::Text(text) => text.trim().is_empty(),
            Answer::List(items) => items.is_empty(),
        }
    }

    /// Short name of the answer's shape, used in type mismatch messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Answer::Bool(_) => "boolean",
            Answer::Number(_) => "number",
            Answer::Text(_) => "string",
            Answer::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Answer::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(true) => write!(f, "yes"),
            Answer::Bool(false) => write!(f, "no"),
            Answer::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Answer::Number(value) => write!(f, "{}", value),
            Answer::Text(value) => write!(f, "{}", value),
            Answer::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

impl From<f64> for Answer {
    fn from(value: f64) -> Self {
        Answer::Number(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Answer::List(items)
    }
}

/// Answers keyed by question id, in the order the questions were first answered
///
/// Answering the same question again replaces the stored value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    entries: Vec<(String, Answer)>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer, returning the value it replaced
    pub fn insert(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        let question_id = question_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == question_id) {
            Some((_, existing)) => Some(std::mem::replace(existing, answer)),
            None => {
                self.entries.push((question_id, answer));
                None
            }
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, answer)| answer)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries
            .iter()
            .map(|(id, answer)| (id.as_str(), answer))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, answer) in &self.entries {
            map.serialize_entry(id, answer)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for Answers {
    fn from_iter<T: IntoIterator<Item = (K, Answer)>>(iter: T) -> Self {
        let mut answers = Answers::new();
        for (id, answer) in iter {
            answers.insert(id, answer);
        }
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(Answer::from("").is_empty());
        assert!(Answer::from("   ").is_empty());
        assert!(Answer::List(vec![]).is_empty());
        assert!(!Answer::Bool(false).is_empty());
        assert!(!Answer::Number(0.0).is_empty());
        assert!(!Answer::from("x").is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Answer::Bool(true).to_string(), "yes");
        assert_eq!(Answer::Number(25.0).to_string(), "25");
        assert_eq!(Answer::Number(2.5).to_string(), "2.5");
        assert_eq!(
            Answer::List(vec!["a".to_string(), "b".to_string()]).to_string(),
            "a, b"
        );
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut answers = Answers::new();
        answers.insert("q1", Answer::from("first"));
        answers.insert("q2", Answer::Bool(true));
        let previous = answers.insert("q1", Answer::from("second"));

        assert_eq!(previous, Some(Answer::from("first")));
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.ids().collect::<Vec<_>>(), vec!["q1", "q2"]);
        assert_eq!(answers.get("q1"), Some(&Answer::from("second")));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let answers: Answers = vec![
            ("zeta", Answer::Bool(false)),
            ("alpha", Answer::Number(3.0)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"zeta":false,"alpha":3.0}"#);
    }
}
