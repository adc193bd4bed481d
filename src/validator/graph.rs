//! Structural validation of a question graph
//!
//! Checks, in order:
//! - at least one question, no empty or duplicate ids
//! - the start id exists
//! - every `next` and follow-up target exists
//! - the default path (`next` links from the start) has no cycle
//!
//! Questions the start can never reach are reported but are not an error.

use crate::models::{InterviewDefinition, StructureError};
use std::collections::{HashMap, HashSet, VecDeque};

/// What a successful structural check found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphReport {
    pub start_id: String,
    pub question_count: usize,
    /// Ids along `next` links from the start
    pub default_path: Vec<String>,
    /// Ids no transition from the start can reach, in declaration order
    pub unreachable: Vec<String>,
}

pub fn validate_definition(
    definition: &InterviewDefinition,
) -> Result<GraphReport, StructureError> {
    if definition.questions.is_empty() {
        return Err(StructureError::NoQuestions);
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    for (position, question) in definition.questions.iter().enumerate() {
        if question.id.trim().is_empty() {
            return Err(StructureError::invalid(
                format!("#{}", position),
                "id",
                "must not be empty",
            ));
        }
        if index.insert(question.id.as_str(), position).is_some() {
            return Err(StructureError::DuplicateId(question.id.clone()));
        }
    }

    if !index.contains_key(definition.start_id.as_str()) {
        return Err(StructureError::UnknownStart(definition.start_id.clone()));
    }

    for question in &definition.questions {
        if question.is_summary() && (question.next.is_some() || question.follow_up.is_some()) {
            let field = if question.next.is_some() { "next" } else { "follow_up" };
            return Err(StructureError::SummaryTransition {
                question: question.id.clone(),
                field,
            });
        }
        for target in question.targets() {
            if !index.contains_key(target) {
                return Err(StructureError::UnknownReference {
                    question: question.id.clone(),
                    target: target.to_string(),
                });
            }
        }
    }

    let default_path = default_path(definition, &index)?;
    let unreachable = unreachable(definition, &index);

    Ok(GraphReport {
        start_id: definition.start_id.clone(),
        question_count: definition.questions.len(),
        default_path,
        unreachable,
    })
}

fn default_path(
    definition: &InterviewDefinition,
    index: &HashMap<&str, usize>,
) -> Result<Vec<String>, StructureError> {
    let mut path: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = Some(definition.start_id.as_str());

    while let Some(id) = current {
        if !seen.insert(id) {
            let mut cycle: Vec<String> = path
                .iter()
                .skip_while(|visited| visited.as_str() != id)
                .cloned()
                .collect();
            cycle.push(id.to_string());
            return Err(StructureError::CycleDetected { path: cycle });
        }
        path.push(id.to_string());
        current = index
            .get(id)
            .and_then(|&i| definition.questions[i].next.as_deref());
    }
    Ok(path)
}

fn unreachable(definition: &InterviewDefinition, index: &HashMap<&str, usize>) -> Vec<String> {
    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([definition.start_id.as_str()]);

    while let Some(id) = queue.pop_front() {
        if !reached.insert(id) {
            continue;
        }
        if let Some(&i) = index.get(id) {
            queue.extend(definition.questions[i].targets());
        }
    }

    definition
        .questions
        .iter()
        .filter(|q| !reached.contains(q.id.as_str()))
        .map(|q| q.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Branch, FollowUp, Question, QuestionKind};

    fn boolean(id: &str, next: Option<&str>) -> Question {
        let mut q = Question::new(id, QuestionKind::Boolean, format!("{}?", id));
        q.next = next.map(str::to_string);
        q
    }

    fn summary(id: &str) -> Question {
        let mut q = Question::new(id, QuestionKind::Summary, "Done");
        q.prompt = None;
        q
    }

    #[test]
    fn test_valid_graph_report() {
        let mut first = boolean("a", Some("b"));
        first.follow_up = Some(FollowUp {
            if_false: Some(Branch {
                next: Some("end".to_string()),
                flags: vec![],
            }),
            ..Default::default()
        });
        let definition = InterviewDefinition::new(vec![
            first,
            boolean("b", Some("end")),
            summary("end"),
            boolean("orphan", None),
        ]);

        let report = validate_definition(&definition).unwrap();
        assert_eq!(report.start_id, "a");
        assert_eq!(report.question_count, 4);
        assert_eq!(report.default_path, vec!["a", "b", "end"]);
        assert_eq!(report.unreachable, vec!["orphan"]);
    }

    #[test]
    fn test_empty_graph() {
        let definition = InterviewDefinition::new(vec![]);
        assert_eq!(validate_definition(&definition), Err(StructureError::NoQuestions));
    }

    #[test]
    fn test_duplicate_id() {
        let definition = InterviewDefinition::new(vec![boolean("a", None), boolean("a", None)]);
        assert_eq!(
            validate_definition(&definition),
            Err(StructureError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn test_unknown_start() {
        let definition = InterviewDefinition::new(vec![boolean("a", None)]).with_start("zzz");
        assert_eq!(
            validate_definition(&definition),
            Err(StructureError::UnknownStart("zzz".to_string()))
        );
    }

    #[test]
    fn test_unknown_branch_target() {
        let mut q = boolean("a", None);
        q.follow_up = Some(FollowUp {
            if_true: Some(Branch {
                next: Some("missing".to_string()),
                flags: vec![],
            }),
            ..Default::default()
        });
        let definition = InterviewDefinition::new(vec![q]);

        assert_eq!(
            validate_definition(&definition).unwrap_err().to_string(),
            "Question a references non-existent question missing"
        );
    }

    #[test]
    fn test_default_path_cycle() {
        let definition = InterviewDefinition::new(vec![
            boolean("start", Some("a")),
            boolean("a", Some("b")),
            boolean("b", Some("a")),
        ]);

        assert_eq!(
            validate_definition(&definition),
            Err(StructureError::CycleDetected {
                path: vec!["a".to_string(), "b".to_string(), "a".to_string()]
            })
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let definition = InterviewDefinition::new(vec![boolean("a", Some("a"))]);
        assert!(matches!(
            validate_definition(&definition),
            Err(StructureError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_branch_back_edge_is_allowed() {
        // Only `next` links form the default path
        let mut b = boolean("b", None);
        b.follow_up = Some(FollowUp {
            if_true: Some(Branch {
                next: Some("a".to_string()),
                flags: vec![],
            }),
            ..Default::default()
        });
        let definition = InterviewDefinition::new(vec![boolean("a", Some("b")), b]);
        assert!(validate_definition(&definition).is_ok());
    }
}
