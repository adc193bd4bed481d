//! Interview engine - state machine over a question graph
//!
//! The engine owns one session and performs no I/O. Callers ask it for the
//! current question, obtain an answer however they like, and feed it back
//! through [`InterviewEngine::process_answer`] until [`is_complete`] holds.
//!
//! [`is_complete`]: InterviewEngine::is_complete

use crate::flags::{evaluate_date_flags, evaluate_text_flags};
use crate::models::{
    Answer, AnswerError, Answers, InterviewDefinition, Question, QuestionKind, StructureError,
};
use crate::state::{FlagEvent, FlagSource, Session};
use crate::validator::{validate_answer, validate_definition, GraphReport};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Outcome of one accepted `process_answer` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Required question answered with nothing; ask it again
    Retry { question_id: String },
    /// Answer stored; `None` means the interview is complete
    Advance { next_id: Option<String> },
}

impl Transition {
    /// Id of the question to ask next, if any
    pub fn next_id(&self) -> Option<&str> {
        match self {
            Transition::Retry { question_id } => Some(question_id),
            Transition::Advance { next_id } => next_id.as_deref(),
        }
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, Transition::Retry { .. })
    }
}

/// Drives one interview over a validated question graph
#[derive(Debug, Clone)]
pub struct InterviewEngine {
    title: Option<String>,
    questions: Vec<Question>,
    index: HashMap<String, usize>,
    start_id: String,
    current_id: Option<String>,
    summary_id: Option<String>,
    reference_date: Option<NaiveDate>,
    report: GraphReport,
    session: Session,
}

impl InterviewEngine {
    /// Validate the graph and position the engine at its start question
    pub fn new(definition: InterviewDefinition) -> Result<Self, StructureError> {
        let report = validate_definition(&definition)?;
        if !report.unreachable.is_empty() {
            tracing::warn!(
                unreachable = ?report.unreachable,
                "questions unreachable from start"
            );
        }

        let index = definition
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), i))
            .collect();

        let mut engine = Self {
            title: definition.title,
            questions: definition.questions,
            index,
            start_id: definition.start_id.clone(),
            current_id: None,
            summary_id: None,
            reference_date: None,
            report,
            session: Session::new(),
        };
        engine.move_to(Some(definition.start_id));

        tracing::info!(
            start = %engine.start_id,
            questions = engine.questions.len(),
            "interview engine ready"
        );
        Ok(engine)
    }

    /// Fix the date that date flags are measured against (defaults to today)
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = Some(reference_date);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&i| &self.questions[i])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn start_id(&self) -> &str {
        &self.start_id
    }

    /// Structural facts found while validating the graph
    pub fn report(&self) -> &GraphReport {
        &self.report
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// The question to ask next, or `None` once complete
    pub fn current_question(&self) -> Option<&Question> {
        self.current_id.as_deref().and_then(|id| self.question(id))
    }

    /// The summary node the interview ended on, if it ended on one
    pub fn summary_question(&self) -> Option<&Question> {
        self.summary_id.as_deref().and_then(|id| self.question(id))
    }

    pub fn is_complete(&self) -> bool {
        self.current_id.is_none()
    }

    pub fn answers(&self) -> &Answers {
        self.session.answers()
    }

    /// Deduplicated flags raised so far, alphabetical
    pub fn flags(&self) -> &BTreeSet<String> {
        self.session.flags()
    }

    pub fn flag_trail(&self) -> &[FlagEvent] {
        self.session.trail()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Submit an answer for the current question
    ///
    /// A blank answer to a required question returns [`Transition::Retry`]
    /// without storing anything. Otherwise the answer is validated, stored,
    /// flags are raised and the engine moves to the next question.
    pub fn process_answer(&mut self, answer: Answer) -> Result<Transition, AnswerError> {
        let Some(position) = self.current_id.as_deref().and_then(|id| self.index.get(id).copied())
        else {
            return Err(AnswerError::InterviewComplete);
        };
        let question = &self.questions[position];

        if question.required && answer.is_empty() {
            tracing::debug!(question_id = %question.id, "required question left blank");
            return Ok(Transition::Retry {
                question_id: question.id.clone(),
            });
        }

        validate_answer(question, &answer)?;

        raise_answer_flags(question, &answer, self.reference_date, &mut self.session);
        let next_id = select_next(question, &answer, &mut self.session);
        self.session.record_answer(&question.id, answer);

        self.move_to(next_id);
        Ok(Transition::Advance {
            next_id: self.current_id.clone(),
        })
    }

    fn move_to(&mut self, next_id: Option<String>) {
        match next_id {
            Some(id) if self.question(&id).is_some_and(Question::is_summary) => {
                tracing::debug!(summary = %id, "reached summary");
                self.summary_id = Some(id);
                self.current_id = None;
            }
            next => self.current_id = next,
        }
        if self.current_id.is_none() {
            tracing::info!(
                answers = self.session.answers().len(),
                flags = self.session.flags().len(),
                "interview complete"
            );
        }
    }
}

/// Raise static, text and date flags for an accepted answer
fn raise_answer_flags(
    question: &Question,
    answer: &Answer,
    reference_date: Option<NaiveDate>,
    session: &mut Session,
) {
    for flag in &question.flags {
        session.raise(&question.id, flag, FlagSource::Static);
    }

    let Some(text) = answer.as_text() else {
        return;
    };
    match question.kind {
        QuestionKind::Text if !question.flags_from_text.is_empty() => {
            for flag in evaluate_text_flags(&question.flags_from_text, text) {
                session.raise(&question.id, &flag, FlagSource::Text);
            }
        }
        QuestionKind::Date if !question.date_flags.is_empty() => {
            for flag in evaluate_date_flags(&question.date_flags, text, reference_date) {
                session.raise(&question.id, &flag, FlagSource::Date);
            }
        }
        _ => {}
    }
}

/// Apply the matching follow-up branch and pick the next question id
fn select_next(question: &Question, answer: &Answer, session: &mut Session) -> Option<String> {
    let branch = question
        .follow_up
        .as_ref()
        .and_then(|follow_up| match answer {
            Answer::Bool(value) => follow_up.for_bool(*value),
            Answer::Text(text) => follow_up.for_option(text),
            Answer::Number(_) | Answer::List(_) => None,
        });

    match branch {
        Some(branch) => {
            for flag in &branch.flags {
                session.raise(&question.id, flag, FlagSource::Branch);
            }
            branch.next.clone().or_else(|| question.next.clone())
        }
        None => question.next.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::TextPatterns;
    use crate::models::{Branch, FollowUp};

    fn question(id: &str, kind: QuestionKind, next: Option<&str>) -> Question {
        let mut q = Question::new(id, kind, format!("{}?", id));
        q.next = next.map(str::to_string);
        if kind.has_options() {
            q.options = vec!["a".to_string(), "b".to_string()];
        }
        q
    }

    fn summary(id: &str) -> Question {
        let mut q = Question::new(id, QuestionKind::Summary, "All done");
        q.next = None;
        q
    }

    fn engine(questions: Vec<Question>) -> InterviewEngine {
        InterviewEngine::new(InterviewDefinition::new(questions)).unwrap()
    }

    #[test]
    fn test_single_boolean_to_summary() {
        let mut start = question("start", QuestionKind::Boolean, Some("end"));
        start.flags = vec!["x".to_string()];
        let mut engine = engine(vec![start, summary("end")]);

        assert_eq!(engine.current_id(), Some("start"));
        let transition = engine.process_answer(Answer::Bool(true)).unwrap();

        assert_eq!(transition, Transition::Advance { next_id: None });
        assert!(engine.is_complete());
        assert_eq!(engine.answers().get("start"), Some(&Answer::Bool(true)));
        assert_eq!(engine.flags().iter().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(engine.summary_question().map(|q| q.id.as_str()), Some("end"));
    }

    #[test]
    fn test_required_blank_retries() {
        let mut q = question("name", QuestionKind::Text, None);
        q.required = true;
        q.flags = vec!["asked".to_string()];
        let mut engine = engine(vec![q]);

        let transition = engine.process_answer(Answer::from("  ")).unwrap();
        assert_eq!(
            transition,
            Transition::Retry {
                question_id: "name".to_string()
            }
        );
        assert_eq!(engine.current_id(), Some("name"));
        assert!(engine.answers().is_empty());
        assert!(engine.flags().is_empty());
    }

    #[test]
    fn test_optional_blank_is_stored() {
        let mut engine = engine(vec![
            question("note", QuestionKind::Text, Some("next")),
            question("next", QuestionKind::Boolean, None),
        ]);

        engine.process_answer(Answer::from("")).unwrap();
        assert_eq!(engine.answers().get("note"), Some(&Answer::from("")));
        assert_eq!(engine.current_id(), Some("next"));
    }

    #[test]
    fn test_optional_empty_selection_below_min_choices() {
        let mut q = question("household", QuestionKind::MultipleChoice, None);
        q.min_choices = Some(1);
        let mut engine = engine(vec![q]);

        let err = engine.process_answer(Answer::List(vec![])).unwrap_err();
        assert!(matches!(err, AnswerError::Validation(ref e) if e.constraint() == "min_choices"));
        assert_eq!(engine.current_id(), Some("household"));
        assert!(engine.answers().is_empty());

        engine.process_answer(Answer::List(vec!["a".to_string()])).unwrap();
        assert!(engine.is_complete());
    }

    #[test]
    fn test_optional_blank_text_below_min_length() {
        let mut q = question("reason", QuestionKind::Text, None);
        q.min_length = Some(3);
        let mut engine = engine(vec![q]);

        let err = engine.process_answer(Answer::from("")).unwrap_err();
        assert!(matches!(err, AnswerError::Validation(ref e) if e.constraint() == "min_length"));
        assert!(engine.answers().get("reason").is_none());
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_optional_choice_rejects_blank() {
        let mut engine = engine(vec![question("method", QuestionKind::Choice, None)]);

        let err = engine.process_answer(Answer::from("")).unwrap_err();
        assert!(matches!(err, AnswerError::Validation(ref e) if e.constraint() == "options"));
        assert!(engine.answers().is_empty());
    }

    #[test]
    fn test_validation_error_keeps_position() {
        let mut q = question("age", QuestionKind::Number, None);
        q.min = Some(18.0);
        let mut engine = engine(vec![q]);

        let err = engine.process_answer(Answer::Number(3.0)).unwrap_err();
        assert!(matches!(err, AnswerError::Validation(ref e) if e.constraint() == "min"));
        assert_eq!(engine.current_id(), Some("age"));
        assert!(engine.answers().is_empty());
    }

    #[test]
    fn test_boolean_branch_flags_and_fallback_next() {
        let mut served = question("served", QuestionKind::Boolean, Some("default"));
        served.follow_up = Some(FollowUp {
            if_true: Some(Branch {
                next: Some("detour".to_string()),
                flags: vec![],
            }),
            if_false: Some(Branch {
                next: None,
                flags: vec!["no_actual_notice".to_string()],
            }),
            options: Default::default(),
        });
        let questions = vec![
            served,
            question("detour", QuestionKind::Boolean, None),
            question("default", QuestionKind::Boolean, None),
        ];

        let mut yes = engine(questions.clone());
        yes.process_answer(Answer::Bool(true)).unwrap();
        assert_eq!(yes.current_id(), Some("detour"));
        assert!(yes.flags().is_empty());

        let mut no = engine(questions);
        no.process_answer(Answer::Bool(false)).unwrap();
        assert_eq!(no.current_id(), Some("default"));
        assert!(no.flags().contains("no_actual_notice"));
        assert_eq!(no.flag_trail()[0].source, FlagSource::Branch);
    }

    #[test]
    fn test_option_branch() {
        let mut method = question("method", QuestionKind::Choice, Some("end"));
        method.follow_up = Some(FollowUp {
            options: [(
                "b".to_string(),
                Branch {
                    next: Some("b_detail".to_string()),
                    flags: vec!["picked_b".to_string()],
                },
            )]
            .into_iter()
            .collect(),
            ..Default::default()
        });
        let questions = vec![
            method,
            question("b_detail", QuestionKind::Text, Some("end")),
            summary("end"),
        ];

        let mut a = engine(questions.clone());
        a.process_answer(Answer::from("a")).unwrap();
        assert!(a.is_complete());
        assert!(a.flags().is_empty());

        let mut b = engine(questions);
        b.process_answer(Answer::from("b")).unwrap();
        assert_eq!(b.current_id(), Some("b_detail"));
        assert!(b.flags().contains("picked_b"));
    }

    #[test]
    fn test_text_and_date_flags() {
        let mut reason = question("reason", QuestionKind::Text, Some("when"));
        reason.flags_from_text = TextPatterns::new([("emergency", "emergency")]).unwrap();
        let mut when = question("when", QuestionKind::Date, None);
        when.date_flags = [("urgent".to_string(), 7)].into_iter().collect();

        let mut engine = engine(vec![reason, when])
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        engine
            .process_answer(Answer::from("There was an Emergency"))
            .unwrap();
        engine.process_answer(Answer::from("2024-06-05")).unwrap();

        assert_eq!(
            engine.flags().iter().collect::<Vec<_>>(),
            vec!["emergency", "urgent"]
        );
        let sources: Vec<_> = engine.flag_trail().iter().map(|e| e.source).collect();
        assert_eq!(sources, vec![FlagSource::Text, FlagSource::Date]);
    }

    #[test]
    fn test_complete_engine_rejects_answers() {
        let mut engine = engine(vec![question("only", QuestionKind::Boolean, None)]);
        engine.process_answer(Answer::Bool(false)).unwrap();

        assert!(engine.is_complete());
        assert!(engine.current_question().is_none());
        assert_eq!(
            engine.process_answer(Answer::Bool(true)),
            Err(AnswerError::InterviewComplete)
        );
    }

    #[test]
    fn test_summary_start_is_complete_at_construction() {
        let engine = engine(vec![summary("end")]);
        assert!(engine.is_complete());
        assert_eq!(engine.summary_question().map(|q| q.id.as_str()), Some("end"));
    }

    #[test]
    fn test_construction_rejects_bad_reference() {
        let result = InterviewEngine::new(InterviewDefinition::new(vec![question(
            "a",
            QuestionKind::Boolean,
            Some("ghost"),
        )]));
        assert!(matches!(
            result,
            Err(StructureError::UnknownReference { ref target, .. }) if target == "ghost"
        ));
    }
}
