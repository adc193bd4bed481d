use chrono::NaiveDate;
use std::collections::BTreeSet;
use vacatur::models::{AnswerError, Question, QuestionKind};
use vacatur::parser::{default_definition, parse_definition};
use vacatur::rules::resolve;
use vacatur::{Answer, InterviewDefinition, InterviewEngine, InterviewRunner, ScriptedIo, Transition};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn default_engine() -> InterviewEngine {
    InterviewEngine::new(default_definition().unwrap())
        .unwrap()
        .with_reference_date(reference_date())
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defective_service_walkthrough() {
    let mut io = ScriptedIo::new([
        "UD-24-00123",
        "2024-01-01",
        "n",
        "3",
        "n",
        "y",
        "I was in the hospital for surgery",
        "1",
        "1,2",
        "done",
        "3",
        "y",
        "2024-06-18",
    ]);

    let outcome = InterviewRunner::new(default_engine(), &mut io).run().unwrap();

    assert_eq!(
        outcome.flags,
        set(&[
            "approaching_deadline",
            "did_not_receive_summons",
            "improper_service",
            "mailing_failed",
            "mailing_not_done",
            "no_actual_notice",
            "unable_to_appear_due_to_emergency",
            "urgent_lockout",
        ])
    );
    assert_eq!(outcome.summary_id.as_deref(), Some("summary"));
    assert_eq!(
        outcome.answers.get("service_method"),
        Some(&Answer::from("Posted on the door and mailed"))
    );
    assert_eq!(
        outcome.answers.get("household"),
        Some(&Answer::List(vec![
            "Minor children".to_string(),
            "Seniors (62 or older)".to_string(),
        ]))
    );
    assert_eq!(outcome.answers.get("household_size"), Some(&Answer::Number(3.0)));
    assert_eq!(io.remaining_inputs(), 0);

    let resolution = resolve(&outcome.flags);
    assert_eq!(resolution.statute_ids(), vec!["CCP § 473(b)", "CCP § 473.5"]);
    let justification = resolution.justification();
    assert_eq!(
        justification["CCP § 473(b)"],
        ["mailing_not_done", "unable_to_appear_due_to_emergency"]
    );
    assert_eq!(
        justification["CCP § 473.5"],
        ["no_actual_notice", "mailing_failed", "did_not_receive_summons"]
    );
}

#[test]
fn test_void_judgment_walkthrough() {
    let mut io = ScriptedIo::new([
        "UD-24-00999",
        "2024-06-01",
        "y",
        "y",
        "I did not think it mattered",
        "2",
        "4",
        "done",
        "1",
        "n",
    ]);

    let outcome = InterviewRunner::new(default_engine(), &mut io).run().unwrap();

    assert_eq!(outcome.flags, set(&["void_judgment", "wrong_party_named"]));
    assert!(!outcome.answers.contains("service_method"));
    assert!(!outcome.answers.contains("lockout_date"));
    assert_eq!(resolve(&outcome.flags).statute_ids(), vec!["CCP § 473(d)"]);
    assert!(io.contains_output("📋 Interview complete."));
}

#[test]
fn test_required_question_is_reasked() {
    let mut engine = default_engine();

    let transition = engine.process_answer(Answer::from("")).unwrap();
    assert_eq!(
        transition,
        Transition::Retry {
            question_id: "case_number".to_string()
        }
    );
    assert_eq!(engine.current_id(), Some("case_number"));
    assert!(engine.answers().is_empty());
    assert!(engine.flags().is_empty());

    let transition = engine.process_answer(Answer::from("UD-1")).unwrap();
    assert_eq!(transition.next_id(), Some("judgment_date"));
}

#[test]
fn test_runner_prints_required_warning() {
    let mut io = ScriptedIo::new([
        "",
        "UD-1",
        "2024-06-01",
        "y",
        "y",
        "no",
        "I forgot the date",
        "1",
        "done",
        "4",
        "done",
        "2",
        "n",
    ]);

    let outcome = InterviewRunner::new(default_engine(), &mut io).run().unwrap();

    assert!(io.contains_output("⚠️ This question is required."));
    assert!(io.contains_output("⚠️ Text must be at least 3 characters"));
    assert_eq!(outcome.flags, set(&["mistake_neglect"]));
    assert!(io.contains_output("⚠️ At least 1 choices required"));
    assert_eq!(
        outcome.answers.get("household"),
        Some(&Answer::List(vec!["Nobody else".to_string()]))
    );
    assert_eq!(io.remaining_inputs(), 0);
}

#[test]
fn test_two_node_graph() {
    let mut start = Question::new("start", QuestionKind::Boolean, "Start?");
    start.flags = vec!["x".to_string()];
    start.next = Some("end".to_string());
    let end = Question::new("end", QuestionKind::Summary, "Done");

    let mut engine = InterviewEngine::new(InterviewDefinition::new(vec![start, end])).unwrap();
    engine.process_answer(Answer::Bool(true)).unwrap();

    assert!(engine.is_complete());
    assert_eq!(engine.answers().len(), 1);
    assert_eq!(engine.answers().get("start"), Some(&Answer::Bool(true)));
    assert_eq!(engine.flags(), &set(&["x"]));
    assert!(engine.current_question().is_none());
    assert!(matches!(
        engine.process_answer(Answer::Bool(false)),
        Err(AnswerError::InterviewComplete)
    ));
}

#[test]
fn test_unknown_target_fails_construction() {
    let definition = parse_definition(
        r#"
questions:
  - id: a
    type: boolean
    prompt: A?
    follow_up:
      if_true:
        next: nowhere
"#,
    )
    .unwrap();

    let err = InterviewEngine::new(definition).unwrap_err();
    assert_eq!(err.to_string(), "Question a references non-existent question nowhere");
}

#[test]
fn test_option_branch_falls_back_to_own_next() {
    let definition = parse_definition(
        r#"
start_id: method
questions:
  - id: method
    type: choice
    prompt: How?
    options: [mail, hand]
    follow_up:
      options:
        mail:
          flags: [mailed]
    next: end
  - id: end
    type: summary
"#,
    )
    .unwrap();

    let mut engine = InterviewEngine::new(definition).unwrap();
    let transition = engine.process_answer(Answer::from("mail")).unwrap();

    assert_eq!(transition.next_id(), None);
    assert!(engine.is_complete());
    assert_eq!(engine.flags(), &set(&["mailed"]));
    assert_eq!(engine.summary_question().map(|q| q.id.as_str()), Some("end"));
}
