//! Turning raw input lines into typed answers
//!
//! Input that cannot even be read as the question's type (a word where a
//! number is expected, an option index out of range) is re-asked here.
//! Anything that parses is handed to the engine, which owns the remaining
//! checks: required, bounds, lengths.

use crate::flags::parse_date;
use crate::io::InterviewIo;
use crate::models::{Answer, Question, QuestionKind};
use std::io;

/// Ask one question until the input parses as its type
pub fn ask<I: InterviewIo + ?Sized>(io: &mut I, question: &Question) -> io::Result<Answer> {
    io.write_output("");
    io.write_output(&format!("❓ {}", question.prompt_text()));

    match question.kind {
        QuestionKind::Text => Ok(Answer::Text(io.read_input("Your answer: ")?.trim().to_string())),
        QuestionKind::Number => ask_number(io),
        QuestionKind::Boolean => ask_boolean(io),
        QuestionKind::Date => ask_date(io),
        QuestionKind::Choice => ask_choice(io, &question.options),
        QuestionKind::MultipleChoice => ask_multiple(io, &question.options),
        QuestionKind::Summary => Ok(Answer::Text(String::new())),
    }
}

fn ask_number<I: InterviewIo + ?Sized>(io: &mut I) -> io::Result<Answer> {
    loop {
        match io.read_input("Enter a number: ")?.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(Answer::Number(value)),
            _ => io.write_output("Please enter a valid number."),
        }
    }
}

fn ask_boolean<I: InterviewIo + ?Sized>(io: &mut I) -> io::Result<Answer> {
    loop {
        match io.read_input("Enter [y/n]: ")?.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Answer::Bool(true)),
            "n" | "no" => return Ok(Answer::Bool(false)),
            _ => io.write_output("Please enter y or n."),
        }
    }
}

fn ask_date<I: InterviewIo + ?Sized>(io: &mut I) -> io::Result<Answer> {
    loop {
        let input = io.read_input("Enter date (YYYY-MM-DD): ")?;
        let input = input.trim();
        if input.is_empty() || parse_date(input).is_some() {
            return Ok(Answer::Text(input.to_string()));
        }
        io.write_output("Invalid date format. Please use YYYY-MM-DD.");
    }
}

fn print_options<I: InterviewIo + ?Sized>(io: &mut I, options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        io.write_output(&format!("{}. {}", i + 1, option));
    }
}

/// 1-based index into `options`
fn option_at(options: &[String], index: usize) -> Option<String> {
    index
        .checked_sub(1)
        .and_then(|i| options.get(i))
        .cloned()
}

fn ask_choice<I: InterviewIo + ?Sized>(io: &mut I, options: &[String]) -> io::Result<Answer> {
    print_options(io, options);
    loop {
        let input = io.read_input("Enter choice number: ")?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(Answer::Text(String::new()));
        }
        if let Some(option) = input.parse().ok().and_then(|n| option_at(options, n)) {
            return Ok(Answer::Text(option));
        }
        if let Some(option) = options.iter().find(|o| o.as_str() == input) {
            return Ok(Answer::Text(option.clone()));
        }
        io.write_output("Invalid choice.");
    }
}

fn ask_multiple<I: InterviewIo + ?Sized>(io: &mut I, options: &[String]) -> io::Result<Answer> {
    print_options(io, options);
    io.write_output("Enter numbers separated by commas, or 'done' when finished");

    let mut selected: Vec<String> = Vec::new();
    loop {
        let input = io.read_input("Selection: ")?;
        let input = input.trim();
        if input.eq_ignore_ascii_case("done") {
            return Ok(Answer::List(selected));
        }

        let indices: Result<Vec<usize>, _> =
            input.split(',').map(|part| part.trim().parse::<usize>()).collect();
        match indices {
            Ok(indices) => {
                for n in indices {
                    if let Some(option) = option_at(options, n) {
                        if !selected.contains(&option) {
                            selected.push(option);
                        }
                    }
                }
                io.write_output(&format!("Current selections: {}", selected.join(", ")));
            }
            Err(_) => io.write_output("Invalid input. Enter numbers separated by commas."),
        }
    }
}
