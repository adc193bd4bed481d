use crate::models::question::Question;

/// A parsed question graph, not yet structurally validated
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewDefinition {
    pub title: Option<String>,
    pub start_id: String,
    /// Questions in declaration order
    pub questions: Vec<Question>,
}

impl InterviewDefinition {
    /// Build a definition that starts at the first question
    pub fn new(questions: Vec<Question>) -> Self {
        let start_id = questions
            .first()
            .map(|q| q.id.clone())
            .unwrap_or_default();
        Self {
            title: None,
            start_id,
            questions,
        }
    }

    pub fn with_start(mut self, start_id: impl Into<String>) -> Self {
        self.start_id = start_id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
