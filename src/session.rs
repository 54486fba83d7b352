use crate::model::Question;

/// One run of generated questions, from the first render to the summary.
/// Holds no rendering state; the UI reads it and calls the transitions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answered: Option<usize>,
}

/// What `answer` did, so the view knows how to mark the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The current question already got its one allowed answer.
    AlreadyAnswered,
    Correct,
    Incorrect { correct: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Question(usize),
    Finished,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            answered: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn is_answered(&self) -> bool {
        self.answered.is_some()
    }

    /// The option picked for the current question, if any yet.
    pub fn selected(&self) -> Option<usize> {
        self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Fraction of questions completed; the one in view does not count.
    pub fn progress_fraction(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.current as f32 / self.questions.len() as f32
    }

    pub fn progress_percent(&self) -> u32 {
        (self.progress_fraction() * 100.0).round() as u32
    }

    /// Final score as a percentage; 0 for an empty session.
    pub fn final_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.score as f32 / self.questions.len() as f32 * 100.0).round() as u32
    }

    /// Registers the one allowed answer for the current question.
    /// Further calls are no-ops so rapid clicks cannot double-score.
    pub fn answer(&mut self, selected: usize) -> AnswerOutcome {
        if self.answered.is_some() || self.is_finished() {
            return AnswerOutcome::AlreadyAnswered;
        }
        self.answered = Some(selected);
        let correct = self.questions[self.current].correct;
        if selected == correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect { correct }
        }
    }

    /// Moves past the current question.
    pub fn advance(&mut self) -> Step {
        if self.current < self.questions.len() {
            self.current += 1;
        }
        self.answered = None;
        if self.is_finished() {
            Step::Finished
        } else {
            Step::Question(self.current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question {
            question: "Which statement best reflects the chapter content?".to_string(),
            options: vec![
                "A fact".to_string(),
                "An unrelated statement".to_string(),
                "A misleading statement".to_string(),
                "A contradiction".to_string(),
            ],
            correct,
            explanation: None,
        }
    }

    #[test]
    fn score_counts_exactly_the_correct_answers() {
        let mut session = QuizSession::new(vec![question(0), question(2), question(1)]);

        assert_eq!(session.answer(0), AnswerOutcome::Correct);
        session.advance();
        assert_eq!(session.answer(3), AnswerOutcome::Incorrect { correct: 2 });
        session.advance();
        assert_eq!(session.answer(1), AnswerOutcome::Correct);
        assert_eq!(session.advance(), Step::Finished);

        assert_eq!(session.score(), 2);
        assert_eq!(session.final_percent(), 67);
    }

    #[test]
    fn progress_reflects_completed_questions_only() {
        let mut session = QuizSession::new(vec![question(0), question(0), question(0)]);

        assert_eq!(session.progress_percent(), 0); // viewing question 1 of 3
        session.answer(0);
        assert_eq!(session.progress_percent(), 0); // answering does not advance
        session.advance();
        assert_eq!(session.progress_percent(), 33);
        session.answer(0);
        session.advance();
        assert_eq!(session.progress_percent(), 67);
        session.answer(0);
        session.advance();
        assert_eq!(session.progress_percent(), 100);
        assert!(session.is_finished());
    }

    #[test]
    fn second_answer_is_a_no_op() {
        let mut session = QuizSession::new(vec![question(1)]);

        assert_eq!(session.answer(0), AnswerOutcome::Incorrect { correct: 1 });
        let score_before = session.score();
        let selected_before = session.selected();

        assert_eq!(session.answer(1), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.score(), score_before);
        assert_eq!(session.selected(), selected_before);
    }

    #[test]
    fn advance_resets_the_per_question_answer() {
        let mut session = QuizSession::new(vec![question(0), question(0)]);

        session.answer(0);
        assert!(session.is_answered());
        assert_eq!(session.advance(), Step::Question(1));
        assert!(!session.is_answered());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn answering_past_the_end_is_rejected() {
        let mut session = QuizSession::new(vec![question(0)]);
        session.answer(0);
        session.advance();

        assert!(session.current_question().is_none());
        assert_eq!(session.answer(0), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn empty_session_percentages_are_zero() {
        let session = QuizSession::new(vec![]);
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.final_percent(), 0);
        assert!(session.is_finished());
    }
}
