//! Multiple-choice quiz engine.
//!
//! [`QuizSession`] walks a slice of [`QuizQuestion`]s in order, accepting
//! one answer per question and keeping a running score. The standard
//! question bank is [`QUESTION_BANK`].

use serde::Serialize;

/// A single question with three options, exactly one of which is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: [&'static str; 3],
    pub answer: &'static str,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// Result of submitting an answer to the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong { correct_answer: &'static str },
    /// The current question was already answered (or the quiz is over);
    /// the submission was ignored.
    Ignored,
}

/// Title and message shown once every question has been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub title: &'static str,
    pub message: String,
    pub score: usize,
    pub total: usize,
}

/// Progress through a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [QuizQuestion],
    index: usize,
    score: usize,
    selected: Option<&'static str>,
    completed: bool,
}

impl QuizSession {
    pub fn new(questions: &'static [QuizQuestion]) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
            selected: None,
            completed: questions.is_empty(),
        }
    }

    /// A session over [`QUESTION_BANK`].
    pub fn standard() -> Self {
        Self::new(QUESTION_BANK)
    }

    /// The question awaiting an answer, or `None` once completed.
    pub fn current(&self) -> Option<&'static QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.index)
    }

    /// 1-based number of the current question.
    pub fn question_number(&self) -> usize {
        (self.index + 1).min(self.questions.len())
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Submit an answer for the current question.
    ///
    /// Options are matched against the question's option list; anything
    /// else counts as wrong. Only the first answer per question counts.
    pub fn answer(&mut self, option: &str) -> AnswerOutcome {
        let Some(question) = self.current() else {
            return AnswerOutcome::Ignored;
        };
        if self.selected.is_some() {
            return AnswerOutcome::Ignored;
        }

        let chosen = question
            .options
            .iter()
            .copied()
            .find(|o| *o == option)
            .unwrap_or("");
        self.selected = Some(chosen);

        if question.is_correct(chosen) {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Wrong {
                correct_answer: question.answer,
            }
        }
    }

    /// Move to the next question, or complete the quiz after the last one.
    ///
    /// Returns `true` while there is a further question to answer.
    pub fn advance(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.selected = None;
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            true
        } else {
            self.completed = true;
            false
        }
    }

    /// Completion summary; `None` while questions remain.
    pub fn summary(&self) -> Option<QuizSummary> {
        if !self.completed {
            return None;
        }
        let total = self.total();
        let (title, message) = if self.score == total {
            ("Congratulations!", "You got all the questions correct!".to_string())
        } else {
            ("Quiz Over", format!("You scored {} out of {}.", self.score, total))
        };
        Some(QuizSummary {
            title,
            message,
            score: self.score,
            total,
        })
    }

    /// Start over from the first question with a zero score.
    pub fn restart(&mut self) {
        *self = Self::new(self.questions);
    }
}

/// The standard question bank.
pub const QUESTION_BANK: &[QuizQuestion] = &[
    QuizQuestion {
        question: "What is the name of Rick's daughter?",
        options: ["Beth", "Summer", "Jessica"],
        answer: "Beth",
    },
    QuizQuestion {
        question: "What is Morty's last name?",
        options: ["Smith", "Sanchez", "Johnson"],
        answer: "Smith",
    },
    QuizQuestion {
        question: "What is the name of Rick's catchphrase?",
        options: ["Wubba Lubba Dub Dub", "Aw Geez", "Schwifty"],
        answer: "Wubba Lubba Dub Dub",
    },
    QuizQuestion {
        question: "Who is Morty's sister?",
        options: ["Beth", "Jessica", "Summer"],
        answer: "Summer",
    },
    QuizQuestion {
        question: "What color is Rick's portal gun?",
        options: ["Green", "Blue", "Red"],
        answer: "Green",
    },
    QuizQuestion {
        question: "Which planet is Rick originally from?",
        options: ["Earth", "Cronenberg World", "Bird World"],
        answer: "Earth",
    },
    QuizQuestion {
        question: "What type of scientist is Rick?",
        options: ["Biologist", "Physicist", "Mad Scientist"],
        answer: "Mad Scientist",
    },
    QuizQuestion {
        question: "What is Morty's main characteristic?",
        options: ["Intelligence", "Naivety", "Courage"],
        answer: "Naivety",
    },
    QuizQuestion {
        question: "What creature is Mr. Meeseeks?",
        options: ["Alien", "Robot", "Humanoid"],
        answer: "Humanoid",
    },
    QuizQuestion {
        question: "What is the name of Rick's car?",
        options: ["The Ship", "The Rickmobile", "The Rover"],
        answer: "The Ship",
    },
    QuizQuestion {
        question: "Who created the show 'Rick and Morty'?",
        options: ["Justin Roiland and Dan Harmon", "Seth MacFarlane", "Matt Groening"],
        answer: "Justin Roiland and Dan Harmon",
    },
    QuizQuestion {
        question: "What color is Rick's hair?",
        options: ["Blue", "White", "Gray"],
        answer: "Blue",
    },
    QuizQuestion {
        question: "What dimension is the original Rick from?",
        options: ["C-137", "D-99", "M-564"],
        answer: "C-137",
    },
    QuizQuestion {
        question: "What is the name of the council of Ricks?",
        options: ["Council of Ricks", "Federation of Ricks", "Union of Ricks"],
        answer: "Council of Ricks",
    },
    QuizQuestion {
        question: "What food does Rick love in the 'Szechuan sauce' episode?",
        options: ["Chicken nuggets", "French fries", "Szechuan sauce"],
        answer: "Szechuan sauce",
    },
    QuizQuestion {
        question: "What does Rick turn himself into in a famous episode?",
        options: ["A pickle", "A tomato", "A potato"],
        answer: "A pickle",
    },
    QuizQuestion {
        question: "Who is the main enemy of Rick in the series?",
        options: ["Birdperson", "Tammy", "Evil Morty"],
        answer: "Evil Morty",
    },
    QuizQuestion {
        question: "What is the name of Morty's high school?",
        options: ["Harry Herpson High School", "Morton High", "Springfield High"],
        answer: "Harry Herpson High School",
    },
    QuizQuestion {
        question: "Who does Summer have a crush on?",
        options: ["Ethan", "Jerry", "Morty"],
        answer: "Ethan",
    },
    QuizQuestion {
        question: "What kind of animal is Squanchy?",
        options: ["Cat", "Dog", "Bird"],
        answer: "Cat",
    },
    QuizQuestion {
        question: "Who is Rick's best friend?",
        options: ["Birdperson", "Jerry", "Morty"],
        answer: "Birdperson",
    },
    QuizQuestion {
        question: "What does Rick frequently drink?",
        options: ["Beer", "Soda", "Whiskey"],
        answer: "Beer",
    },
    QuizQuestion {
        question: "What is Morty often forced to do on adventures?",
        options: ["Fight aliens", "Pick up slack", "Pilot the ship"],
        answer: "Pick up slack",
    },
    QuizQuestion {
        question: "What is the purpose of Mr. Meeseeks?",
        options: ["To entertain", "To fulfill a task", "To teach"],
        answer: "To fulfill a task",
    },
    QuizQuestion {
        question: "What is the family dog’s name?",
        options: ["Snuffles", "Buddy", "Snowball"],
        answer: "Snuffles",
    },
    QuizQuestion {
        question: "What is the name of the agency that monitors dimensions?",
        options: ["Galactic Federation", "Council of Ricks", "Department of Time"],
        answer: "Galactic Federation",
    },
    QuizQuestion {
        question: "Who kills Birdperson?",
        options: ["Tammy", "Rick", "Morty"],
        answer: "Tammy",
    },
    QuizQuestion {
        question: "What is Morty’s crush’s name?",
        options: ["Jessica", "Beth", "Tammy"],
        answer: "Jessica",
    },
    QuizQuestion {
        question: "What’s the name of the planet where Birdperson is from?",
        options: ["Bird World", "Gazorpazorp", "Pluto"],
        answer: "Bird World",
    },
    QuizQuestion {
        question: "What is Rick’s IQ?",
        options: ["300", "Infinity", "200"],
        answer: "Infinity",
    },
    QuizQuestion {
        question: "What does Rick use for interdimensional travel?",
        options: ["Portal Gun", "Time Machine", "Teleportation Helmet"],
        answer: "Portal Gun",
    },
    QuizQuestion {
        question: "What kind of creature is Unity?",
        options: ["Parasite", "Hivemind", "Alien"],
        answer: "Hivemind",
    },
    QuizQuestion {
        question: "What is the main ingredient in Plumbus?",
        options: ["Dinglebop", "Fleeb", "Grumbo"],
        answer: "Fleeb",
    },
    QuizQuestion {
        question: "What is Morty’s full name?",
        options: ["Mortimer Smith", "Morty Smith", "Morty Sanchez"],
        answer: "Morty Smith",
    },
    QuizQuestion {
        question: "Who is the leader of the Galactic Federation?",
        options: ["Tammy", "Evil Morty", "Galactic President"],
        answer: "Galactic President",
    },
    QuizQuestion {
        question: "What is Summer’s dream job?",
        options: ["Vet", "Salesperson", "Fashion Designer"],
        answer: "Vet",
    },
    QuizQuestion {
        question: "What does Jerry do for work?",
        options: ["Marketing", "Mortician", "Insurance"],
        answer: "Marketing",
    },
    QuizQuestion {
        question: "What game do Rick and Morty play at Blips and Chitz?",
        options: ["Roy", "Galaga", "Zaxxon"],
        answer: "Roy",
    },
    QuizQuestion {
        question: "Who does Rick turn into a teenager?",
        options: ["Beth", "Jerry", "Summer"],
        answer: "Summer",
    },
];
