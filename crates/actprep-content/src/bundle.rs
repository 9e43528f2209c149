//! Built-in practice content.
//!
//! A small fixed passage set so the application works out of the box
//! without an authored catalog or remote content.

use actprep_core::model::{Difficulty, OptionKey, Passage, Question, QuestionOptions, Subject};
use actprep_core::traits::ContentSource;

/// The bundled passage set.
pub struct StaticBundle {
    passages: Vec<Passage>,
}

impl Default for StaticBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticBundle {
    pub fn new() -> Self {
        Self {
            passages: vec![english_grammar_passage(), reading_inference_passage()],
        }
    }

    /// Every bundled passage, regardless of subject.
    pub fn all(&self) -> &[Passage] {
        &self.passages
    }
}

impl ContentSource for StaticBundle {
    fn passages_for(&self, subject: Subject) -> Vec<Passage> {
        self.passages
            .iter()
            .filter(|p| p.subject == subject)
            .cloned()
            .collect()
    }
}

fn question(
    id: &str,
    number: u32,
    text: &str,
    options: QuestionOptions,
    correct: OptionKey,
    explanation: &str,
) -> Question {
    Question {
        id: id.to_string(),
        question_number: number,
        text: text.to_string(),
        options,
        correct_answer: correct,
        explanation: explanation.to_string(),
    }
}

fn english_grammar_passage() -> Passage {
    Passage {
        id: "bundle-english-1".into(),
        title: "Moments in Motion".into(),
        subject: Subject::English,
        difficulty: Difficulty::Medium,
        content: "Driving along Route 66, I felt the vibrations shift beneath my tires \
                  as the road began to hum. The melody was faint at first, then grew \
                  louder, resonating through the car. [1] For now, I stopped worrying \
                  about work and felt everything would be okay. The children, [2] whose \
                  eyes sparkled with delight, sat quietly in the back seat. As the final \
                  note [3] fade into the evening air, I slowed the car and pulled over. \
                  [4] The desert was dry and arid, with little vegetation in sight. \
                  I listened to the wind, watched the sun set, and [5] felt the sand \
                  beneath my feet."
            .into(),
        questions: vec![
            question(
                "bundle-english-1-q1",
                1,
                "[1] Which transition best introduces this sentence?",
                QuestionOptions::new("No Change", "Now and then", "Later", "Occasionally"),
                OptionKey::A,
                "\"For now\" signals a temporary emotional shift that fits the context.",
            ),
            question(
                "bundle-english-1-q2",
                2,
                "[2] Which choice correctly uses a possessive pronoun?",
                QuestionOptions::new("No Change", "they have", "whom have", "who's"),
                OptionKey::A,
                "\"Whose\" is the correct possessive pronoun for the children's eyes.",
            ),
            question(
                "bundle-english-1-q3",
                3,
                "[3] Which choice maintains consistent verb tense?",
                QuestionOptions::new("No Change", "have disappeared", "disappear", "faded"),
                OptionKey::D,
                "\"Faded\" matches the past tense of \"slowed\".",
            ),
            question(
                "bundle-english-1-q4",
                4,
                "[4] Which choice avoids redundancy?",
                QuestionOptions::new(
                    "No Change",
                    "dry and lacking moisture",
                    "arid and sparse",
                    "arid",
                ),
                OptionKey::D,
                "\"Arid\" already means dry, so \"dry and arid\" is redundant.",
            ),
            question(
                "bundle-english-1-q5",
                5,
                "[5] Which choice maintains parallel structure?",
                QuestionOptions::new(
                    "No Change",
                    "feeling the sand beneath my feet",
                    "had felt the sand beneath my feet",
                    "feel the sand beneath my feet",
                ),
                OptionKey::A,
                "Parallel with \"listened\" and \"watched\".",
            ),
        ],
    }
}

fn reading_inference_passage() -> Passage {
    Passage {
        id: "bundle-reading-1".into(),
        title: "The Small-Town Library".into(),
        subject: Subject::Reading,
        difficulty: Difficulty::Easy,
        content: "Later that week, we visited a small-town library to escape the heat. \
                  The library was warm, quiet, and welcoming. I wandered through the \
                  aisles, pulling out a novel that was tucked out of sight behind older \
                  volumes. The librarian's quiet encouragement helped me discover new \
                  authors. As the rain tapped the windows, I felt a sense of calm settle \
                  over me."
            .into(),
        questions: vec![
            question(
                "bundle-reading-1-q1",
                1,
                "Why did the narrator visit the library?",
                QuestionOptions::new(
                    "To escape the heat",
                    "To return a novel",
                    "To meet the librarian",
                    "To wait out the rain",
                ),
                OptionKey::A,
                "The first sentence states the visit was to escape the heat.",
            ),
            question(
                "bundle-reading-1-q2",
                2,
                "The narrator found the novel",
                QuestionOptions::new(
                    "on a display table",
                    "behind older volumes",
                    "at the front desk",
                    "in the reading room",
                ),
                OptionKey::B,
                "The novel was tucked out of sight behind older volumes.",
            ),
            question(
                "bundle-reading-1-q3",
                3,
                "Which word best describes the narrator's mood at the end?",
                QuestionOptions::new("Anxious", "Restless", "Calm", "Bored"),
                OptionKey::C,
                "A sense of calm settles over the narrator as the rain falls.",
            ),
        ],
    }
}
