use serde::{Deserialize, Serialize};

use crate::detection::{AnnotatedDetection, GuidanceMessage};
use crate::message::MessageComposer;

pub const NO_PEOPLE_MESSAGE: &str = "No people detected nearby.";
pub const NO_OBSTACLES_MESSAGE: &str = "No obstacles detected.";

/// Classified purpose of a free-text user question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    PersonPresence,
    ObstaclePresence,
    GeneralDescription,
    /// Never produced: classification falls back to `GeneralDescription`
    /// when no keyword rule matches. The variant stays so the permissive
    /// fallback is a documented contract, not an accident.
    Unrecognized,
}

/// Keyword rules checked in order; first match wins.
const INTENT_RULES: &[(&[&str], QueryIntent)] = &[
    (&["person", "people"], QueryIntent::PersonPresence),
    (&["obstacle", "ahead", "front"], QueryIntent::ObstaclePresence),
];

pub fn classify_intent(query: &str) -> QueryIntent {
    let query = query.to_lowercase();
    for (keywords, intent) in INTENT_RULES {
        if keywords.iter().any(|keyword| query.contains(keyword)) {
            return *intent;
        }
    }
    QueryIntent::GeneralDescription
}

/// Answers a user question about the current frame, constrained to the
/// matched intent. Stateless: intent is recomputed per call.
#[derive(Debug, Clone, Default)]
pub struct QueryInterpreter {
    composer: MessageComposer,
}

impl QueryInterpreter {
    pub fn new(composer: MessageComposer) -> Self {
        Self { composer }
    }

    pub fn answer(&self, query: &str, ranked: &[AnnotatedDetection]) -> GuidanceMessage {
        let text = match classify_intent(query) {
            QueryIntent::PersonPresence => self.answer_person_presence(ranked),
            QueryIntent::ObstaclePresence => self.answer_obstacle_presence(ranked),
            QueryIntent::GeneralDescription | QueryIntent::Unrecognized => {
                self.composer.compose(ranked).text
            }
        };
        GuidanceMessage::with_query(text, query)
    }

    fn answer_person_presence(&self, ranked: &[AnnotatedDetection]) -> String {
        let people: Vec<AnnotatedDetection> = ranked
            .iter()
            .filter(|det| det.class_name == "person")
            .cloned()
            .collect();

        if people.is_empty() {
            return NO_PEOPLE_MESSAGE.to_string();
        }

        let count = people.len();
        let noun = if count == 1 { "person" } else { "people" };
        // Locate only the highest-ranked person; the count covers the rest.
        match self.composer.narrate(&people[..1]) {
            Some(clause) => format!("Yes, {count} {noun} detected. {clause}"),
            None => format!("Yes, {count} {noun} detected."),
        }
    }

    fn answer_obstacle_presence(&self, ranked: &[AnnotatedDetection]) -> String {
        match self.composer.narrate(ranked) {
            Some(text) => text,
            None => NO_OBSTACLES_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;
    use crate::geometry::{Distance, Position};
    use crate::message::CLEAR_PATH_MESSAGE;

    fn annotated(class: &str, position: Position, distance: Distance) -> AnnotatedDetection {
        AnnotatedDetection {
            class_name: class.to_string(),
            confidence: 0.9,
            bbox: BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            center: (50.0, 50.0),
            position,
            distance,
            priority: 10,
            bbox_area: 10_000.0,
        }
    }

    #[test]
    fn person_keywords_win_over_obstacle_keywords() {
        // "ahead" also matches the obstacle rule; person rule is checked first.
        assert_eq!(
            classify_intent("Is there a person ahead?"),
            QueryIntent::PersonPresence
        );
        assert_eq!(classify_intent("any people around"), QueryIntent::PersonPresence);
    }

    #[test]
    fn obstacle_keywords_match() {
        assert_eq!(classify_intent("Any obstacles?"), QueryIntent::ObstaclePresence);
        assert_eq!(classify_intent("what is in FRONT of me"), QueryIntent::ObstaclePresence);
        assert_eq!(classify_intent("what's ahead"), QueryIntent::ObstaclePresence);
    }

    #[test]
    fn unmatched_queries_fall_back_to_general_description() {
        assert_eq!(classify_intent("describe the scene"), QueryIntent::GeneralDescription);
        assert_eq!(classify_intent(""), QueryIntent::GeneralDescription);
        assert_eq!(classify_intent("xyzzy"), QueryIntent::GeneralDescription);
    }

    #[test]
    fn person_query_with_no_people_gives_fixed_answer() {
        let interpreter = QueryInterpreter::default();
        let ranked = vec![annotated("chair", Position::Left, Distance::Far)];
        let message = interpreter.answer("Is there a person nearby?", &ranked);
        assert_eq!(message.text, NO_PEOPLE_MESSAGE);
        assert_eq!(message.query.as_deref(), Some("Is there a person nearby?"));
    }

    #[test]
    fn person_query_counts_and_locates() {
        let interpreter = QueryInterpreter::default();
        let ranked = vec![
            annotated("person", Position::Center, Distance::Close),
            annotated("person", Position::Left, Distance::Far),
        ];
        let message = interpreter.answer("Are there people nearby?", &ranked);
        assert_eq!(
            message.text,
            "Yes, 2 people detected. Person right in front of you."
        );
    }

    #[test]
    fn obstacle_query_narrates_top_entries() {
        let interpreter = QueryInterpreter::default();
        let mut chair = annotated("chair", Position::Right, Distance::Medium);
        chair.priority = 7;
        let ranked = vec![annotated("person", Position::Center, Distance::Close), chair];
        let message = interpreter.answer("Any obstacles?", &ranked);
        assert_eq!(
            message.text,
            "Person right in front of you. Chair on your right."
        );
    }

    #[test]
    fn obstacle_query_with_empty_set_gives_fixed_answer() {
        let message = QueryInterpreter::default().answer("Any obstacles?", &[]);
        assert_eq!(message.text, NO_OBSTACLES_MESSAGE);
    }

    #[test]
    fn general_query_delegates_to_composer() {
        let message = QueryInterpreter::default().answer("describe the scene", &[]);
        assert_eq!(message.text, CLEAR_PATH_MESSAGE);
    }

    #[test]
    fn answer_is_idempotent() {
        let interpreter = QueryInterpreter::default();
        let ranked = vec![annotated("person", Position::Center, Distance::Medium)];
        let first = interpreter.answer("Is there a person nearby?", &ranked);
        let second = interpreter.answer("Is there a person nearby?", &ranked);
        assert_eq!(first, second);
    }
}
