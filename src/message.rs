use crate::detection::{AnnotatedDetection, GuidanceMessage};
use crate::geometry::{Distance, Position};

/// Fixed message when nothing navigation-relevant is in view.
pub const CLEAR_PATH_MESSAGE: &str = "Path appears clear.";

/// Only the most important entries are narrated; the rest still reach the
/// frontend in the structured detection list.
pub const DEFAULT_MAX_SPOKEN_OBJECTS: usize = 3;

/// Hard cap keeping a single TTS utterance short.
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Builds the spoken sentence for a ranked detection set.
///
/// Output is a pure function of its input: identical ranked sets always
/// produce identical text, which lets the frontend speak only on change.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    max_spoken: usize,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self {
            max_spoken: DEFAULT_MAX_SPOKEN_OBJECTS,
        }
    }
}

impl MessageComposer {
    pub fn new(max_spoken: usize) -> Self {
        Self { max_spoken }
    }

    pub fn compose(&self, ranked: &[AnnotatedDetection]) -> GuidanceMessage {
        match self.narrate(ranked) {
            Some(text) => GuidanceMessage::new(text),
            None => GuidanceMessage::new(CLEAR_PATH_MESSAGE),
        }
    }

    /// Narrate up to `max_spoken` top entries as one short utterance, or
    /// `None` when there is nothing to say.
    pub fn narrate(&self, ranked: &[AnnotatedDetection]) -> Option<String> {
        let clauses = self.clauses(ranked);
        if clauses.is_empty() {
            return None;
        }
        Some(join_clauses(&clauses))
    }

    /// One clause per distinct (class, position, distance) among the top
    /// entries, merging counts so two nearby people become "two people
    /// ahead" instead of two sentences. First-seen order is preserved, so
    /// the highest-priority object always leads the message.
    fn clauses(&self, ranked: &[AnnotatedDetection]) -> Vec<String> {
        let mut groups: Vec<(GroupKey, usize)> = Vec::new();
        for det in ranked.iter().take(self.max_spoken) {
            let key = GroupKey {
                class_name: det.class_name.clone(),
                position: det.position,
                distance: det.distance,
            };
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, count)) => *count += 1,
                None => groups.push((key, 1)),
            }
        }

        groups
            .iter()
            .map(|(key, count)| clause(&key.class_name, *count, key.position, key.distance))
            .collect()
    }

}

#[derive(Debug, Clone, PartialEq)]
struct GroupKey {
    class_name: String,
    position: Position,
    distance: Distance,
}

fn clause(class_name: &str, count: usize, position: Position, distance: Distance) -> String {
    let subject = if count == 1 {
        class_name.to_string()
    } else {
        format!("{} {}", number_word(count), pluralize(class_name))
    };

    // Distance sets the urgency of the wording; position is elided when
    // "ahead" already implies it.
    match (distance, position) {
        (Distance::Close, Position::Center) => format!("{subject} right in front of you"),
        (Distance::Close, Position::Left) => format!("{subject} very close on your left"),
        (Distance::Close, Position::Right) => format!("{subject} very close on your right"),
        (Distance::Medium, Position::Center) => format!("{subject} ahead"),
        (Distance::Medium, Position::Left) => format!("{subject} on your left"),
        (Distance::Medium, Position::Right) => format!("{subject} on your right"),
        (Distance::Far, Position::Center) => format!("{subject} ahead in the distance"),
        (Distance::Far, Position::Left) => format!("{subject} in the distance on your left"),
        (Distance::Far, Position::Right) => format!("{subject} in the distance on your right"),
    }
}

/// Capitalize each clause, join with ". ", close with a period. Trailing
/// clauses are dropped rather than truncated mid-sentence if the cap is hit.
fn join_clauses(clauses: &[String]) -> String {
    let mut kept = clauses.len();
    loop {
        let text = clauses[..kept]
            .iter()
            .map(|c| capitalize(c))
            .collect::<Vec<_>>()
            .join(". ")
            + ".";
        if text.len() <= MAX_MESSAGE_CHARS || kept == 1 {
            return text;
        }
        kept -= 1;
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn pluralize(class_name: &str) -> String {
    match class_name {
        "person" => "people".to_string(),
        "bus" => "buses".to_string(),
        "bench" => "benches".to_string(),
        "couch" => "couches".to_string(),
        "stairs" => "stairs".to_string(),
        _ => format!("{class_name}s"),
    }
}

fn number_word(count: usize) -> String {
    match count {
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        _ => count.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

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
    fn empty_set_reports_clear_path() {
        let message = MessageComposer::default().compose(&[]);
        assert_eq!(message.text, CLEAR_PATH_MESSAGE);
    }

    #[test]
    fn close_center_person_uses_urgent_phrasing() {
        let message =
            MessageComposer::default().compose(&[annotated("person", Position::Center, Distance::Close)]);
        assert_eq!(message.text, "Person right in front of you.");
    }

    #[test]
    fn medium_center_elides_position() {
        let message =
            MessageComposer::default().compose(&[annotated("person", Position::Center, Distance::Medium)]);
        assert_eq!(message.text, "Person ahead.");
    }

    #[test]
    fn side_objects_name_the_side() {
        let message =
            MessageComposer::default().compose(&[annotated("chair", Position::Left, Distance::Medium)]);
        assert_eq!(message.text, "Chair on your left.");

        let message =
            MessageComposer::default().compose(&[annotated("dog", Position::Right, Distance::Far)]);
        assert_eq!(message.text, "Dog in the distance on your right.");
    }

    #[test]
    fn duplicate_objects_merge_into_one_counted_clause() {
        let message = MessageComposer::default().compose(&[
            annotated("person", Position::Center, Distance::Medium),
            annotated("person", Position::Center, Distance::Medium),
        ]);
        assert_eq!(message.text, "Two people ahead.");
    }

    #[test]
    fn distinct_combinations_get_separate_clauses_person_first() {
        let mut chair = annotated("chair", Position::Left, Distance::Far);
        chair.priority = 7;
        let message = MessageComposer::default().compose(&[
            annotated("person", Position::Center, Distance::Close),
            chair,
        ]);
        assert_eq!(
            message.text,
            "Person right in front of you. Chair in the distance on your left."
        );
    }

    #[test]
    fn only_top_three_entries_are_narrated() {
        let detections = vec![
            annotated("person", Position::Center, Distance::Close),
            annotated("car", Position::Left, Distance::Medium),
            annotated("chair", Position::Right, Distance::Far),
            annotated("table", Position::Left, Distance::Far),
        ];
        let message = MessageComposer::default().compose(&detections);
        assert!(message.text.contains("Person"));
        assert!(message.text.contains("Car"));
        assert!(message.text.contains("Chair"));
        assert!(!message.text.contains("Table"));
    }

    #[test]
    fn message_stays_under_cap() {
        let detections = vec![
            annotated("traffic light", Position::Left, Distance::Far),
            annotated("motorcycle", Position::Right, Distance::Far),
            annotated("bicycle", Position::Center, Distance::Far),
        ];
        let message = MessageComposer::default().compose(&detections);
        assert!(message.text.len() <= MAX_MESSAGE_CHARS);
        assert!(message.text.ends_with('.'));
    }

    #[test]
    fn composition_is_deterministic() {
        let detections = vec![
            annotated("person", Position::Center, Distance::Close),
            annotated("dog", Position::Right, Distance::Medium),
        ];
        let composer = MessageComposer::default();
        assert_eq!(composer.compose(&detections), composer.compose(&detections));
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("stairs"), "stairs");
        assert_eq!(pluralize("car"), "cars");
    }
}
