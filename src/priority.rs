use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Immutable map from object class to navigational priority.
///
/// Classes absent from the table are not navigation-relevant and never reach
/// the ranked output or the spoken message. The table is plain configuration
/// data: extending coverage to a new class is a config edit, not a code
/// change, and tests can inject a substitute table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityTable {
    classes: HashMap<String, i32>,
}

impl Default for PriorityTable {
    fn default() -> Self {
        let classes = [
            ("person", 10),
            ("car", 10),
            ("stairs", 10),
            ("truck", 9),
            ("bus", 9),
            ("bicycle", 8),
            ("motorcycle", 8),
            ("traffic light", 8),
            ("stop sign", 8),
            ("chair", 7),
            ("bench", 7),
            ("dog", 7),
            ("door", 6),
            ("couch", 6),
            ("cat", 6),
            ("table", 5),
        ]
        .into_iter()
        .map(|(name, priority)| (name.to_string(), priority))
        .collect();
        Self { classes }
    }
}

impl PriorityTable {
    pub fn new(classes: HashMap<String, i32>) -> Self {
        Self { classes }
    }

    pub fn priority_of(&self, class_name: &str) -> Option<i32> {
        self.classes.get(class_name).copied()
    }

    pub fn is_relevant(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
