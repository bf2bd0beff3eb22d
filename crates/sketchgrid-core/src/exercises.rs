//! Practice exercise prompts shown next to the canvas.
//!
//! The catalog is read-only data. The drawing engine never looks at it.

use serde::{Deserialize, Serialize};

/// How hard an exercise is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// A single practice prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
}

impl Exercise {
    pub fn new(title: impl Into<String>, description: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            difficulty,
        }
    }
}

/// Ordered, immutable list of exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExerciseCatalog {
    /// The three perspective exercises shipped with the app.
    pub fn builtin() -> Self {
        Self {
            exercises: vec![
                Exercise::new(
                    "One-Point Perspective",
                    "Draw a simple corridor using one-point perspective",
                    Difficulty::Beginner,
                ),
                Exercise::new(
                    "Two-Point Perspective",
                    "Create a building corner with two vanishing points",
                    Difficulty::Intermediate,
                ),
                Exercise::new(
                    "Three-Point Perspective",
                    "Draw a skyscraper from a dramatic angle",
                    Difficulty::Advanced,
                ),
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = ExerciseCatalog::builtin();
        assert_eq!(catalog.len(), 3);

        let titles: Vec<&str> = catalog.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            ["One-Point Perspective", "Two-Point Perspective", "Three-Point Perspective"]
        );

        let first = catalog.get(0).unwrap();
        assert_eq!(first.description, "Draw a simple corridor using one-point perspective");
        assert_eq!(first.difficulty, Difficulty::Beginner);
        assert_eq!(catalog.get(2).unwrap().difficulty, Difficulty::Advanced);
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"title":"Ellipses","description":"Fill a page","difficulty":"Intermediate"}]"#;
        let catalog: ExerciseCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().difficulty.label(), "Intermediate");
    }

    #[test]
    fn test_from_json_rejects_bad_difficulty() {
        let json = r#"[{"title":"X","description":"Y","difficulty":"Expert"}]"#;
        assert!(serde_json::from_str::<ExerciseCatalog>(json).is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let catalog = ExerciseCatalog::builtin();
        let back: ExerciseCatalog = serde_json::from_str(&serde_json::to_string(&catalog).unwrap()).unwrap();
        assert_eq!(back, catalog);
    }
}
