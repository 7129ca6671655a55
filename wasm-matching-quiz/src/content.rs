//! Content provider: puzzles grouped into difficulty tiers
//!
//! The bank is read-only once loaded. Every puzzle is validated up front so the
//! session can rely on `correct_pairs` being a total bijection on `0..N`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ContentError;
use crate::types::Difficulty;

/// One level: N prompts, N answers and the prompt -> answer bijection
/// in original (authoring) index space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    prompts: Vec<String>,
    answers: Vec<String>,
    #[serde(serialize_with = "pairs_as_map")]
    correct_pairs: Vec<usize>,
}

#[allow(clippy::ptr_arg)]
fn pairs_as_map<S: Serializer>(pairs: &Vec<usize>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(pairs.iter().enumerate())
}

/// Wire shape of a puzzle: `correctPairs` is an object keyed by prompt index.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPuzzle {
    #[serde(alias = "questions")]
    prompts: Vec<String>,
    answers: Vec<String>,
    #[serde(deserialize_with = "pairs_from_map")]
    correct_pairs: Vec<(usize, usize)>,
}

/// Read `correctPairs` as entries in document order so a repeated key is
/// reported instead of silently overwriting the earlier one.
fn pairs_from_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(usize, usize)>, D::Error> {
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(usize, usize)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping prompt index to answer index")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<usize, usize>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

impl Puzzle {
    /// Build and validate a puzzle. `pairs` lists `(prompt, answer)` in original indices.
    pub fn new<P, A>(
        prompts: P,
        answers: A,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ContentError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::validated(
            prompts.into_iter().map(Into::into).collect(),
            answers.into_iter().map(Into::into).collect(),
            pairs,
        )
    }

    fn validated(
        prompts: Vec<String>,
        answers: Vec<String>,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ContentError> {
        let n = prompts.len();
        if n == 0 {
            return Err(ContentError::EmptyPuzzle);
        }
        if answers.len() != n {
            return Err(ContentError::CountMismatch {
                prompts: n,
                answers: answers.len(),
            });
        }

        let mut assigned: Vec<Option<usize>> = vec![None; n];
        let mut claimed = vec![false; n];
        for (prompt, answer) in pairs {
            if prompt >= n || answer >= n {
                return Err(ContentError::PairOutOfRange { prompt, answer });
            }
            if assigned[prompt].replace(answer).is_some() {
                return Err(ContentError::DuplicatePrompt { prompt });
            }
            if std::mem::replace(&mut claimed[answer], true) {
                return Err(ContentError::DuplicateAnswer { answer });
            }
        }

        // With every key in range and no prompt or answer seen twice, totality
        // is the only property left for a bijection.
        let correct_pairs = assigned
            .into_iter()
            .enumerate()
            .map(|(prompt, answer)| answer.ok_or(ContentError::MissingPair { prompt }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Puzzle {
            prompts,
            answers,
            correct_pairs,
        })
    }

    /// Number of prompts (equal to the number of answers)
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Original answer index that matches the original prompt index
    pub fn correct_answer(&self, original_prompt: usize) -> Option<usize> {
        self.correct_pairs.get(original_prompt).copied()
    }
}

/// Difficulty tier -> ordered levels
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentBank {
    easy: Vec<Puzzle>,
    medium: Vec<Puzzle>,
    hard: Vec<Puzzle>,
}

#[derive(Deserialize)]
struct RawBank {
    easy: Vec<RawPuzzle>,
    medium: Vec<RawPuzzle>,
    hard: Vec<RawPuzzle>,
}

impl ContentBank {
    /// Assemble a bank from already-validated puzzles. Every tier needs at least one level.
    pub fn new(
        easy: Vec<Puzzle>,
        medium: Vec<Puzzle>,
        hard: Vec<Puzzle>,
    ) -> Result<Self, ContentError> {
        let bank = ContentBank { easy, medium, hard };
        for tier in Difficulty::ALL {
            if bank.levels(tier).is_empty() {
                return Err(ContentError::EmptyTier(tier));
            }
        }
        Ok(bank)
    }

    /// Parse and validate a bank from its JSON document
    ///
    /// @param json - `{"easy":[{"prompts":[..],"answers":[..],"correctPairs":{"0":2,..}}],"medium":[..],"hard":[..]}`
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let raw: RawBank = serde_json::from_str(json)?;
        let convert = |tier: Difficulty, levels: Vec<RawPuzzle>| {
            levels
                .into_iter()
                .enumerate()
                .map(|(level, p)| {
                    Puzzle::validated(p.prompts, p.answers, p.correct_pairs).map_err(|source| {
                        ContentError::InLevel {
                            tier,
                            level,
                            source: Box::new(source),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };
        Self::new(
            convert(Difficulty::Easy, raw.easy)?,
            convert(Difficulty::Medium, raw.medium)?,
            convert(Difficulty::Hard, raw.hard)?,
        )
    }

    /// The stock question bank shipped with the widget
    pub fn builtin() -> Self {
        // Static data: validated by `builtin_bank_is_valid` below.
        let build = |prompts: &[&str], answers: &[&str], pairs: &[usize]| Puzzle {
            prompts: prompts.iter().map(|s| s.to_string()).collect(),
            answers: answers.iter().map(|s| s.to_string()).collect(),
            correct_pairs: pairs.to_vec(),
        };
        ContentBank {
            easy: vec![
                build(
                    &["Capital of France?", "2 + 2 = ?", "Color of the sky?"],
                    &["4", "Blue", "Paris"],
                    &[2, 0, 1],
                ),
                build(
                    &["Largest planet?", "Opposite of hot?", "First letter of alphabet?"],
                    &["A", "Jupiter", "Cold"],
                    &[1, 2, 0],
                ),
            ],
            medium: vec![
                build(
                    &[
                        "Color of grass?",
                        "Day after Monday?",
                        "Shape with 3 sides?",
                        "Animal that barks?",
                        "Fruit that's yellow and curved?",
                    ],
                    &["Banana", "Dog", "Green", "Tuesday", "Triangle"],
                    &[2, 3, 4, 1, 0],
                ),
                build(
                    &[
                        "Color of the sun?",
                        "Animal that purrs?",
                        "Shape with 4 equal sides?",
                        "Vehicle with two wheels?",
                        "Fruit that's red and round?",
                    ],
                    &["Cat", "Yellow", "Bicycle", "Apple", "Square"],
                    &[1, 0, 4, 2, 3],
                ),
            ],
            hard: vec![build(
                &[
                    "Color of the ocean?",
                    "Animal that quacks?",
                    "Shape with no corners?",
                    "Fruit that's orange and round?",
                    "Vehicle that flies?",
                    "Number after 9?",
                ],
                &["Duck", "10", "Blue", "Airplane", "Orange", "Circle"],
                &[2, 0, 5, 4, 3, 1],
            )],
        }
    }

    /// Levels of a tier, in order
    pub fn levels(&self, tier: Difficulty) -> &[Puzzle] {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn puzzle(&self, tier: Difficulty, level: usize) -> Option<&Puzzle> {
        self.levels(tier).get(level)
    }
}

impl Default for ContentBank {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_bijection(puzzle: &Puzzle) -> bool {
        let mut seen = vec![false; puzzle.len()];
        (0..puzzle.len()).all(|p| match puzzle.correct_answer(p) {
            Some(a) if a < seen.len() && !seen[a] => {
                seen[a] = true;
                true
            }
            _ => false,
        })
    }

    #[test]
    fn builtin_bank_is_valid() {
        let bank = ContentBank::builtin();
        for tier in Difficulty::ALL {
            assert!(!bank.levels(tier).is_empty(), "{tier} has no levels");
            for puzzle in bank.levels(tier) {
                assert_eq!(puzzle.prompts().len(), puzzle.answers().len());
                assert!(is_bijection(puzzle));
            }
        }
        assert_eq!(bank.levels(Difficulty::Easy).len(), 2);
        assert_eq!(bank.levels(Difficulty::Medium).len(), 2);
        assert_eq!(bank.levels(Difficulty::Hard).len(), 1);
        assert_eq!(bank.levels(Difficulty::Hard)[0].len(), 6);
    }

    #[test]
    fn builtin_bank_matches_its_json_form() {
        let json = serde_json::to_string(&ContentBank::builtin()).unwrap();
        let parsed = ContentBank::from_json(&json).unwrap();
        assert_eq!(parsed, ContentBank::builtin());
    }

    #[test]
    fn parses_object_keyed_pairs_and_questions_alias() {
        let json = r#"{
            "easy": [{"questions": ["A", "B"], "answers": ["X", "Y"], "correctPairs": {"0": 1, "1": 0}}],
            "medium": [{"prompts": ["A"], "answers": ["X"], "correctPairs": {"0": 0}}],
            "hard": [{"prompts": ["A"], "answers": ["X"], "correctPairs": {"0": 0}}]
        }"#;
        let bank = ContentBank::from_json(json).unwrap();
        let puzzle = bank.puzzle(Difficulty::Easy, 0).unwrap();
        assert_eq!(puzzle.prompts(), ["A", "B"]);
        assert_eq!(puzzle.correct_answer(0), Some(1));
        assert_eq!(puzzle.correct_answer(1), Some(0));
    }

    #[test]
    fn rejects_non_bijective_pairs() {
        let err = Puzzle::new(["A", "B"], ["X", "Y"], [(0, 1), (1, 1)]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateAnswer { answer: 1, .. }));

        let err = Puzzle::new(["A", "B"], ["X", "Y"], [(0, 1)]).unwrap_err();
        assert!(matches!(err, ContentError::MissingPair { prompt: 1, .. }));

        let err = Puzzle::new(["A", "B"], ["X", "Y"], [(0, 2), (1, 0)]).unwrap_err();
        assert!(matches!(err, ContentError::PairOutOfRange { answer: 2, .. }));
    }

    #[test]
    fn repeated_prompt_is_not_overwritten() {
        let err = Puzzle::new(["A", "B"], ["X", "Y"], [(0, 1), (1, 1), (1, 0), (0, 1)]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateAnswer { answer: 1 }));

        let err = Puzzle::new(["A", "B"], ["X", "Y"], [(0, 1), (0, 0), (1, 1)]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicatePrompt { prompt: 0 }));
    }

    #[test]
    fn repeated_json_key_is_rejected() {
        let json = r#"{
            "easy": [{"prompts": ["A"], "answers": ["X"], "correctPairs": {"0": 0}}],
            "medium": [
                {"prompts": ["A"], "answers": ["X"], "correctPairs": {"0": 0}},
                {"prompts": ["A", "B"], "answers": ["X", "Y"], "correctPairs": {"0": 1, "0": 0, "1": 1}}
            ],
            "hard": [{"prompts": ["A"], "answers": ["X"], "correctPairs": {"0": 0}}]
        }"#;
        let err = ContentBank::from_json(json).unwrap_err();
        match &err {
            ContentError::InLevel { tier, level, source } => {
                assert_eq!(*tier, Difficulty::Medium);
                assert_eq!(*level, 1);
                assert!(matches!(**source, ContentError::DuplicatePrompt { prompt: 0 }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "medium level 1: prompt 0 has more than one correct answer"
        );
    }

    #[test]
    fn hand_built_puzzle_errors_carry_no_location() {
        let err = Puzzle::new(["A"], ["X"], [(0, 3)]).unwrap_err();
        assert_eq!(err.to_string(), "pair 0 -> 3 is out of range");
    }

    #[test]
    fn rejects_shape_problems() {
        let err = Puzzle::new(["A", "B"], ["X"], [(0, 0), (1, 0)]).unwrap_err();
        assert!(matches!(err, ContentError::CountMismatch { prompts: 2, answers: 1 }));

        let err = Puzzle::new(Vec::<String>::new(), Vec::<String>::new(), []).unwrap_err();
        assert!(matches!(err, ContentError::EmptyPuzzle));
    }

    #[test]
    fn rejects_empty_tier() {
        let one = Puzzle::new(["A"], ["X"], [(0, 0)]).unwrap();
        let err = ContentBank::new(vec![one.clone()], vec![], vec![one]).unwrap_err();
        assert!(matches!(err, ContentError::EmptyTier(Difficulty::Medium)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ContentBank::from_json("{\"easy\": 3}"),
            Err(ContentError::Json(_))
        ));
    }
}
