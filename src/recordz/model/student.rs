use crate::validation::{
    match_choice, parse_number, round2, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;

/// Letter grade derived from a student's average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Buckets an average in [0, 100]: A from 90, B from 80, C from 70, D from 60.
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Grade::A
        } else if average >= 80.0 {
            Grade::B
        } else if average >= 70.0 {
            Grade::C
        } else if average >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// A student and their score per subject.
///
/// Fields are private so that every mutation goes through a validator. The
/// average and grade are not stored; they are recomputed from the scores on
/// every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StudentRecord", into = "StudentRecord")]
pub struct Student {
    id: Uuid,
    name: String,
    scores: BTreeMap<String, f64>,
}

/// On-disk shape of a [`Student`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StudentRecord {
    name: String,
    subjects_scores: BTreeMap<String, f64>,
}

impl Student {
    pub const SUBJECTS: &'static [&'static str] = &[
        "Math",
        "Science",
        "English",
        "History",
        "Art",
        "Music",
        "PE",
        "Computer Science",
    ];

    pub fn new<I, S>(name: &str, scores: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let name = Self::validate_name(name)?;
        let scores = Self::validate_scores(scores)?;
        if scores.is_empty() {
            return Err(ValidationError::NoSubjects);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            scores,
        })
    }

    /// Trims, checks length and characters, and title-cases each word.
    pub fn validate_name(raw: &str) -> ValidationResult<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "Student name",
            });
        }
        let len = trimmed.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(ValidationError::Length {
                field: "Student name",
                min: NAME_MIN,
                max: NAME_MAX,
            });
        }
        if let Some(ch) = trimmed.chars().find(|c| !is_name_char(*c)) {
            return Err(ValidationError::InvalidCharacter {
                field: "Student name",
                ch,
            });
        }
        Ok(trimmed
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "))
    }

    pub fn validate_subject(raw: &str) -> ValidationResult<&'static str> {
        match_choice("subject", raw, Self::SUBJECTS)
    }

    pub fn validate_score(score: f64) -> ValidationResult<f64> {
        let rounded = round2(score);
        if !rounded.is_finite() {
            return Err(ValidationError::NotANumber {
                field: "Score",
                value: score.to_string(),
            });
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(ValidationError::OutOfRange {
                field: "Score",
                detail: "must be between 0 and 100".to_string(),
            });
        }
        Ok(rounded)
    }

    pub fn parse_score(raw: &str) -> ValidationResult<f64> {
        Self::validate_score(parse_number("Score", raw)?)
    }

    /// Parses a `Subject=Score` (or `Subject:Score`) pair.
    pub fn parse_score_entry(raw: &str) -> ValidationResult<(&'static str, f64)> {
        let (subject, score) = raw
            .split_once('=')
            .or_else(|| raw.split_once(':'))
            .ok_or_else(|| ValidationError::Format {
                field: "Score entry",
                expected: "Subject=Score",
                value: raw.trim().to_string(),
            })?;
        Ok((Self::validate_subject(subject)?, Self::parse_score(score)?))
    }

    fn validate_scores<I, S>(scores: I) -> ValidationResult<BTreeMap<String, f64>>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        scores
            .into_iter()
            .map(|(subject, score)| {
                let subject = Self::validate_subject(subject.as_ref())?;
                Ok((subject.to_string(), Self::validate_score(score)?))
            })
            .collect()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &BTreeMap<String, f64> {
        &self.scores
    }

    pub fn average(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let total: f64 = self.scores.values().sum();
        round2(total / self.scores.len() as f64)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }

    /// Case-insensitive name comparison, the uniqueness key for students.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn set_name(&mut self, raw: &str) -> ValidationResult<()> {
        self.name = Self::validate_name(raw)?;
        Ok(())
    }

    /// Adds or replaces scores. Nothing changes unless every entry is valid.
    pub fn merge_scores<I, S>(&mut self, scores: I) -> ValidationResult<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let validated = Self::validate_scores(scores)?;
        self.scores.extend(validated);
        Ok(())
    }
}

impl TryFrom<StudentRecord> for Student {
    type Error = ValidationError;

    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        Student::new(&record.name, record.subjects_scores)
    }
}

impl From<Student> for StudentRecord {
    fn from(student: Student) -> Self {
        Self {
            name: student.name,
            subjects_scores: student.scores,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
