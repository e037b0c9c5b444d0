//! Student records: names with per-subject scores.
//!
//! Names are unique ignoring case. Every successful add, update and delete is
//! written to the store straight away.

use crate::commands::persist::{autosave, load_collection, save_collection};
use crate::commands::{contains_term, resolve, search, search_term, CmdMessage, CmdResult, Selector};
use crate::error::{RecordzError, Result};
use crate::model::Student;
use crate::store::DataStore;
use tracing::debug;
use uuid::Uuid;

const NOUN: &str = "students";

/// Requested changes to a student. `None`, blank names, and an empty score list
/// leave the corresponding field alone.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub scores: Vec<(String, f64)>,
}

pub struct StudentManager<S: DataStore<Student>> {
    store: S,
    students: Vec<Student>,
}

impl<S: DataStore<Student>> StudentManager<S> {
    /// An empty manager. Call [`load`](Self::load) to read the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            students: Vec::new(),
        }
    }

    /// Creates a manager and loads whatever the store holds.
    pub fn open(store: S) -> (Self, CmdResult<Student>) {
        let mut manager = Self::new(store);
        let result = manager.load();
        (manager, result)
    }

    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> CmdResult<Student> {
        CmdResult::default().with_listed(search(&self.students, |_| true))
    }

    pub fn add<I, N>(&mut self, name: &str, scores: I) -> Result<CmdResult<Student>>
    where
        I: IntoIterator<Item = (N, f64)>,
        N: AsRef<str>,
    {
        let student = Student::new(name, scores)?;
        if self.students.iter().any(|s| s.has_name(student.name())) {
            return Err(RecordzError::Duplicate(format!(
                "Student with name '{}'",
                student.name()
            )));
        }

        debug!(name = student.name(), "adding student");
        self.students.push(student.clone());
        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Student '{}' added successfully.",
            student.name()
        )));
        autosave(&mut self.store, &self.students, NOUN, &mut result);
        Ok(result.with_affected(vec![student]))
    }

    /// Case-insensitive substring search on the name.
    pub fn find(&self, term: &str) -> CmdResult<Student> {
        let term = search_term(term);
        CmdResult::default().with_listed(search(&self.students, |s| contains_term(s.name(), &term)))
    }

    pub fn get(&self, selector: &Selector) -> Result<&Student> {
        Ok(&self.students[self.position(selector)?])
    }

    pub fn update(
        &mut self,
        selector: &Selector,
        update: &StudentUpdate,
    ) -> Result<CmdResult<Student>> {
        let pos = self.position(selector)?;
        let mut updated = self.students[pos].clone();
        let mut changed = false;

        if let Some(raw) = update.name.as_deref().filter(|n| !n.trim().is_empty()) {
            let name = Student::validate_name(raw)?;
            let id = updated.id();
            if self
                .students
                .iter()
                .any(|s| s.id() != id && s.has_name(&name))
            {
                return Err(RecordzError::Duplicate(format!(
                    "Student with name '{}'",
                    name
                )));
            }
            if name != updated.name() {
                updated.set_name(&name)?;
                changed = true;
            }
        }

        if !update.scores.is_empty() {
            let before = updated.scores().clone();
            updated.merge_scores(update.scores.iter().map(|(s, v)| (s.as_str(), *v)))?;
            changed |= *updated.scores() != before;
        }

        if !changed {
            return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
                "No changes applied to '{}'.",
                updated.name()
            ))));
        }

        self.students[pos] = updated.clone();
        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Student '{}' updated successfully.",
            updated.name()
        )));
        autosave(&mut self.store, &self.students, NOUN, &mut result);
        Ok(result.with_affected(vec![updated]))
    }

    pub fn delete(&mut self, selector: &Selector) -> Result<CmdResult<Student>> {
        let pos = self.position(selector)?;
        let id = self.students[pos].id();
        self.delete_by_id(id)
    }

    /// Removes the student with this exact identity.
    pub fn delete_by_id(&mut self, id: Uuid) -> Result<CmdResult<Student>> {
        let pos = self
            .students
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| RecordzError::NotFound(id.to_string()))?;
        let removed = self.students.remove(pos);

        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Student '{}' deleted successfully.",
            removed.name()
        )));
        autosave(&mut self.store, &self.students, NOUN, &mut result);
        Ok(result.with_affected(vec![removed]))
    }

    pub fn save(&mut self) -> Result<CmdResult<Student>> {
        let message = save_collection(&mut self.store, &self.students, NOUN)?;
        Ok(CmdResult::default().with_message(message))
    }

    /// Replaces the in-memory collection with the stored one.
    pub fn load(&mut self) -> CmdResult<Student> {
        let (students, message) = load_collection(&self.store, NOUN);
        self.students = students;
        CmdResult::default().with_message(message)
    }

    fn position(&self, selector: &Selector) -> Result<usize> {
        resolve(
            &self.students,
            selector,
            |s, term| contains_term(s.name(), term),
            |s| s.name().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Grade;
    use crate::store::memory::InMemoryStore;
    use crate::validation::ValidationError;

    fn manager() -> StudentManager<InMemoryStore<Student>> {
        StudentManager::new(InMemoryStore::new())
    }

    fn seeded() -> StudentManager<InMemoryStore<Student>> {
        let mut m = manager();
        m.add("Jane Doe", [("Math", 95.0), ("Science", 85.0)]).unwrap();
        m.add("John Smith", [("Art", 70.0)]).unwrap();
        m.add("Janet Lee", [("PE", 55.0)]).unwrap();
        m
    }

    #[test]
    fn add_normalizes_and_persists() {
        let mut m = manager();
        let result = m.add("jane doe", [("Math", 95.0), ("Science", 85.0)]).unwrap();
        let student = &result.affected[0];
        assert_eq!(student.name(), "Jane Doe");
        assert_eq!(student.average(), 90.0);
        assert_eq!(student.grade(), Grade::A);
        assert_eq!(m.store().saves(), 1);
        assert_eq!(m.store().snapshot().map(<[Student]>::len), Some(1));
    }

    #[test]
    fn add_rejects_duplicate_name_ignoring_case() {
        let mut m = seeded();
        let err = m.add("JANE DOE", [("Math", 10.0)]).unwrap_err();
        assert!(matches!(err, RecordzError::Duplicate(_)));
        assert_eq!(m.all().len(), 3);
    }

    #[test]
    fn add_surfaces_validation_errors() {
        let mut m = manager();
        let err = m.add("J4ne", [("Math", 10.0)]).unwrap_err();
        assert!(matches!(
            err,
            RecordzError::Validation(ValidationError::InvalidCharacter { .. })
        ));
        assert!(m.all().is_empty());
        assert_eq!(m.store().saves(), 0);
    }

    #[test]
    fn find_is_case_insensitive_substring() {
        let m = seeded();
        let names: Vec<String> = m
            .find("JAN")
            .listed
            .into_iter()
            .map(|d| d.record.name().to_string())
            .collect();
        assert_eq!(names, vec!["Jane Doe", "Janet Lee"]);
        assert!(m.find("nobody").listed.is_empty());
    }

    #[test]
    fn update_renames_and_merges_scores() {
        let mut m = seeded();
        let update = StudentUpdate {
            name: Some("john q smith".into()),
            scores: vec![("math".into(), 90.0)],
        };
        m.update(&Selector::Search("john".into()), &update).unwrap();

        let john = &m.all()[1];
        assert_eq!(john.name(), "John Q Smith");
        assert_eq!(john.scores().len(), 2);
        assert_eq!(john.average(), 80.0);
        assert_eq!(m.store().saves(), 4);
    }

    #[test]
    fn update_rejects_rename_onto_another_student() {
        let mut m = seeded();
        let update = StudentUpdate {
            name: Some("jane doe".into()),
            scores: vec![("Math".into(), 100.0)],
        };
        let err = m.update(&Selector::Index(2), &update).unwrap_err();
        assert!(matches!(err, RecordzError::Duplicate(_)));
        assert_eq!(m.all()[1].name(), "John Smith");
        assert_eq!(m.all()[1].scores().len(), 1);
    }

    #[test]
    fn update_allows_same_name_for_self() {
        let mut m = seeded();
        let update = StudentUpdate {
            name: Some("JANE DOE".into()),
            scores: vec![],
        };
        let result = m.update(&Selector::Index(1), &update).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(m.store().saves(), 3);
    }

    #[test]
    fn update_with_invalid_score_changes_nothing() {
        let mut m = seeded();
        let update = StudentUpdate {
            name: Some("Johnny Smith".into()),
            scores: vec![("Math".into(), 101.0)],
        };
        assert!(m.update(&Selector::Index(2), &update).is_err());
        assert_eq!(m.all()[1].name(), "John Smith");
    }

    #[test]
    fn delete_requires_unambiguous_target() {
        let mut m = seeded();
        let err = m.delete(&Selector::Search("jan".into())).unwrap_err();
        assert!(matches!(err, RecordzError::Ambiguous { .. }));
        assert_eq!(m.all().len(), 3);

        m.delete(&Selector::Search("janet".into())).unwrap();
        assert_eq!(m.all().len(), 2);
        assert!(m.find("janet").listed.is_empty());
    }

    #[test]
    fn delete_by_id_removes_exact_record() {
        let mut m = seeded();
        let id = m.all()[0].id();
        m.delete_by_id(id).unwrap();
        assert!(m.all().iter().all(|s| s.id() != id));
        assert!(matches!(
            m.delete_by_id(id),
            Err(RecordzError::NotFound(_))
        ));
    }

    #[test]
    fn load_replaces_collection() {
        let mut m = seeded();
        let stored = m.store().snapshot().unwrap().to_vec();
        let (reopened, result) = StudentManager::open(InMemoryStore::with_records(stored));
        assert_eq!(reopened.all().len(), 3);
        assert_eq!(reopened.all()[0].name(), "Jane Doe");
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        m.add("Extra Person", [("Art", 1.0)]).unwrap();
        assert_eq!(m.all().len(), 4);
    }

    #[test]
    fn missing_store_yields_empty_with_warning() {
        let (m, result) = StudentManager::open(InMemoryStore::<Student>::new());
        assert!(m.all().is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn corrupt_store_yields_empty_with_error() {
        let (m, result) = StudentManager::open(InMemoryStore::<Student>::corrupted());
        assert!(m.all().is_empty());
        assert!(result.has_errors());
    }
}
