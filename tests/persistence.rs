use recordz::budget::BudgetTracker;
use recordz::commands::{MessageLevel, Selector};
use recordz::inventory::InventoryManager;
use recordz::store::fs::JsonFileStore;
use recordz::students::StudentManager;
use std::fs;

#[test]
fn test_students_survive_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");

    let (mut first, _) = StudentManager::open(JsonFileStore::new(&path));
    first
        .add("jane doe", [("Math", 95.0), ("Science", 85.0)])
        .unwrap();
    first.add("John Smith", [("pe", 59.994)]).unwrap();

    let (second, loaded) = StudentManager::open(JsonFileStore::new(&path));
    assert_eq!(loaded.messages[0].level, MessageLevel::Success);
    let names: Vec<&str> = second.all().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Jane Doe", "John Smith"]);
    assert_eq!(second.all()[1].scores()["PE"], 59.99);
    assert_ne!(first.all()[0].id(), second.all()[0].id());
}

#[test]
fn test_missing_file_starts_empty_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let (manager, loaded) = InventoryManager::open(JsonFileStore::new(dir.path().join("books.json")));
    assert!(manager.all().is_empty());
    assert_eq!(loaded.messages[0].level, MessageLevel::Warning);
}

#[test]
fn test_invalid_record_makes_whole_file_unusable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    fs::write(
        &path,
        r#"[
            {"title": "Dune", "author": "Frank Herbert", "price": 9.99, "stock": 2},
            {"title": "Emma", "author": "Jane Austen", "price": 5.0, "stock": -1}
        ]"#,
    )
    .unwrap();

    let (manager, loaded) = InventoryManager::open(JsonFileStore::new(&path));
    assert!(manager.all().is_empty());
    assert!(loaded.has_errors());
}

#[test]
fn test_budget_file_is_sorted_after_delete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.json");

    let (mut tracker, _) = BudgetTracker::open(JsonFileStore::new(&path));
    tracker.add("2024-03-01", "Food", 20.0).unwrap();
    tracker.add("2024-01-01", "Salary", 1000.0).unwrap();
    tracker.add("2024-02-01", "Rent", 500.0).unwrap();
    assert!(!path.exists());

    tracker.delete(&Selector::Index(2)).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let dates: Vec<&str> = raw
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-03-01"]);
    assert_eq!(raw[1]["category"], "Food");
}

#[test]
fn test_rejected_money_values_never_reach_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let books_path = dir.path().join("books.json");
    let budget_path = dir.path().join("transactions.json");

    let (mut books, _) = InventoryManager::open(JsonFileStore::new(&books_path));
    books.add("Dune", "Frank Herbert", 9.99, 1).unwrap();
    assert!(books.add("Pamphlet", "Anon", 0.004, 1).is_err());
    assert!(books.add("Folio", "Anon", 1.7e308, 1).is_err());

    let (budget, _) = BudgetTracker::open(JsonFileStore::new(&budget_path));
    let mut budget = budget.with_autosave(true);
    budget.add("2024-01-01", "Food", 12.5).unwrap();
    assert!(budget.add("2024-01-02", "Rent", 1.7e308).is_err());

    let (books, loaded) = InventoryManager::open(JsonFileStore::new(&books_path));
    assert!(!loaded.has_errors());
    assert_eq!(books.all().len(), 1);

    let (budget, loaded) = BudgetTracker::open(JsonFileStore::new(&budget_path));
    assert!(!loaded.has_errors());
    assert_eq!(budget.all().len(), 1);
    assert_eq!(budget.all()[0].amount(), 12.5);
}
