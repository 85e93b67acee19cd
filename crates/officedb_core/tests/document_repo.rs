use officedb_core::{
    open_db_in_memory, CallScope, DbError, Document, DocumentRepository, Filter, ObjectId,
    RepoError, SqliteDocumentRepository, StoreHandle,
};
use serde_json::{json, Value};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn people(store: &StoreHandle) -> SqliteDocumentRepository {
    SqliteDocumentRepository::new(store.clone(), "people")
}

fn count_documents(store: &StoreHandle) -> i64 {
    store
        .run(&CallScope::unbounded(), |conn| {
            conn.query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))
        })
        .unwrap()
}

fn seed_ages(repo: &SqliteDocumentRepository, ages: &[i64]) {
    for age in ages {
        repo.insert(&document(json!({"name": format!("p{age}"), "age": age})))
            .unwrap();
    }
}

fn ages_of(repo: &SqliteDocumentRepository, filter: &Filter) -> Vec<i64> {
    let mut ages: Vec<i64> = repo
        .find_many(filter)
        .unwrap()
        .into_iter()
        .map(|stored| stored.body["age"].as_i64().unwrap())
        .collect();
    ages.sort_unstable();
    ages
}

#[test]
fn insert_then_find_by_id_returns_same_body() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    let body = document(json!({"name": "Carlos", "age": 29, "tickets": [100, 200]}));

    let id = repo.insert(&body).unwrap();
    let stored = repo.find_by_id(id).unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.body, body);
}

#[test]
fn collections_are_isolated() {
    let store = open_db_in_memory().unwrap();
    let people_repo = people(&store);
    let tickets_repo = SqliteDocumentRepository::new(store.clone(), "tickets");

    let id = people_repo.insert(&document(json!({"name": "Ana"}))).unwrap();
    assert!(tickets_repo.find_all().unwrap().is_empty());
    assert!(matches!(
        tickets_repo.find_by_id(id),
        Err(RepoError::NotFound("tickets"))
    ));
    assert!(matches!(tickets_repo.delete(id), Err(RepoError::NotFound(_))));
    assert_eq!(people_repo.find_all().unwrap().len(), 1);
}

#[test]
fn range_is_inclusive_at_both_bounds() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    seed_ages(&repo, &[22, 24, 25, 33, 40, 41]);

    assert_eq!(
        ages_of(&repo, &Filter::range("age", Some(25), Some(40))),
        [25, 33, 40]
    );
    assert_eq!(
        ages_of(&repo, &Filter::range("age", None, Some(24))),
        [22, 24]
    );
    assert_eq!(
        ages_of(&repo, &Filter::range("age", Some(41), None)),
        [41]
    );
    assert_eq!(ages_of(&repo, &Filter::range("age", None, None)).len(), 6);
}

#[test]
fn inverted_range_matches_nothing() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    seed_ages(&repo, &[25, 30, 40]);

    assert!(repo
        .find_many(&Filter::range("age", Some(40), Some(25)))
        .unwrap()
        .is_empty());
}

#[test]
fn range_skips_non_integer_values() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    seed_ages(&repo, &[30]);
    repo.insert(&document(json!({"name": "texto", "age": "30"})))
        .unwrap();
    repo.insert(&document(json!({"name": "decimal", "age": 30.5})))
        .unwrap();
    repo.insert(&document(json!({"name": "sin edad"}))).unwrap();

    let matches = repo
        .find_many(&Filter::range("age", Some(0), Some(100)))
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].body["name"], "p30");
}

#[test]
fn equality_is_type_sensitive() {
    let store = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(store.clone(), "tickets");
    repo.insert(&document(json!({"number": 7, "owner": "Ana"})))
        .unwrap();
    repo.insert(&document(json!({"number": "7", "owner": "Luis"})))
        .unwrap();

    let found = repo.find_one(&Filter::eq("number", 7)).unwrap();
    assert_eq!(found.body["owner"], "Ana");

    let found = repo.find_one(&Filter::eq("number", "7")).unwrap();
    assert_eq!(found.body["owner"], "Luis");

    assert!(matches!(
        repo.find_one(&Filter::eq("number", 8)),
        Err(RepoError::NotFound("tickets"))
    ));
}

#[test]
fn containment_matches_array_elements_only() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    repo.insert(&document(json!({"name": "a", "tickets": [100, 200]})))
        .unwrap();
    repo.insert(&document(json!({"name": "b", "tickets": [200, 300]})))
        .unwrap();
    repo.insert(&document(json!({"name": "c", "tickets": 200})))
        .unwrap();
    repo.insert(&document(json!({"name": "d", "tickets": ["200"]})))
        .unwrap();

    let mut names: Vec<String> = repo
        .find_many(&Filter::contains("tickets", 200))
        .unwrap()
        .into_iter()
        .map(|stored| stored.body["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["a", "b"]);

    assert!(repo
        .find_many(&Filter::contains("tickets", 999))
        .unwrap()
        .is_empty());
}

#[test]
fn update_replaces_only_patched_fields() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    let id = repo
        .insert(&document(json!({
            "name": "Carlos",
            "age": 29,
            "tickets": [100, 200],
            "notes": "kept"
        })))
        .unwrap();

    let updated = repo
        .update(id, &document(json!({"age": 30, "tickets": [101]})))
        .unwrap();
    assert!(updated);

    let stored = repo.find_by_id(id).unwrap();
    assert_eq!(
        Value::Object(stored.body),
        json!({"name": "Carlos", "age": 30, "tickets": [101], "notes": "kept"})
    );
}

#[test]
fn update_stores_strings_as_json_strings() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    let id = repo.insert(&document(json!({"name": "Carlos"}))).unwrap();

    repo.update(id, &document(json!({"name": "[1,2]"}))).unwrap();
    let stored = repo.find_by_id(id).unwrap();
    assert_eq!(stored.body["name"], json!("[1,2]"));
}

#[test]
fn update_on_missing_id_is_not_found_and_creates_nothing() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);

    let err = repo
        .update(ObjectId::new(), &document(json!({"name": "nadie"})))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound("people")));
    assert_eq!(count_documents(&store), 0);
}

#[test]
fn delete_removes_once_then_reports_not_found() {
    let store = open_db_in_memory().unwrap();
    let repo = people(&store);
    let kept = repo.insert(&document(json!({"name": "kept"}))).unwrap();
    let id = repo.insert(&document(json!({"name": "gone"}))).unwrap();

    assert!(repo.delete(id).unwrap());
    assert!(matches!(repo.delete(id), Err(RepoError::NotFound(_))));
    assert!(matches!(repo.find_by_id(id), Err(RepoError::NotFound(_))));
    assert_eq!(repo.find_by_id(kept).unwrap().body["name"], "kept");
}

#[test]
fn expired_scope_fails_without_writing() {
    let store = open_db_in_memory().unwrap();
    let scope = CallScope::unbounded().with_deadline(Instant::now() - Duration::from_millis(1));
    let repo = people(&store).with_scope(scope);

    let err = repo.insert(&document(json!({"name": "late"}))).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::DeadlineExceeded)));
    assert_eq!(count_documents(&store), 0);
}

#[test]
fn cancelled_scope_fails_reads() {
    let store = open_db_in_memory().unwrap();
    people(&store)
        .insert(&document(json!({"name": "Ana"})))
        .unwrap();

    let scope = CallScope::unbounded().with_cancel_flag(Arc::new(AtomicBool::new(true)));
    let err = people(&store).with_scope(scope).find_all().unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Cancelled)));
}

#[test]
fn generous_scope_does_not_interfere() {
    let store = open_db_in_memory().unwrap();
    let scope = CallScope::unbounded().with_timeout(Duration::from_secs(30));
    let repo = people(&store).with_scope(scope);
    seed_ages(&repo, &[1, 2, 3]);
    assert_eq!(repo.find_all().unwrap().len(), 3);
}

#[test]
fn stored_body_that_is_not_json_is_invalid_data() {
    let store = open_db_in_memory().unwrap();
    let id = ObjectId::new();
    // Bypass the CHECK constraint the way a foreign writer with an older layout could.
    store
        .run(&CallScope::unbounded(), |conn| {
            conn.execute_batch("PRAGMA ignore_check_constraints = ON;")?;
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES ('people', ?1, 'not json');",
                [&id.bytes()[..]],
            )?;
            conn.execute_batch("PRAGMA ignore_check_constraints = OFF;")
        })
        .unwrap();

    let err = people(&store).find_by_id(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "{err}");
}
