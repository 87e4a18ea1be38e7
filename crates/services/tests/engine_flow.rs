use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use interview_core::model::{Category, SessionError, SessionId, SessionStatus};
use interview_core::random::ScriptedRandom;
use interview_core::time::fixed_now;
use services::feedback::{DETAIL_POOL, NOT_ANSWERED, PENALTY_CLAUSE};
use services::{Clock, EngineConfig, EngineError, InterviewEngine, LoadReport, SeededRandom};
use storage::{InMemoryStore, KeyValueStore, StorageError};

async fn open(kv: Arc<dyn KeyValueStore>, clock: Clock) -> (InterviewEngine, LoadReport) {
    InterviewEngine::builder(EngineConfig::default(), kv)
        .with_clock(clock)
        .with_random(SeededRandom::new(7))
        .open()
        .await
}

#[tokio::test]
async fn backend_engineer_round_is_completed_and_restored() {
    let kv = InMemoryStore::new();
    let (mut engine, report) = open(Arc::new(kv.clone()), Clock::fixed(fixed_now())).await;
    assert!(matches!(report, LoadReport::Fresh));

    let session = engine
        .create(Category::Technical, "  Backend Engineer ")
        .await
        .unwrap();
    assert_eq!(session.role_title(), "Backend Engineer");
    assert_eq!(session.question_count(), 5);
    assert!(session.answers().iter().all(String::is_empty));
    assert_eq!(session.id().as_str(), "interview_1700000000000");

    let answers = [
        "Closures capture variables from their defining scope.",
        "",
        "Promises represent eventual values.",
        "  ",
        "Delegation attaches one listener to a parent.",
    ];
    for (index, text) in answers.iter().enumerate() {
        engine.record_answer(session.id(), index, *text).await.unwrap();
    }

    let done = engine.complete(session.id()).await.unwrap();
    assert_eq!(done.status(), SessionStatus::Completed);
    let score = done.score().unwrap().value();
    assert!((60..=100).contains(&score));

    let feedback = done.feedback().unwrap();
    assert!(feedback.general_feedback.ends_with(PENALTY_CLAUSE));
    assert_eq!(feedback.detailed_feedback.len(), 5);
    assert_eq!(feedback.detailed_feedback[1], NOT_ANSWERED);
    assert_eq!(feedback.detailed_feedback[3], NOT_ANSWERED);
    for i in [0, 2, 4] {
        assert!(DETAIL_POOL.contains(&feedback.detailed_feedback[i].as_str()));
    }

    let (reopened, report) = open(Arc::new(kv), Clock::fixed(fixed_now())).await;
    assert!(matches!(report, LoadReport::Restored { sessions: 1 }));
    assert_eq!(reopened.get(session.id()), Some(&done));
}

#[tokio::test]
async fn completing_twice_keeps_first_result() {
    let (mut engine, _) = open(Arc::new(InMemoryStore::new()), Clock::fixed(fixed_now())).await;
    let session = engine.create(Category::Behavioral, "Team Lead").await.unwrap();
    let first = engine.complete(session.id()).await.unwrap();

    let err = engine.complete(session.id()).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(ref id) if id == session.id()));
    assert_eq!(engine.get(session.id()), Some(&first));

    let err = engine
        .record_answer(session.id(), 0, "late answer")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
    assert!(engine.resumable(session.id()).is_none());
}

#[tokio::test]
async fn record_answer_rejects_unknown_ids_and_bad_indexes() {
    let (mut engine, _) = open(Arc::new(InMemoryStore::new()), Clock::fixed(fixed_now())).await;
    let session = engine
        .create(Category::SystemDesign, "Staff Engineer")
        .await
        .unwrap();

    let err = engine
        .record_answer(session.id(), 5, "too far")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::IndexOutOfRange { index: 5, len: 5 }));

    let missing: SessionId = "interview_1".parse().unwrap();
    let err = engine.record_answer(&missing, 0, "x").await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
    assert!(matches!(
        engine.complete(&missing).await.unwrap_err(),
        EngineError::NotFound(_)
    ));

    engine.record_answer(session.id(), 2, "first").await.unwrap();
    engine.record_answer(session.id(), 2, "second").await.unwrap();
    let stored = engine.get(session.id()).unwrap();
    assert_eq!(stored.answers()[2], "second");
    assert_eq!(stored.resume_index(), 0);
}

#[tokio::test]
async fn rapid_creation_yields_distinct_ids_newest_first() {
    let (mut engine, _) = open(Arc::new(InMemoryStore::new()), Clock::fixed(fixed_now())).await;
    let mut ids = Vec::new();
    for category in Category::ALL {
        ids.push(engine.create(category, "Engineer").await.unwrap().id().clone());
    }

    let listed: Vec<&SessionId> = engine.list().iter().map(|s| s.id()).collect();
    assert_eq!(listed, vec![&ids[2], &ids[1], &ids[0]]);
    assert_eq!(ids[0].sequence().map(|v| v + 2), ids[2].sequence());
}

#[tokio::test]
async fn invalid_stored_json_starts_empty_and_clears_key() {
    let kv = InMemoryStore::new().with_entry("interviews", "{not json");
    let (mut engine, report) = open(Arc::new(kv.clone()), Clock::fixed(fixed_now())).await;

    assert!(matches!(report, LoadReport::Recovered { .. }));
    assert!(engine.list().is_empty());
    assert!(!engine.is_degraded());
    assert!(kv.raw("interviews").is_none());

    let session = engine.create(Category::Technical, "Dev").await.unwrap();
    assert_eq!(engine.list().len(), 1);
    let stored = kv.raw("interviews").unwrap();
    assert!(stored.contains(session.id().as_str()));

    let (reopened, report) = open(Arc::new(kv), Clock::fixed(fixed_now())).await;
    assert!(matches!(report, LoadReport::Restored { sessions: 1 }));
    assert_eq!(reopened.get(session.id()), Some(&session));
}

#[tokio::test]
async fn delete_removes_any_state_and_ignores_missing_ids() {
    let kv = InMemoryStore::new();
    let (mut engine, _) = open(Arc::new(kv.clone()), Clock::fixed(fixed_now())).await;
    let kept = engine.create(Category::Technical, "Dev").await.unwrap();
    let done = engine.create(Category::Behavioral, "Dev").await.unwrap();
    engine.complete(done.id()).await.unwrap();

    assert!(engine.delete(done.id()).await.unwrap());
    let stored = kv.raw("interviews").unwrap();

    let missing: SessionId = "interview_42".parse().unwrap();
    assert!(!engine.delete(&missing).await.unwrap());
    assert_eq!(kv.raw("interviews").unwrap(), stored);
    assert_eq!(engine.list().len(), 1);
    assert_eq!(engine.list()[0].id(), kept.id());
}

#[tokio::test]
async fn dashboard_summarises_collection() {
    let (mut engine, _) = open(Arc::new(InMemoryStore::new()), Clock::fixed(fixed_now())).await;
    let first = engine.create(Category::Technical, "Dev").await.unwrap();
    let second = engine.create(Category::SystemDesign, "Dev").await.unwrap();
    let done = engine.complete(first.id()).await.unwrap();

    let stats = engine.dashboard();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.average_score, done.score().unwrap().value());
    assert_eq!(stats.categories.technical, 1);
    assert_eq!(stats.categories.system_design, 1);
    assert_eq!(stats.recent.len(), 2);
    assert_eq!(stats.recent[0].id, *second.id());
}

#[tokio::test]
async fn scripted_randomness_picks_exact_questions() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let config = EngineConfig::default().with_questions_per_session(2);
    let (mut engine, _) = InterviewEngine::builder(config, kv)
        .with_clock(Clock::fixed(fixed_now()))
        .with_random(ScriptedRandom::zeros())
        .open()
        .await;

    let session = engine.create(Category::Behavioral, "Manager").await.unwrap();
    let pool = engine.question_bank().pool(Category::Behavioral);
    assert_eq!(session.questions(), &pool[..2]);
}

struct FlakyStore {
    inner: InMemoryStore,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test]
async fn write_failure_degrades_to_memory_only() {
    let store = Arc::new(FlakyStore {
        inner: InMemoryStore::new(),
        fail_writes: AtomicBool::new(false),
    });
    let (mut engine, _) = open(store.clone(), Clock::fixed(fixed_now())).await;
    let first = engine.create(Category::Technical, "Dev").await.unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    let err = engine.record_answer(first.id(), 0, "kept").await.unwrap_err();
    assert!(matches!(err, EngineError::Persistence(_)));
    assert!(engine.is_degraded());
    assert_eq!(engine.get(first.id()).unwrap().answers()[0], "kept");

    let second = engine.create(Category::Behavioral, "Dev").await.unwrap();
    assert_eq!(engine.list().len(), 2);
    assert_eq!(engine.list()[0].id(), second.id());

    let (reopened, _) = open(store, Clock::fixed(fixed_now())).await;
    assert_eq!(reopened.list().len(), 1);
    assert!(reopened.get(first.id()).unwrap().answers()[0].is_empty());
}

struct UnreadableStore;

#[async_trait]
impl KeyValueStore for UnreadableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("storage disabled".into()))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage disabled".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage disabled".into()))
    }
}

#[tokio::test]
async fn unreadable_store_opens_in_memory_only() {
    let (mut engine, report) = open(Arc::new(UnreadableStore), Clock::fixed(fixed_now())).await;
    assert!(matches!(
        report,
        LoadReport::Unavailable(EngineError::Persistence(_))
    ));
    assert!(engine.is_degraded());

    let session = engine.create(Category::Technical, "Dev").await.unwrap();
    assert!(engine.complete(session.id()).await.is_ok());
    assert!(matches!(
        engine.create(Category::Technical, " ").await,
        Err(EngineError::Validation(SessionError::EmptyRoleTitle))
    ));
}
