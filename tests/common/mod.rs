// tests/common/mod.rs
//
// Shared test harness: an in-memory PracticeStore and a helper that
// spawns the app on a random port, mirroring how production wires the
// router but without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use studytrack::config::Config;
use studytrack::error::AppError;
use studytrack::models::{
    answer::{AnswerHistoryRow, NewAnswer},
    facet::{FacetDimension, FacetValue},
    leaderboard::XpRow,
    progress::UserProgress,
    question::Question,
};
use studytrack::routes;
use studytrack::state::AppState;
use studytrack::store::{AccuracyCounts, PracticeStore};
use studytrack::utils::jwt::sign_jwt;

#[derive(Clone)]
struct StoredAnswer {
    user_id: i64,
    question_id: i64,
    correct: bool,
    answered_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    questions: Vec<Question>,
    subjects: Vec<FacetValue>,
    topics: Vec<FacetValue>,
    users: Vec<(i64, String)>,
    answers: Vec<StoredAnswer>,
    progress: HashMap<i64, UserProgress>,
}

/// In-memory store with the same uniqueness and atomicity contract the
/// Postgres implementation gets from its constraints and transactions.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: i64, name: &str) {
        self.inner.lock().unwrap().users.push((id, name.to_string()));
    }

    pub fn add_subject(&self, id: i64, label: &str) {
        self.inner.lock().unwrap().subjects.push(FacetValue {
            id,
            label: label.to_string(),
            parent_id: None,
        });
    }

    pub fn add_topic(&self, id: i64, label: &str, subject_id: i64) {
        self.inner.lock().unwrap().topics.push(FacetValue {
            id,
            label: label.to_string(),
            parent_id: Some(subject_id),
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_question(
        &self,
        id: i64,
        statement: &str,
        options: &[&str],
        correct_option: &str,
        year: i32,
        subject: (i64, &str),
        topic: (i64, &str),
    ) {
        self.inner.lock().unwrap().questions.push(Question {
            id,
            statement: statement.to_string(),
            options: Json(options.iter().map(|o| o.to_string()).collect()),
            correct_option: correct_option.to_string(),
            explanation: Some(format!("The key is {correct_option}")),
            year,
            subject_id: subject.0,
            topic_id: topic.0,
            board_id: 1,
            agency_id: 1,
            education_level_id: 1,
            subject_label: subject.1.to_string(),
            topic_label: topic.1.to_string(),
            active: true,
            created_at: None,
        });
    }

    /// Seeds a historical answer directly, bypassing the recorder, for
    /// statistics and ranking scenarios.
    pub fn seed_answer(
        &self,
        user_id: i64,
        question_id: i64,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) {
        self.inner.lock().unwrap().answers.push(StoredAnswer {
            user_id,
            question_id,
            correct,
            answered_at,
        });
    }

    pub fn set_progress(&self, user_id: i64, xp: i64, questions_answered: i64) {
        self.inner.lock().unwrap().progress.insert(
            user_id,
            UserProgress {
                user_id,
                xp,
                questions_answered,
            },
        );
    }
}

#[async_trait]
impl PracticeStore for MemoryStore {
    async fn list_facet_values(
        &self,
        dimension: FacetDimension,
        parent: Option<i64>,
    ) -> Result<Vec<FacetValue>, AppError> {
        let inner = self.inner.lock().unwrap();
        let values = match dimension {
            FacetDimension::Subject => inner.subjects.clone(),
            FacetDimension::Topic => inner
                .topics
                .iter()
                .filter(|t| parent.is_none() || t.parent_id == parent)
                .cloned()
                .collect(),
            FacetDimension::Year => {
                let mut years: Vec<i32> = inner.questions.iter().map(|q| q.year).collect();
                years.sort_unstable();
                years.dedup();
                years
                    .into_iter()
                    .rev()
                    .map(|y| FacetValue {
                        id: i64::from(y),
                        label: y.to_string(),
                        parent_id: None,
                    })
                    .collect()
            }
            _ => Vec::new(),
        };
        Ok(values)
    }

    async fn list_active_questions(&self) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut questions: Vec<Question> = inner
            .questions
            .iter()
            .filter(|q| q.active)
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(questions)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn answer_history(&self, user_id: i64) -> Result<Vec<AnswerHistoryRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<AnswerHistoryRow> = inner
            .answers
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let q = inner.questions.iter().find(|q| q.id == a.question_id)?;
                Some(AnswerHistoryRow {
                    question_id: a.question_id,
                    subject_id: q.subject_id,
                    subject_label: q.subject_label.clone(),
                    topic_id: q.topic_id,
                    topic_label: q.topic_label.clone(),
                    correct: a.correct,
                    answered_at: a.answered_at,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.answered_at);
        Ok(rows)
    }

    async fn record_answer(&self, answer: &NewAnswer, xp_delta: i64) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        let duplicate = inner
            .answers
            .iter()
            .any(|a| a.user_id == answer.user_id && a.question_id == answer.question_id);
        if duplicate {
            return Err(AppError::Conflict("Question already answered".to_string()));
        }

        inner.answers.push(StoredAnswer {
            user_id: answer.user_id,
            question_id: answer.question_id,
            correct: answer.correct,
            answered_at: answer.answered_at,
        });
        let progress = inner
            .progress
            .entry(answer.user_id)
            .or_insert(UserProgress {
                user_id: answer.user_id,
                xp: 0,
                questions_answered: 0,
            });
        progress.xp += xp_delta;
        progress.questions_answered += 1;
        Ok(())
    }

    async fn get_progress(&self, user_id: i64) -> Result<UserProgress, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.progress.get(&user_id).cloned().unwrap_or(UserProgress {
            user_id,
            ..Default::default()
        }))
    }

    async fn list_users_by_xp(
        &self,
        active_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<XpRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<XpRow> = inner
            .users
            .iter()
            .filter(|(id, _)| match active_since {
                None => true,
                Some(since) => inner
                    .answers
                    .iter()
                    .any(|a| a.user_id == *id && a.answered_at >= since),
            })
            .map(|(id, name)| XpRow {
                user_id: *id,
                name: name.clone(),
                xp: inner.progress.get(id).map_or(0, |p| p.xp),
            })
            .collect();
        rows.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.user_id.cmp(&b.user_id)));
        Ok(rows)
    }

    async fn accuracy_for_users(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, AccuracyCounts>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut out: HashMap<i64, AccuracyCounts> = HashMap::new();
        for a in &inner.answers {
            if !user_ids.contains(&a.user_id) {
                continue;
            }
            let counts = out.entry(a.user_id).or_default();
            counts.total += 1;
            if a.correct {
                counts.correct += 1;
            }
        }
        Ok(out)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        xp_correct: 20,
        xp_incorrect: 5,
        facet_cache_ttl: 300,
        leaderboard_limit: 100,
        daily_series_days: 30,
    }
}

/// Spawns the app on a random port over the in-memory store.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app(store: Arc<MemoryStore>) -> String {
    let config = test_config();
    let state = AppState::new(store, config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Mints a bearer token the way the external identity service would.
pub fn token_for(user_id: i64) -> String {
    let config = test_config();
    sign_jwt(user_id, &config.jwt_secret, config.jwt_expiration).expect("Failed to sign test JWT")
}
