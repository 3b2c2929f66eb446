// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::{
    answer::{AnswerHistoryRow, NewAnswer},
    facet::{FacetDimension, FacetValue},
    leaderboard::XpRow,
    progress::UserProgress,
    question::Question,
};
use crate::store::{AccuracyCounts, PracticeStore};

const QUESTION_COLUMNS: &str = r#"
    q.id, q.statement, q.options, q.correct_option, q.explanation, q.year,
    q.subject_id, q.topic_id, q.board_id, q.agency_id, q.education_level_id,
    s.label AS subject_label, t.label AS topic_label,
    q.active, q.created_at
"#;

/// Postgres-backed implementation of [`PracticeStore`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PracticeStore for PgStore {
    async fn list_facet_values(
        &self,
        dimension: FacetDimension,
        parent: Option<i64>,
    ) -> Result<Vec<FacetValue>, AppError> {
        let Some(table) = dimension.table() else {
            // Years are virtual: the distinct exam years of the corpus.
            let years: Vec<i32> = sqlx::query_scalar(
                "SELECT DISTINCT year FROM questions WHERE active ORDER BY year DESC",
            )
            .fetch_all(&self.pool)
            .await?;
            return Ok(years
                .into_iter()
                .map(|y| FacetValue {
                    id: i64::from(y),
                    label: y.to_string(),
                    parent_id: None,
                })
                .collect());
        };

        let values = if dimension == FacetDimension::Topic {
            let mut qb = QueryBuilder::<Postgres>::new(
                "SELECT id, label, subject_id AS parent_id FROM topics",
            );
            if let Some(subject_id) = parent {
                qb.push(" WHERE subject_id = ").push_bind(subject_id);
            }
            qb.push(" ORDER BY label");
            qb.build_query_as().fetch_all(&self.pool).await?
        } else {
            sqlx::query_as::<_, FacetValue>(&format!(
                "SELECT id, label, NULL::BIGINT AS parent_id FROM {table} ORDER BY label"
            ))
            .fetch_all(&self.pool)
            .await?
        };

        Ok(values)
    }

    async fn list_active_questions(&self) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            r#"
            SELECT {QUESTION_COLUMNS}
            FROM questions q
            JOIN subjects s ON q.subject_id = s.id
            JOIN topics t ON q.topic_id = t.id
            WHERE q.active
            ORDER BY q.id DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            r#"
            SELECT {QUESTION_COLUMNS}
            FROM questions q
            JOIN subjects s ON q.subject_id = s.id
            JOIN topics t ON q.topic_id = t.id
            WHERE q.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn answer_history(&self, user_id: i64) -> Result<Vec<AnswerHistoryRow>, AppError> {
        let rows = sqlx::query_as::<_, AnswerHistoryRow>(
            r#"
            SELECT
                a.question_id,
                q.subject_id, s.label AS subject_label,
                q.topic_id, t.label AS topic_label,
                a.correct, a.answered_at
            FROM answers a
            JOIN questions q ON a.question_id = q.id
            JOIN subjects s ON q.subject_id = s.id
            JOIN topics t ON q.topic_id = t.id
            WHERE a.user_id = $1
            ORDER BY a.answered_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn record_answer(&self, answer: &NewAnswer, xp_delta: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // The UNIQUE (user_id, question_id) constraint is the backstop for
        // concurrent submissions; a violation aborts before progress moves.
        sqlx::query(
            r#"
            INSERT INTO answers (user_id, question_id, selected_option, correct, answered_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(answer.user_id)
        .bind(answer.question_id)
        .bind(&answer.selected_option)
        .bind(answer.correct)
        .bind(answer.answered_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict("Question already answered".to_string());
                }
            }
            AppError::from(e)
        })?;

        // Atomic deltas at the store, never read-modify-write in app code.
        sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, xp, questions_answered)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id) DO UPDATE SET
                xp = user_progress.xp + EXCLUDED.xp,
                questions_answered = user_progress.questions_answered + 1
            "#,
        )
        .bind(answer.user_id)
        .bind(xp_delta)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_progress(&self, user_id: i64) -> Result<UserProgress, AppError> {
        let progress = sqlx::query_as::<_, UserProgress>(
            "SELECT user_id, xp, questions_answered FROM user_progress WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress.unwrap_or(UserProgress {
            user_id,
            ..Default::default()
        }))
    }

    async fn list_users_by_xp(
        &self,
        active_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<XpRow>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT u.id AS user_id, u.name, COALESCE(p.xp, 0) AS xp
            FROM users u
            LEFT JOIN user_progress p ON p.user_id = u.id
            "#,
        );
        if let Some(since) = active_since {
            // Period eligibility is decided by answer activity in the
            // window, not by account age.
            qb.push(
                " WHERE EXISTS (SELECT 1 FROM answers a WHERE a.user_id = u.id AND a.answered_at >= ",
            )
            .push_bind(since)
            .push(")");
        }
        qb.push(" ORDER BY xp DESC, u.id ASC");

        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn accuracy_for_users(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, AccuracyCounts>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT user_id, COUNT(*) AS total, COUNT(*) FILTER (WHERE correct) AS correct
            FROM answers
            WHERE user_id IN (
            "#,
        );
        let mut separated = qb.separated(",");
        for id in user_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");
        qb.push(" GROUP BY user_id");

        let rows: Vec<(i64, i64, i64)> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, total, correct)| {
                (
                    user_id,
                    AccuracyCounts {
                        total: total as u32,
                        correct: correct as u32,
                    },
                )
            })
            .collect())
    }
}
