//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod answers;
mod assignments;
mod classes;
mod questions;
mod submissions;

use crate::config::DatabaseConfig;
use crate::errors::{ClassworkError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassworkError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool_options = if in_memory {
            // 内存数据库只存在于单个连接中，连接不能被回收
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");

            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| ClassworkError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassworkError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassworkError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    answers::entities::Answer,
    assignments::{
        entities::{Assignment, NewAssignment},
        responses::SubmissionCounts,
    },
    classes::{entities::Class, requests::CreateClassRequest},
    questions::entities::{NewQuestion, Question},
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::AnswerRequest,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班级模块
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(teacher_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    // 作业模块
    async fn create_assignment_with_questions(
        &self,
        assignment: NewAssignment,
        questions: Vec<NewQuestion>,
    ) -> Result<(Assignment, Vec<Question>)> {
        self.create_assignment_with_questions_impl(assignment, questions)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn save_assignment(&self, assignment: &Assignment) -> Result<Assignment> {
        self.save_assignment_impl(assignment).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn count_submissions_by_status(&self, assignment_id: i64) -> Result<SubmissionCounts> {
        self.count_submissions_by_status_impl(assignment_id).await
    }

    async fn list_graded_scores(&self, assignment_id: i64) -> Result<Vec<i32>> {
        self.list_graded_scores_impl(assignment_id).await
    }

    // 题目模块
    async fn create_question(
        &self,
        assignment_id: i64,
        question: NewQuestion,
    ) -> Result<Question> {
        self.create_question_impl(assignment_id, question).await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn save_question(&self, question: &Question) -> Result<Question> {
        self.save_question_impl(question).await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    async fn list_questions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Question>> {
        self.list_questions_by_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        requested: SubmissionStatus,
        answers: &[AnswerRequest],
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, requested, answers)
            .await
    }

    async fn submit_draft(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.submit_draft_impl(submission_id).await
    }

    async fn save_auto_grade(
        &self,
        submission_id: i64,
        answers: &[Answer],
    ) -> Result<Option<Submission>> {
        self.save_auto_grade_impl(submission_id, answers).await
    }

    async fn save_graded_submission(
        &self,
        submission: &Submission,
        answers: &[Answer],
    ) -> Result<Submission> {
        self.save_graded_submission_impl(submission, answers).await
    }

    // 答案模块
    async fn list_answers_by_submission(&self, submission_id: i64) -> Result<Vec<Answer>> {
        self.list_answers_by_submission_impl(submission_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("classwork.db").unwrap(),
            "sqlite://classwork.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
