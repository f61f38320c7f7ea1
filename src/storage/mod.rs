use std::sync::Arc;

use crate::config::AppConfig;
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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;

    /// 作业管理方法
    // 在同一事务中创建作业及其题目
    async fn create_assignment_with_questions(
        &self,
        assignment: NewAssignment,
        questions: Vec<NewQuestion>,
    ) -> Result<(Assignment, Vec<Question>)>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 保存作业的可变字段
    async fn save_assignment(&self, assignment: &Assignment) -> Result<Assignment>;
    // 删除作业及其题目、提交和答案
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 按状态统计作业的提交数量
    async fn count_submissions_by_status(&self, assignment_id: i64) -> Result<SubmissionCounts>;
    // 列出作业下已批改提交的总分
    async fn list_graded_scores(&self, assignment_id: i64) -> Result<Vec<i32>>;

    /// 题目管理方法
    // 创建题目
    async fn create_question(&self, assignment_id: i64, question: NewQuestion)
    -> Result<Question>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 保存题目的可变字段
    async fn save_question(&self, question: &Question) -> Result<Question>;
    // 删除题目及其答案
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
    // 按显示顺序列出作业的题目
    async fn list_questions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Question>>;

    /// 提交管理方法
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学生在某作业下的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 在同一事务中查找或创建提交、校验状态迁移并按题目合并答案
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        requested: SubmissionStatus,
        answers: &[AnswerRequest],
    ) -> Result<Submission>;
    // 仅当提交仍为草稿时改为已提交，否则返回 None
    async fn submit_draft(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 在同一事务中写入客观题判分并只更新总分，已批改的提交返回 None
    async fn save_auto_grade(
        &self,
        submission_id: i64,
        answers: &[Answer],
    ) -> Result<Option<Submission>>;
    // 在同一事务中保存批改结果（提交和答案），仅对已提交状态生效
    async fn save_graded_submission(
        &self,
        submission: &Submission,
        answers: &[Answer],
    ) -> Result<Submission>;

    /// 答案管理方法
    // 列出提交的全部答案
    async fn list_answers_by_submission(&self, submission_id: i64) -> Result<Vec<Answer>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    let storage = sea_orm_storage::SeaOrmStorage::connect(&config.database).await?;
    Ok(Arc::new(storage))
}
