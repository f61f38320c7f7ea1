#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_classwork::cache::{MokaCacheWrapper, ObjectCache};
use rust_classwork::config::{CacheConfig, DatabaseConfig};
use rust_classwork::models::assignments::{
    entities::Assignment, requests::CreateAssignmentRequest, responses::AssignmentDetail,
};
use rust_classwork::models::classes::requests::CreateClassRequest;
use rust_classwork::models::questions::{
    entities::{QuestionOption, QuestionType},
    requests::CreateQuestionRequest,
};
use rust_classwork::models::users::entities::{CurrentUser, UserRole};
use rust_classwork::services::{
    AssignmentService, ClassService, GradingService, QuestionService, SubmissionService,
};
use rust_classwork::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub const TEACHER: i64 = 10;
pub const OTHER_TEACHER: i64 = 11;
pub const STUDENT: i64 = 100;
pub const OTHER_STUDENT: i64 = 101;

pub struct TestApp {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub classes: ClassService,
    pub assignments: AssignmentService,
    pub questions: QuestionService,
    pub submissions: SubmissionService,
    pub grading: GradingService,
}

impl TestApp {
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("connect in-memory database");
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&CacheConfig::default()));

        Self {
            classes: ClassService::new(storage.clone()),
            assignments: AssignmentService::new(storage.clone(), cache.clone()),
            questions: QuestionService::new(storage.clone(), cache.clone()),
            submissions: SubmissionService::new(storage.clone(), cache.clone()),
            grading: GradingService::new(storage.clone(), cache.clone()),
            storage,
            cache,
        }
    }

    pub async fn create_class(&self) -> i64 {
        self.classes
            .create_class(
                TEACHER,
                CreateClassRequest {
                    class_name: "Rust 程序设计".to_string(),
                    description: None,
                },
            )
            .await
            .expect("create class")
            .id
    }

    /// 创建含单选、多选、判断、填空、简答各一题的草稿作业
    pub async fn create_draft(&self) -> AssignmentDetail {
        let class_id = self.create_class().await;
        self.assignments
            .create_assignment(
                TEACHER,
                CreateAssignmentRequest {
                    class_id,
                    title: "第一次作业".to_string(),
                    description: Some("基础练习".to_string()),
                    deadline: Utc::now() + Duration::days(7),
                    total_score: Some(50),
                    questions: sample_questions(),
                },
            )
            .await
            .expect("create assignment")
    }

    pub async fn create_published(&self) -> AssignmentDetail {
        let mut detail = self.create_draft().await;
        detail.assignment = self
            .assignments
            .publish_assignment(detail.assignment.id, TEACHER)
            .await
            .expect("publish assignment");
        detail
    }

    /// 直接在存储层把截止时间改到过去
    pub async fn expire(&self, assignment: &Assignment) {
        let mut expired = assignment.clone();
        expired.deadline = Utc::now() - Duration::hours(1);
        self.storage
            .save_assignment(&expired)
            .await
            .expect("expire assignment");
    }
}

pub fn teacher() -> CurrentUser {
    CurrentUser {
        id: TEACHER,
        role: UserRole::Teacher,
    }
}

pub fn student() -> CurrentUser {
    CurrentUser {
        id: STUDENT,
        role: UserRole::Student,
    }
}

fn options(keys: &[&str]) -> Vec<QuestionOption> {
    keys.iter()
        .map(|key| QuestionOption {
            key: key.to_string(),
            value: format!("选项 {key}"),
        })
        .collect()
}

pub fn question(question_type: QuestionType, order: i32, answer: Option<&str>) -> CreateQuestionRequest {
    CreateQuestionRequest {
        question_type,
        content: format!("第 {order} 题"),
        score: 10,
        order,
        options: if question_type == QuestionType::Choice {
            options(&["A", "B", "C", "D"])
        } else {
            Vec::new()
        },
        correct_answer: answer.map(str::to_string),
        is_multiple: false,
        reference: None,
        explanation: None,
    }
}

pub fn sample_questions() -> Vec<CreateQuestionRequest> {
    vec![
        question(QuestionType::Choice, 1, Some("B")),
        question(QuestionType::Choice, 2, Some(r#"["A","C"]"#)),
        question(QuestionType::TrueFalse, 3, Some("true")),
        question(QuestionType::FillBlank, 4, Some("ownership")),
        question(QuestionType::Essay, 5, None),
    ]
}
