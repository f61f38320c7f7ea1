mod common;

use chrono::Duration;
use common::*;
use rust_classwork::errors::ClassworkError;
use rust_classwork::models::assignments::{
    entities::AssignmentStatus,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use rust_classwork::models::questions::{
    entities::{AnswerKey, QuestionType},
    requests::UpdateQuestionRequest,
};
use rust_classwork::models::submissions::{
    entities::SubmissionStatus,
    requests::{AnswerRequest, SaveSubmissionRequest},
};
use rust_classwork::services::questions::cache::load_questions;

#[tokio::test]
async fn test_create_assignment_with_questions() {
    let app = TestApp::new().await;
    let detail = app.create_draft().await;

    assert_eq!(detail.assignment.status, AssignmentStatus::Draft);
    assert_eq!(detail.assignment.teacher_id, TEACHER);
    assert_eq!(detail.assignment.total_score, 50);
    assert_eq!(detail.questions.len(), 5);
    let orders: Vec<i32> = detail.questions.iter().map(|q| q.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    assert!(matches!(
        detail.questions[1].answer_key,
        Some(AnswerKey::KeySet(_))
    ));
}

#[tokio::test]
async fn test_create_assignment_checks_class_owner() {
    let app = TestApp::new().await;
    let class_id = app.create_class().await;

    let req = CreateAssignmentRequest {
        class_id,
        title: "越权作业".to_string(),
        description: None,
        deadline: chrono::Utc::now() + Duration::days(1),
        total_score: None,
        questions: Vec::new(),
    };
    let err = app
        .assignments
        .create_assignment(OTHER_TEACHER, req.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::PermissionDenied(_)));

    let created = app.assignments.create_assignment(TEACHER, req).await.unwrap();
    assert_eq!(created.assignment.total_score, 100);
}

#[tokio::test]
async fn test_duplicate_order_conflicts() {
    let app = TestApp::new().await;
    let detail = app.create_draft().await;

    let err = app
        .questions
        .create_question(
            detail.assignment.id,
            TEACHER,
            question(QuestionType::FillBlank, 3, Some("trait")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::Conflict(_)));

    let created = app
        .questions
        .create_question(
            detail.assignment.id,
            TEACHER,
            question(QuestionType::FillBlank, 6, Some("trait")),
        )
        .await
        .unwrap();
    assert_eq!(created.order, 6);

    let err = app
        .questions
        .update_question(
            created.id,
            TEACHER,
            UpdateQuestionRequest {
                order: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::Conflict(_)));
}

#[tokio::test]
async fn test_published_questions_are_locked() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let question_id = detail.questions[0].id;

    let err = app
        .questions
        .create_question(
            detail.assignment.id,
            TEACHER,
            question(QuestionType::Essay, 9, None),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClassworkError::invalid_state("cannot modify question in published assignment")
    );

    let err = app
        .questions
        .update_question(
            question_id,
            TEACHER,
            UpdateQuestionRequest {
                content: Some("改题".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::InvalidState(_)));

    let err = app
        .questions
        .delete_question(question_id, TEACHER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::InvalidState(_)));
}

#[tokio::test]
async fn test_edit_and_delete_draft_question() {
    let app = TestApp::new().await;
    let detail = app.create_draft().await;
    let question_id = detail.questions[0].id;

    let updated = app
        .questions
        .update_question(
            question_id,
            TEACHER,
            UpdateQuestionRequest {
                correct_answer: Some("D".to_string()),
                score: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.score, 5);
    assert_eq!(updated.answer_key, Some(AnswerKey::SingleKey("D".to_string())));

    let err = app
        .questions
        .update_question(
            question_id,
            TEACHER,
            UpdateQuestionRequest {
                correct_answer: Some("Z".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::Validation(_)));

    let err = app
        .questions
        .delete_question(question_id, OTHER_TEACHER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::PermissionDenied(_)));

    app.questions
        .delete_question(question_id, TEACHER)
        .await
        .unwrap();
    let remaining = app
        .questions
        .list_questions(detail.assignment.id, teacher())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 4);
}

#[tokio::test]
async fn test_students_see_questions_without_keys() {
    let app = TestApp::new().await;
    let draft = app.create_draft().await;

    let err = app
        .questions
        .list_questions(draft.assignment.id, student())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::NotFound(_)));

    let published = app.create_published().await;
    let questions = app
        .questions
        .list_questions(published.assignment.id, student())
        .await
        .unwrap();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| q.answer_key.is_none()));

    let detail = app
        .assignments
        .get_assignment_detail(published.assignment.id, student())
        .await
        .unwrap();
    assert!(detail.submission_counts.is_none());
    assert!(detail.questions.iter().all(|q| q.answer_key.is_none()));

    let detail = app
        .assignments
        .get_assignment_detail(published.assignment.id, teacher())
        .await
        .unwrap();
    assert!(detail.submission_counts.is_some());
    assert!(detail.questions[0].answer_key.is_some());
}

async fn hand_in(app: &TestApp, assignment_id: i64, question_id: i64) {
    app.submissions
        .create_or_update_submission(
            STUDENT,
            SaveSubmissionRequest {
                assignment_id,
                answers: vec![AnswerRequest {
                    question_id,
                    content: "B".to_string(),
                }],
                status: SubmissionStatus::Submitted,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unpublish_and_delete_blocked_by_submissions() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let assignment_id = detail.assignment.id;
    hand_in(&app, assignment_id, detail.questions[0].id).await;

    let err = app
        .assignments
        .unpublish_assignment(assignment_id, TEACHER)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClassworkError::invalid_state("cannot unpublish assignment with submissions")
    );

    let err = app
        .assignments
        .delete_assignment(assignment_id, TEACHER)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClassworkError::invalid_state("cannot delete assignment with submissions")
    );
}

#[tokio::test]
async fn test_unpublish_reopens_editing() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let assignment_id = detail.assignment.id;

    // 先读一次，让题目进入缓存
    app.questions
        .list_questions(assignment_id, student())
        .await
        .unwrap();

    let assignment = app
        .assignments
        .unpublish_assignment(assignment_id, TEACHER)
        .await
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Draft);
    assert!(assignment.published_at.is_none());

    app.questions
        .create_question(
            assignment_id,
            TEACHER,
            question(QuestionType::Essay, 6, None),
        )
        .await
        .unwrap();
    app.assignments
        .publish_assignment(assignment_id, TEACHER)
        .await
        .unwrap();

    let questions = app
        .questions
        .list_questions(assignment_id, student())
        .await
        .unwrap();
    assert_eq!(questions.len(), 6);
}

#[tokio::test]
async fn test_stale_snapshot_does_not_refill_question_cache() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let assignment_id = detail.assignment.id;
    let first_question = detail.questions[0].id;
    let published = detail.assignment.clone();

    app.assignments
        .unpublish_assignment(assignment_id, TEACHER)
        .await
        .unwrap();

    // 撤回前读到的发布快照，题目读取晚于撤回
    let loaded = load_questions(&app.storage, &app.cache, &published)
        .await
        .unwrap();
    assert_eq!(loaded[0].answer_key, Some(AnswerKey::SingleKey("B".to_string())));

    app.questions
        .update_question(
            first_question,
            TEACHER,
            UpdateQuestionRequest {
                correct_answer: Some("A".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.assignments
        .publish_assignment(assignment_id, TEACHER)
        .await
        .unwrap();

    let saved = app
        .submissions
        .create_or_update_submission(
            STUDENT,
            SaveSubmissionRequest {
                assignment_id,
                answers: vec![AnswerRequest {
                    question_id: first_question,
                    content: "A".to_string(),
                }],
                status: SubmissionStatus::Submitted,
            },
        )
        .await
        .unwrap();
    let answer = &saved.answers[0];
    assert_eq!(answer.is_correct, Some(true));
    assert_eq!(answer.score, 10);
    assert_eq!(saved.submission.score, 10);
}

#[tokio::test]
async fn test_close_and_delete() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let assignment_id = detail.assignment.id;

    let closed = app
        .assignments
        .close_assignment(assignment_id, TEACHER)
        .await
        .unwrap();
    assert_eq!(closed.status, AssignmentStatus::Closed);

    let err = app
        .submissions
        .create_or_update_submission(
            STUDENT,
            SaveSubmissionRequest {
                assignment_id,
                answers: Vec::new(),
                status: SubmissionStatus::Draft,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::InvalidState(_)));

    let err = app
        .assignments
        .publish_assignment(assignment_id, TEACHER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::InvalidState(_)));

    app.assignments
        .delete_assignment(assignment_id, TEACHER)
        .await
        .unwrap();
    let err = app
        .assignments
        .get_assignment_detail(assignment_id, teacher())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::NotFound(_)));
}

#[tokio::test]
async fn test_deadline_can_only_be_extended_after_publish() {
    let app = TestApp::new().await;
    let detail = app.create_published().await;
    let assignment_id = detail.assignment.id;
    let deadline = detail.assignment.deadline;

    let err = app
        .assignments
        .update_assignment(
            assignment_id,
            TEACHER,
            UpdateAssignmentRequest {
                deadline: Some(deadline - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClassworkError::invalid_state("cannot shorten deadline for published assignment")
    );

    let updated = app
        .assignments
        .update_assignment(
            assignment_id,
            TEACHER,
            UpdateAssignmentRequest {
                deadline: Some(deadline + Duration::days(1)),
                title: Some("第一次作业（延期）".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.deadline > deadline);
    assert_eq!(updated.title, "第一次作业（延期）");

    let err = app
        .assignments
        .update_assignment(
            assignment_id,
            OTHER_TEACHER,
            UpdateAssignmentRequest::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassworkError::PermissionDenied(_)));
}
