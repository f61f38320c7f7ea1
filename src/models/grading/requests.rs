use serde::Deserialize;
use ts_rs::TS;

// 单题批改
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradeAnswerRequest {
    pub question_id: i64,
    pub score: i32,
    pub feedback: Option<String>,
}

// 批改一份提交
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradeSubmissionRequest {
    #[serde(default)]
    pub answers: Vec<GradeAnswerRequest>,
    pub overall_feedback: Option<String>,
}

// 批量批改中的一项
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct BatchGradeItem {
    pub submission_id: i64,
    #[serde(default)]
    pub answers: Vec<GradeAnswerRequest>,
    pub overall_feedback: Option<String>,
}

impl BatchGradeItem {
    pub fn into_request(self) -> (i64, GradeSubmissionRequest) {
        (
            self.submission_id,
            GradeSubmissionRequest {
                answers: self.answers,
                overall_feedback: self.overall_feedback,
            },
        )
    }
}

// 批量批改请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct BatchGradeRequest {
    pub submissions: Vec<BatchGradeItem>,
}
