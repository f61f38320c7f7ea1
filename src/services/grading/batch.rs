use tracing::{info, warn};

use super::GradingService;
use crate::errors::Result;
use crate::models::grading::{
    requests::BatchGradeRequest,
    responses::{BatchGradeResponse, BatchGradeResult},
};

/// 逐项顺序批改，每一项是独立的写入单元
pub async fn batch_grade(
    service: &GradingService,
    req: BatchGradeRequest,
    teacher_id: i64,
) -> Result<BatchGradeResponse> {
    let mut results = Vec::with_capacity(req.submissions.len());

    for item in req.submissions {
        let (submission_id, request) = item.into_request();
        match service
            .grade_submission(submission_id, request, teacher_id)
            .await
        {
            Ok(_) => results.push(BatchGradeResult {
                submission_id,
                success: true,
                error: None,
            }),
            Err(e) => {
                warn!("Batch grading failed for submission {}: {}", submission_id, e);
                results.push(BatchGradeResult {
                    submission_id,
                    success: false,
                    error: Some(e.message().to_string()),
                });
            }
        }
    }

    let success_count = results.iter().filter(|r| r.success).count();
    let failed_count = results.len() - success_count;

    info!(
        "Batch grading by teacher {}: {} succeeded, {} failed",
        teacher_id, success_count, failed_count
    );

    Ok(BatchGradeResponse {
        results,
        success_count,
        failed_count,
    })
}
