use super::ClassService;
use crate::errors::{ClassworkError, Result};
use crate::models::classes::entities::Class;

pub async fn get_class(service: &ClassService, class_id: i64, teacher_id: i64) -> Result<Class> {
    let class = service
        .storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("class not found"))?;

    if class.teacher_id != teacher_id {
        return Err(ClassworkError::permission_denied(
            "teacher has no permission on this class",
        ));
    }

    Ok(class)
}
