use tracing::info;

use super::ClassService;
use crate::errors::{ClassworkError, Result};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};

pub async fn create_class(
    service: &ClassService,
    teacher_id: i64,
    mut req: CreateClassRequest,
) -> Result<Class> {
    req.class_name = req.class_name.trim().to_string();
    if req.class_name.is_empty() {
        return Err(ClassworkError::validation("class name is required"));
    }

    let class = service.storage.create_class(teacher_id, req).await?;
    info!("Class {} created successfully by {}", class.class_name, teacher_id);
    Ok(class)
}
