pub mod create;
pub mod get;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::storage::Storage;

pub struct ClassService {
    storage: Arc<dyn Storage>,
}

impl ClassService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 创建班级，创建者即班级教师
    pub async fn create_class(&self, teacher_id: i64, req: CreateClassRequest) -> Result<Class> {
        create::create_class(self, teacher_id, req).await
    }

    // 获取教师自己的班级
    pub async fn get_class(&self, class_id: i64, teacher_id: i64) -> Result<Class> {
        get::get_class(self, class_id, teacher_id).await
    }
}
