use actix_web::web;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{ObjectCache, create_object_cache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{
    AssignmentService, ClassService, GradingService, QuestionService, SubmissionService,
};
use crate::storage::Storage;

/// 注入到 actix 的业务服务，存储和缓存通过构造函数传入
#[derive(Clone)]
pub struct AppServices {
    pub classes: web::Data<ClassService>,
    pub assignments: web::Data<AssignmentService>,
    pub questions: web::Data<QuestionService>,
    pub submissions: web::Data<SubmissionService>,
    pub grading: web::Data<GradingService>,
}

impl AppServices {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self {
            classes: web::Data::new(ClassService::new(storage.clone())),
            assignments: web::Data::new(AssignmentService::new(storage.clone(), cache.clone())),
            questions: web::Data::new(QuestionService::new(storage.clone(), cache.clone())),
            submissions: web::Data::new(SubmissionService::new(storage.clone(), cache.clone())),
            grading: web::Data::new(GradingService::new(storage, cache)),
        }
    }

    /// 注册为 app data，供路由处理程序提取
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.classes.clone())
            .app_data(self.assignments.clone())
            .app_data(self.questions.clone())
            .app_data(self.submissions.clone())
            .app_data(self.grading.clone());
    }
}

pub struct StartupContext {
    pub services: AppServices,
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和业务服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    warn!("Attempting to create {} cache backend", config.cache.cache_type);
    let cache = create_object_cache(&config.cache)?;
    warn!("Cache backend initialized");

    let services = AppServices::new(storage, cache);
    debug!("Business services constructed");

    Ok(StartupContext { services })
}
