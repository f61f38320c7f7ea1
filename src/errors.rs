//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务错误（NotFound / PermissionDenied / InvalidState / DeadlineExceeded / Validation）
//! 由路由层按类型映射为 HTTP 状态码，从不按消息文本匹配。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classwork_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ClassworkError {
            $($variant(String),)*
        }

        impl ClassworkError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassworkError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassworkError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassworkError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassworkError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassworkError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classwork_errors! {
    CachePluginNotFound("E001", "Cache Plugin Not Found"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Serialization("E006", "Serialization Error"),
    Authentication("E007", "Authentication Error"),
    Validation("E101", "Validation Error"),
    NotFound("E102", "Resource Not Found"),
    PermissionDenied("E103", "Permission Denied"),
    InvalidState("E104", "Invalid State"),
    DeadlineExceeded("E105", "Deadline Exceeded"),
    Conflict("E106", "Conflict"),
}

impl ClassworkError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为业务层错误（调用方可见，不属于基础设施故障）
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            ClassworkError::Validation(_)
                | ClassworkError::NotFound(_)
                | ClassworkError::PermissionDenied(_)
                | ClassworkError::InvalidState(_)
                | ClassworkError::DeadlineExceeded(_)
                | ClassworkError::Conflict(_)
        )
    }
}

impl fmt::Display for ClassworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassworkError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassworkError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                ClassworkError::Conflict(msg)
            }
            _ => ClassworkError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ClassworkError {
    fn from(err: std::io::Error) -> Self {
        ClassworkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassworkError {
    fn from(err: serde_json::Error) -> Self {
        ClassworkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassworkError::database_config("test").code(), "E002");
        assert_eq!(ClassworkError::validation("test").code(), "E101");
        assert_eq!(ClassworkError::invalid_state("test").code(), "E104");
        assert_eq!(ClassworkError::deadline_exceeded("test").code(), "E105");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassworkError::permission_denied("test").error_type(),
            "Permission Denied"
        );
        assert_eq!(
            ClassworkError::not_found("test").error_type(),
            "Resource Not Found"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassworkError::invalid_state("assignment already submitted");
        assert_eq!(err.message(), "assignment already submitted");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassworkError::validation("question has no correct answer");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("question has no correct answer"));
    }

    #[test]
    fn test_domain_errors() {
        assert!(ClassworkError::not_found("x").is_domain());
        assert!(ClassworkError::conflict("x").is_domain());
        assert!(!ClassworkError::database_operation("x").is_domain());
        assert!(!ClassworkError::serialization("x").is_domain());
    }

    #[test]
    fn test_from_serde_error() {
        let err: ClassworkError = serde_json::from_str::<Vec<String>>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E006");
    }
}
