use crate::errors::ClassworkError;

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 业务错误
    ValidationFailed = 2001,
    InvalidState = 2002,
    DeadlineExceeded = 2003,
    PermissionDenied = 2004,
}

impl From<&ClassworkError> for ErrorCode {
    fn from(err: &ClassworkError) -> Self {
        match err {
            ClassworkError::Validation(_) => ErrorCode::ValidationFailed,
            ClassworkError::NotFound(_) => ErrorCode::NotFound,
            ClassworkError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            ClassworkError::InvalidState(_) => ErrorCode::InvalidState,
            ClassworkError::DeadlineExceeded(_) => ErrorCode::DeadlineExceeded,
            ClassworkError::Conflict(_) => ErrorCode::Conflict,
            ClassworkError::Authentication(_) => ErrorCode::Unauthorized,
            ClassworkError::CachePluginNotFound(_)
            | ClassworkError::DatabaseConfig(_)
            | ClassworkError::DatabaseConnection(_)
            | ClassworkError::DatabaseOperation(_)
            | ClassworkError::FileOperation(_)
            | ClassworkError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_codes() {
        assert_eq!(
            ErrorCode::from(&ClassworkError::deadline_exceeded("late")),
            ErrorCode::DeadlineExceeded
        );
        assert_eq!(
            ErrorCode::from(&ClassworkError::invalid_state("x")),
            ErrorCode::InvalidState
        );
        assert_eq!(
            ErrorCode::from(&ClassworkError::database_operation("x")),
            ErrorCode::InternalServerError
        );
        assert_eq!(ErrorCode::Success as i32, 0);
    }
}
