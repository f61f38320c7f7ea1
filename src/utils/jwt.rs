use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::{CurrentUser, UserRole};

const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，这里只签发 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    /// 解析出调用者身份
    pub fn current_user(&self) -> Result<CurrentUser, jsonwebtoken::errors::Error> {
        let id = self
            .sub
            .parse::<i64>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidSubject)?;
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Ok(CurrentUser { id, role })
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: UserRole,
        secret: &str,
        expiry_minutes: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(
            user_id,
            &role.to_string(),
            ACCESS_TOKEN_TYPE,
            secret,
            chrono::Duration::minutes(expiry_minutes),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        user_id: i64,
        role: &str,
        token_type: &str,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token, secret)?;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_access_token_roundtrip() {
        let token = JwtUtils::generate_access_token(42, UserRole::Teacher, SECRET, 5).unwrap();
        let claims = JwtUtils::verify_access_token(&token, SECRET).unwrap();
        assert_eq!(
            claims.current_user().unwrap(),
            CurrentUser {
                id: 42,
                role: UserRole::Teacher
            }
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::generate_access_token(1, UserRole::Student, SECRET, 5).unwrap();
        assert!(JwtUtils::verify_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            "student",
            "access",
            SECRET,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_refresh_token_type_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            "student",
            "refresh",
            SECRET,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            "admin",
            "access",
            SECRET,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify_access_token(&token, SECRET).unwrap();
        assert!(claims.current_user().is_err());
    }
}
