//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub organization: String,
    /// `DD/MM/YYYY`
    pub date_of_birth: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub manager_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub hash: String,
    /// Only present when the server echoes codes (development)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<u32>,
    pub message: String,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `login/phone` and `resendotp`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    pub phone_number: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<u32>,
    pub message: String,
}

// ============================================================================
// OTP Verification
// ============================================================================

/// Clients send the code either as a JSON number or as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OtpCode {
    Number(u64),
    Text(String),
}

impl OtpCode {
    pub fn into_text(self) -> String {
        match self {
            OtpCode::Number(n) => n.to_string(),
            OtpCode::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: OtpCode,
    pub hash: String,
}

// ============================================================================
// Users
// ============================================================================

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub organization: String,
    pub date_of_birth: String,
    pub role: UserRole,
    pub manager_id: Option<UserId>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.to_string(),
            email: user.email.to_string(),
            phone_number: user.phone_number.to_string(),
            organization: user.organization.to_string(),
            date_of_birth: user.date_of_birth.to_string(),
            role: user.role,
            manager_id: user.manager_id,
            verified: user.verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_code_accepts_number_and_string() {
        let req: VerifyOtpRequest = serde_json::from_str(
            r#"{"phoneNumber":"+15551234567","otp":12345,"hash":"h.1"}"#,
        )
        .unwrap();
        assert_eq!(req.otp.into_text(), "12345");

        let req: VerifyOtpRequest = serde_json::from_str(
            r#"{"phoneNumber":"+15551234567","otp":"54321","hash":"h.1"}"#,
        )
        .unwrap();
        assert_eq!(req.otp.into_text(), "54321");
    }

    #[test]
    fn test_register_request_optional_fields() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phoneNumber": "+15551234567",
                "organization": "Acme",
                "dateOfBirth": "10/12/1990",
                "password": "Str0ng!Pass",
                "passwordConfirm": "Str0ng!Pass"
            }"#,
        )
        .unwrap();
        assert!(req.role.is_none());
        assert!(req.manager_id.is_none());
    }

    #[test]
    fn test_otp_omitted_when_not_exposed() {
        let body = OtpSentResponse {
            phone_number: "+15551234567".into(),
            hash: "h.1".into(),
            otp: None,
            message: "sent".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("otp").is_none());
        assert_eq!(json["phoneNumber"], "+15551234567");
    }
}
