//! Reviews and catering inquiries

use crate::error::{AppError, AppResult, ErrorCode};
use crate::order::types::is_plausible_email;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MAX_COMMENT_LEN: usize = 2000;

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewCreate {
    pub order_id: i64,
    /// 1..=5
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewCreate {
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Rating must be between 1 and 5",
            )
            .with_detail("field", "rating"));
        }
        if self
            .comment
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN)
        {
            return Err(AppError::validation("Comment is too long").with_detail("field", "comment"));
        }
        Ok(())
    }
}

/// Review record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(alias = "review_id")]
    pub id: i64,
    pub order_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Catering inquiry payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InquiryCreate {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    pub message: String,
}

impl InquiryCreate {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::with_message(ErrorCode::RequiredField, "Name is required")
                .with_detail("field", "name"));
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(AppError::validation("Email address is invalid")
                .with_detail("field", "email"));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::with_message(ErrorCode::RequiredField, "Message is required")
                .with_detail("field", "message"));
        }
        if self.guest_count == Some(0) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Guest count must be positive",
            )
            .with_detail("field", "guest_count"));
        }
        Ok(())
    }
}

/// Inquiry record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    #[serde(alias = "inquiry_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub guest_count: Option<u32>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
