//! Reviews and inquiries

use crate::{ClientResult, HttpClient};
use shared::models::{Inquiry, InquiryCreate, Review, ReviewCreate};

impl HttpClient {
    /// Validated locally before sending
    pub async fn submit_review(&self, review: &ReviewCreate) -> ClientResult<Review> {
        review.validate()?;
        self.post("review/create", review).await
    }

    pub async fn reviews(&self) -> ClientResult<Vec<Review>> {
        self.get("review/").await
    }

    /// Validated locally before sending
    pub async fn submit_inquiry(&self, inquiry: &InquiryCreate) -> ClientResult<Inquiry> {
        inquiry.validate()?;
        self.post("inquiry/create", inquiry).await
    }

    pub async fn inquiries(&self) -> ClientResult<Vec<Inquiry>> {
        self.get("inquiry/").await
    }
}
