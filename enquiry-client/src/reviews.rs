use chrono::Utc;
use common::models::{AverageCounts, DashboardReviews, ReviewInput, ReviewItem};
use thiserror::Error;
use tracing::info;

use crate::http::{ApiClient, HttpError};

const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Please enter your name and review text.")]
    MissingInfo,
}

/// Mean rating rounded to one decimal; zero for an empty list.
pub fn average_rating(reviews: &[ReviewItem]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Parses a user-typed rating, clamped to 1..=5. Unparseable input means 5.
pub fn parse_rating(input: &str) -> u8 {
    let input = input.trim();
    if input.is_empty() {
        return DEFAULT_RATING;
    }
    match input.parse::<i64>() {
        Ok(n) => n.clamp(1, 5) as u8,
        Err(_) => DEFAULT_RATING,
    }
}

/// Session-local testimonial list, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewBook {
    reviews: Vec<ReviewItem>,
}

impl ReviewBook {
    pub fn new(reviews: Vec<ReviewItem>) -> Self {
        ReviewBook { reviews }
    }

    pub fn reviews(&self) -> &[ReviewItem] {
        &self.reviews
    }

    pub fn average(&self) -> f64 {
        average_rating(&self.reviews)
    }

    pub fn add_local(
        &mut self,
        name: &str,
        text: &str,
        rating: &str,
    ) -> Result<&ReviewItem, ReviewError> {
        let (name, text) = (name.trim(), text.trim());
        if name.is_empty() || text.is_empty() {
            return Err(ReviewError::MissingInfo);
        }

        let now = Utc::now();
        let item = ReviewItem {
            id: format!("r{}", now.timestamp_millis()),
            name: name.to_string(),
            text: text.to_string(),
            rating: parse_rating(rating),
            location: None,
            product: None,
            date: Some(now.to_rfc3339()),
        };
        self.reviews.insert(0, item);
        Ok(&self.reviews[0])
    }
}

pub async fn create_review(api: &ApiClient, input: &ReviewInput) -> Result<ReviewItem, HttpError> {
    info!("Posting review from {}", input.name);
    api.post("reviews", input).await
}

pub async fn all_reviews(api: &ApiClient) -> Result<Vec<ReviewItem>, HttpError> {
    api.get("reviews").await
}

pub async fn average_counts(api: &ApiClient) -> Result<AverageCounts, HttpError> {
    // Path spelling is the backend's.
    api.get("reviews/avarageCounts").await
}

pub async fn dashboard_reviews(
    api: &ApiClient,
    limit: Option<u32>,
) -> Result<DashboardReviews, HttpError> {
    let limit = limit.unwrap_or(3).to_string();
    api.get(&format!(
        "reviews/getReviews?limit={}",
        urlencoding::encode(&limit)
    ))
    .await
}
