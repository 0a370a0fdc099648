use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use exam_core::model::{
    Chapter, Course, CourseId, Exam, ExamOutcome, PaymentMethod, Question,
};

use crate::checkout::PurchaseOrder;
use crate::error::ApiError;
use crate::session::SubmissionPayload;

/// Connection settings for the remote exam API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url,
            token: token.into(),
        }
    }

    /// Read the configuration from `EXAM_API_BASE_URL` / `EXAM_API_TOKEN`.
    /// Returns `None` when either is missing or unusable.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let token = env::var("EXAM_API_TOKEN").ok()?;
        if token.trim().is_empty() {
            return None;
        }
        let base_url = env::var("EXAM_API_BASE_URL").ok()?;
        let base_url = Url::parse(&base_url).ok()?;
        Some(Self { base_url, token })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// Grading response: the outcome plus the chapters the backend recommends
/// buying. The field name preserves the API's own spelling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradeReport {
    #[serde(flatten)]
    pub outcome: ExamOutcome,
    #[serde(default, rename = "recommanditions")]
    pub recommendations: Vec<Chapter>,
}

/// Receipt for a chapter purchase; gateway payments carry a redirect link.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub payment_link: Option<Url>,
}

/// The remote endpoints this front end depends on. Everything behind this
/// trait is owned by the backend; the session controller never calls the
/// network itself.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Courses that currently offer a diagnostic exam.
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;

    /// Fetch the exam for a course.
    async fn fetch_exam(&self, course_id: CourseId) -> Result<Exam, ApiError>;

    /// Hand the submission to the grading backend.
    async fn grade_exam(&self, payload: &SubmissionPayload) -> Result<GradeReport, ApiError>;

    /// Payment methods offered at checkout.
    async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError>;

    /// Purchase the chapters in a checked-out order.
    async fn buy_chapters(&self, order: &PurchaseOrder) -> Result<PurchaseReceipt, ApiError>;
}

//
// ─── HTTP CLIENT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Deserialize)]
struct CourseListResponse {
    #[serde(default)]
    courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ExamResponse {
    #[serde(default)]
    exam: Vec<Question>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PaymentMethodsResponse {
    #[serde(default)]
    payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Serialize)]
struct GradeRequest<'a> {
    exam_id: u64,
    answers: &'a [String],
    timer: &'a str,
}

/// Bearer-token client for the hosted exam API.
#[derive(Clone)]
pub struct HttpExamApi {
    client: Client,
    config: ApiConfig,
}

impl HttpExamApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.config.endpoint(path))
            .bearer_auth(&self.config.token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let body: CourseListResponse = self.get_json("user/dia_exam/lists").await?;
        Ok(body.courses)
    }

    async fn fetch_exam(&self, course_id: CourseId) -> Result<Exam, ApiError> {
        let body: ExamResponse = self
            .get_json(&format!("user/dia_exam/show_exam/{course_id}"))
            .await?;
        Ok(Exam::from_questions(body.exam, course_id)?)
    }

    async fn grade_exam(&self, payload: &SubmissionPayload) -> Result<GradeReport, ApiError> {
        let request = GradeRequest {
            exam_id: payload.exam_id.value(),
            answers: &payload.answers,
            timer: &payload.timer,
        };
        self.post_json("user/dia_exam/grade_exam", &request).await
    }

    async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        let body: PaymentMethodsResponse = self.get_json("user/payment_methods_list").await?;
        // The wallet is always offered, ahead of the gateway methods.
        let mut methods = vec![PaymentMethod::wallet()];
        methods.extend(body.payment_methods);
        Ok(methods)
    }

    async fn buy_chapters(&self, order: &PurchaseOrder) -> Result<PurchaseReceipt, ApiError> {
        self.post_json("user/courses/buy_chapters", order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ApiConfig::new(Url::parse("https://api.example.com/v1/").unwrap(), "t");
        assert_eq!(
            config.endpoint("user/dia_exam/lists"),
            "https://api.example.com/v1/user/dia_exam/lists"
        );
    }

    #[test]
    fn grade_report_parses_recommendations() {
        let json = r#"{
            "score": 500.0,
            "pass_score": 400.0,
            "right_question": 10,
            "total_question": 20,
            "recommanditions": [
                {"id": 1, "chapter_name": "Algebra", "price": [{"duration": 30, "price": 10.0}]}
            ]
        }"#;
        let report: GradeReport = serde_json::from_str(json).unwrap();
        assert!(report.outcome.passed());
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].name(), "Algebra");
    }

    #[test]
    fn grade_report_without_recommendations() {
        let report: GradeReport = serde_json::from_str(r#"{"score": 1.0}"#).unwrap();
        assert!(report.recommendations.is_empty());
    }
}
