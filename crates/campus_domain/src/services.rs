use crate::{
    Applicant, Application, AuthToken, Billing, ChatRequest, ChatResponse, NewPosting, Posting,
    UserProfile,
};

/// Transport for the assistant endpoint.
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse>;
}

/// REST collaborators the client reads and writes outside of chat.
#[async_trait::async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthToken>;
    async fn me(&self) -> anyhow::Result<UserProfile>;
    async fn my_applications(&self) -> anyhow::Result<Vec<Application>>;
    async fn posting(&self, id: u64) -> anyhow::Result<Posting>;
    async fn posting_applicants(&self, posting_id: u64) -> anyhow::Result<Vec<Applicant>>;
    async fn create_posting(&self, posting: &NewPosting) -> anyhow::Result<()>;
    /// Approves or rejects one application to a company's posting.
    async fn update_application_status(
        &self,
        application_id: u64,
        approve: bool,
    ) -> anyhow::Result<()>;
    async fn my_billings(&self) -> anyhow::Result<Vec<Billing>>;
    async fn billing(&self, id: u64) -> anyhow::Result<Billing>;
    async fn students(&self) -> anyhow::Result<Vec<UserProfile>>;
    async fn decide_student_authorization(&self, user_id: u64, approve: bool)
    -> anyhow::Result<()>;
}
