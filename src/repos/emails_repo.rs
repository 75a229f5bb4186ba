use async_trait::async_trait;
use reqwest::{Client, Error};
use serde::Serialize;

/// Sends mail through the Postmark HTTP API.
#[derive(Default)]
pub struct PostmarkEmailsRepo {
    pub client: Client,
    pub api_key: String,
    pub postmark_api_base: String,
    pub sender_email: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EmailMessage {
    from: String,
    to: String,
    subject: String,
    html_body: String,
}

#[async_trait]
pub trait EmailsRepo: Send + Sync {
    async fn send_email(&self, to: String, subject: String, html_body: String)
        -> Result<(), Error>;
}

#[async_trait]
impl EmailsRepo for PostmarkEmailsRepo {
    async fn send_email(
        &self,
        to: String,
        subject: String,
        html_body: String,
    ) -> Result<(), Error> {
        let message = EmailMessage {
            from: self.sender_email.clone(),
            to,
            subject,
            html_body,
        };
        let resp = self
            .client
            .post(format!(
                "{}/email",
                self.postmark_api_base.trim_end_matches('/')
            ))
            .header("X-Postmark-Server-Token", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&message)
            .send()
            .await?;
        resp.error_for_status().map(|_| ())
    }
}
