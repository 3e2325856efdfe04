use crate::{
    entities::contact_me::{
        ContactAttachment, ContactForm, ContactMessage, ContactMessageListResponse, ContactResponse,
        ContactSubmission,
    },
    errors::AppError,
    mail::{Mailer, OutgoingEmail},
    repositories::contact_me::ContactMessageRepository,
    settings::AppConfig,
    utils::{markdown::escape_html, valid_uuid::valid_uuid},
};

/// Addresses and limits used when relaying contact submissions.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub to_email: String,
    pub from_email: String,
    pub site_owner: String,
    pub max_attachment_bytes: usize,
}

impl From<&AppConfig> for ContactSettings {
    fn from(config: &AppConfig) -> Self {
        ContactSettings {
            to_email: config.contact_to_email.clone(),
            from_email: config.contact_from_email.clone(),
            site_owner: config.site_owner.clone(),
            max_attachment_bytes: config.contact_max_attachment_bytes,
        }
    }
}

pub struct ContactHandler<M, R>
where
    M: Mailer,
    R: ContactMessageRepository,
{
    pub mailer: M,
    pub contact_repo: R,
    pub settings: ContactSettings,
}

impl<M, R> ContactHandler<M, R>
where
    M: Mailer,
    R: ContactMessageRepository,
{
    pub fn new(mailer: M, contact_repo: R, settings: ContactSettings) -> Self {
        ContactHandler { mailer, contact_repo, settings }
    }

    /// Validates a submission, notifies the site owner and acknowledges the sender
    pub async fn submit(
        &self,
        form: ContactForm,
        attachment: Option<ContactAttachment>,
    ) -> Result<ContactResponse, AppError> {
        let submission = form.into_submission(attachment)?;

        if let Some(file) = &submission.attachment {
            if file.size() > self.settings.max_attachment_bytes {
                return Err(AppError::InvalidInput(format!(
                    "File size must be less than {}",
                    human_size(self.settings.max_attachment_bytes)
                )));
            }
        }

        let notification = self.notification_email(&submission);
        let notification_id = match self.mailer.send(&notification).await {
            Ok(id) => id,
            Err(e) => {
                self.contact_repo.save(ContactMessage::record(&submission, false)).await?;
                return Err(e.into());
            }
        };

        self.contact_repo.save(ContactMessage::record(&submission, true)).await?;

        let auto_responder_id = match self.mailer.send(&self.auto_reply_email(&submission)).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Auto-reply to {} failed: {}", submission.email, e);
                None
            }
        };

        tracing::info!("Relayed contact message from {}", submission.email);
        Ok(ContactResponse {
            message: "Email sent successfully".to_string(),
            notification_id,
            auto_responder_id,
        })
    }

    pub async fn list_messages(&self) -> Result<ContactMessageListResponse, AppError> {
        let messages = self.contact_repo.list().await?;
        let unread = messages.iter().filter(|m| !m.read).count();

        Ok(ContactMessageListResponse {
            total: messages.len(),
            unread,
            messages,
        })
    }

    pub async fn mark_read(&self, id: &str) -> Result<ContactMessage, AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.mark_read(&valid_id).await
    }

    pub async fn delete_message(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.delete(&valid_id).await
    }

    fn notification_email(&self, submission: &ContactSubmission) -> OutgoingEmail {
        let attachment_line = submission
            .attachment
            .as_ref()
            .map(|a| format!("<p><strong>Attachment:</strong> {}</p>", escape_html(&a.filename)))
            .unwrap_or_default();

        let html = format!(
            "<h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>{}",
            escape_html(&submission.name),
            escape_html(&submission.email),
            html_paragraph(&submission.message),
            attachment_line,
        );

        OutgoingEmail {
            from: self.settings.from_email.clone(),
            to: vec![self.settings.to_email.clone()],
            subject: format!("New Contact Form Submission from {}", single_line(&submission.name)),
            html,
            reply_to: Some(submission.email.clone()),
            attachments: submission
                .attachment
                .iter()
                .map(ContactAttachment::to_email_attachment)
                .collect(),
        }
    }

    fn auto_reply_email(&self, submission: &ContactSubmission) -> OutgoingEmail {
        let html = format!(
            "<h2>Thank you for reaching out!</h2>\
             <p>Hi {},</p>\
             <p>Thank you for contacting me through my portfolio. I've received your message \
             and will get back to you as soon as possible.</p>\
             <h3>Your Message:</h3>\
             <p>{}</p>\
             <p>Best regards,<br><strong>{}</strong></p>\
             <p style=\"font-size: 12px; color: #666;\">This is an automated response. Please do not reply to this email.</p>",
            escape_html(&submission.name),
            html_paragraph(&submission.message),
            escape_html(&self.settings.site_owner),
        );

        OutgoingEmail {
            from: sender_as(&self.settings.from_email, &self.settings.site_owner),
            to: vec![submission.email.clone()],
            subject: "Thank you for reaching out!".to_string(),
            html,
            reply_to: None,
            attachments: Vec::new(),
        }
    }
}

/// Escapes `text` and keeps its line breaks.
fn html_paragraph(text: &str) -> String {
    text.lines().map(escape_html).collect::<Vec<_>>().join("<br>")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reuses the address of `from` under a different display name.
fn sender_as(from: &str, display_name: &str) -> String {
    let address = match (from.rfind('<'), from.rfind('>')) {
        (Some(start), Some(end)) if start < end => &from[start + 1..end],
        _ => from.trim(),
    };
    format!("{} <{}>", single_line(display_name), address)
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mail::{MailError, MockMailer}, repositories::file_repo::InMemoryContactRepo};

    fn settings() -> ContactSettings {
        ContactSettings {
            to_email: "owner@example.com".into(),
            from_email: "Portfolio Contact <onboarding@resend.dev>".into(),
            site_owner: "Jane Doe".into(),
            max_attachment_bytes: 16,
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: Some("<b>Bob</b>".into()),
            email: Some("bob@example.com".into()),
            message: Some("Hello\nthere".into()),
        }
    }

    #[actix_rt::test]
    async fn sends_notification_and_auto_reply() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|email| email.to == vec!["owner@example.com".to_string()])
            .times(1)
            .returning(|email| {
                assert_eq!(email.reply_to.as_deref(), Some("bob@example.com"));
                assert!(!email.html.contains("<b>Bob</b>"));
                assert!(email.html.contains("<br>"));
                Ok("note-1".into())
            });
        mailer
            .expect_send()
            .withf(|email| email.to == vec!["bob@example.com".to_string()])
            .times(1)
            .returning(|email| {
                assert_eq!(email.from, "Jane Doe <onboarding@resend.dev>");
                Ok("reply-1".into())
            });

        let repo = InMemoryContactRepo::new();
        let handler = ContactHandler::new(mailer, repo.clone(), settings());

        let response = handler.submit(form(), None).await.unwrap();
        assert_eq!(response.notification_id, "note-1");
        assert_eq!(response.auto_responder_id.as_deref(), Some("reply-1"));

        let inbox = handler.list_messages().await.unwrap();
        assert_eq!(inbox.total, 1);
        assert_eq!(inbox.unread, 1);
        assert!(inbox.messages[0].delivered);
    }

    #[actix_rt::test]
    async fn auto_reply_failure_is_not_fatal() {
        let mut mailer = MockMailer::new();
        let mut calls = 0;
        mailer.expect_send().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok("note".into())
            } else {
                Err(MailError::Transport("connection reset".into()))
            }
        });

        let handler = ContactHandler::new(mailer, InMemoryContactRepo::new(), settings());
        let response = handler.submit(form(), None).await.unwrap();
        assert_eq!(response.auto_responder_id, None);
    }

    #[actix_rt::test]
    async fn notification_failure_is_reported_and_recorded() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::Rejected { status: 422, body: "bad".into() }));

        let handler = ContactHandler::new(mailer, InMemoryContactRepo::new(), settings());
        assert!(matches!(handler.submit(form(), None).await, Err(AppError::EmailDelivery(_))));

        let inbox = handler.list_messages().await.unwrap();
        assert_eq!(inbox.total, 1);
        assert!(!inbox.messages[0].delivered);
    }

    #[actix_rt::test]
    async fn oversized_attachment_is_rejected_before_sending() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().never();

        let handler = ContactHandler::new(mailer, InMemoryContactRepo::new(), settings());
        let big = ContactAttachment::new("big.txt", Some("text/plain"), vec![b'a'; 17]);

        assert!(matches!(handler.submit(form(), Some(big)).await, Err(AppError::InvalidInput(_))));
        assert_eq!(handler.list_messages().await.unwrap().total, 0);
    }

    #[actix_rt::test]
    async fn attachment_is_forwarded_base64() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|email| !email.attachments.is_empty())
            .times(1)
            .returning(|email| {
                assert_eq!(email.attachments[0].filename, "cv.txt");
                assert_eq!(email.attachments[0].content, "aGk=");
                Ok("note".into())
            });
        mailer
            .expect_send()
            .withf(|email| email.attachments.is_empty())
            .times(1)
            .returning(|_| Ok("reply".into()));

        let handler = ContactHandler::new(mailer, InMemoryContactRepo::new(), settings());
        let small = ContactAttachment::new("cv.txt", Some("text/plain"), b"hi".to_vec());
        handler.submit(form(), Some(small)).await.unwrap();

        let inbox = handler.list_messages().await.unwrap();
        assert_eq!(inbox.messages[0].attachment.as_ref().unwrap().size, 2);
    }

    #[actix_rt::test]
    async fn inbox_operations_validate_ids() {
        let handler = ContactHandler::new(MockMailer::new(), InMemoryContactRepo::new(), settings());

        assert!(matches!(handler.mark_read("not-a-uuid").await, Err(AppError::InvalidInput(_))));
        assert!(matches!(
            handler.delete_message(&uuid::Uuid::new_v4().to_string()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn sender_keeps_address() {
        assert_eq!(sender_as("Portfolio <a@b.dev>", "Jane"), "Jane <a@b.dev>");
        assert_eq!(sender_as("a@b.dev", "Jane"), "Jane <a@b.dev>");
        assert_eq!(human_size(5 * 1024 * 1024), "5MB");
    }
}
