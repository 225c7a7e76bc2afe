//! Email service for booking notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::booking::BookingDetails,
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Notify customer and staff that a booking was created
    pub async fn send_booking_created(&self, booking: &BookingDetails) -> AppResult<()> {
        let subject = format!("Booking #{} received", booking.id);
        let body = format!(
            r#"
Hello {name},

We have received your booking request (#{id}). It is pending staff
confirmation; you will hear from us shortly.

{items}
"#,
            name = booking.customer_name,
            id = booking.id,
            items = format_items(booking),
        );

        self.send_email(&booking.customer_email, &subject, &body).await?;
        if let Some(staff) = self.config.staff_email.clone() {
            let staff_subject = format!("New booking #{} from {}", booking.id, booking.customer_name);
            self.send_email(&staff, &staff_subject, &body).await?;
        }
        Ok(())
    }

    /// Notify customer and staff that returns were recorded
    pub async fn send_booking_returned(&self, booking: &BookingDetails) -> AppResult<()> {
        let subject = format!("Booking #{} return update", booking.id);
        let body = format!(
            r#"
Hello {name},

Returns have been recorded on your booking #{id}. Current status: {status}.

{items}
"#,
            name = booking.customer_name,
            id = booking.id,
            status = booking.status,
            items = format_items(booking),
        );

        self.send_email(&booking.customer_email, &subject, &body).await?;
        if let Some(staff) = self.config.staff_email.clone() {
            self.send_email(&staff, &subject, &body).await?;
        }
        Ok(())
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Gearbook");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace("\n", "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            // Use STARTTLS for secure connection
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

fn format_items(booking: &BookingDetails) -> String {
    booking
        .items
        .iter()
        .map(|item| {
            format!(
                "- {} x{} from {} to {} ({})",
                item.product_name, item.quantity, item.start_date, item.end_date, item.return_status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
