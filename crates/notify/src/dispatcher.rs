//! Fire-and-forget notification dispatch.
//!
//! [`Dispatcher::dispatch_booking_notifications`] spawns the customer
//! confirmation and the owner alert as two detached tasks and returns
//! immediately. The caller has already handed the client a valid booking
//! reference by the time this runs; nothing here can fail the submission.

use std::sync::Arc;

use cadenza_db::models::booking::Booking;

use crate::email::{EmailConfig, EmailSender};
use crate::templates;

/// Dispatches booking notification emails.
///
/// Constructed once at startup. When SMTP or the owner address is not
/// configured, dispatch degrades to a debug log instead of an error; an
/// unconfigured mailbox is a valid deployment, not a fault.
pub struct Dispatcher {
    sender: Option<Arc<EmailSender>>,
    owner_email: Option<String>,
}

impl Dispatcher {
    /// Create a dispatcher with an explicit sender and owner address.
    pub fn new(sender: Option<EmailSender>, owner_email: Option<String>) -> Self {
        Self {
            sender: sender.map(Arc::new),
            owner_email,
        }
    }

    /// Build from environment: SMTP settings via [`EmailConfig::from_env`],
    /// owner address via `OWNER_EMAIL`.
    pub fn from_env() -> Self {
        Self::new(
            EmailConfig::from_env().map(EmailSender::new),
            std::env::var("OWNER_EMAIL").ok(),
        )
    }

    /// A dispatcher that sends nothing. For tests.
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Spawn the customer confirmation and owner alert sends.
    ///
    /// Both run concurrently and independently; neither is awaited by the
    /// caller and neither outcome propagates anywhere but the logs.
    pub fn dispatch_booking_notifications(&self, booking: &Booking) {
        let Some(sender) = &self.sender else {
            tracing::debug!(
                reference = %booking.reference,
                "Email not configured; skipping booking notifications"
            );
            return;
        };

        {
            let sender = Arc::clone(sender);
            let booking = booking.clone();
            tokio::spawn(async move {
                let (subject, body) = templates::customer_confirmation(&booking);
                match sender.send(&booking.contact_email, &subject, &body).await {
                    Ok(()) => tracing::info!(
                        reference = %booking.reference,
                        "Customer confirmation sent"
                    ),
                    Err(e) => tracing::error!(
                        reference = %booking.reference,
                        error = %e,
                        "Customer confirmation failed"
                    ),
                }
            });
        }

        match &self.owner_email {
            Some(owner_email) => {
                let sender = Arc::clone(sender);
                let owner_email = owner_email.clone();
                let booking = booking.clone();
                tokio::spawn(async move {
                    let (subject, body) = templates::owner_alert(&booking);
                    match sender.send(&owner_email, &subject, &body).await {
                        Ok(()) => tracing::info!(
                            reference = %booking.reference,
                            "Owner alert sent"
                        ),
                        Err(e) => tracing::error!(
                            reference = %booking.reference,
                            error = %e,
                            "Owner alert failed"
                        ),
                    }
                });
            }
            None => tracing::warn!(
                reference = %booking.reference,
                "OWNER_EMAIL not configured; skipping owner alert"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_booking() -> Booking {
        Booking {
            id: 1,
            reference: "BK-20310615-AB12".to_string(),
            status: "pending".to_string(),
            event_type: "Wedding".to_string(),
            event_date: NaiveDate::from_ymd_opt(2031, 6, 15).unwrap(),
            time_preference: "Evening".to_string(),
            venue: None,
            guest_count: None,
            setting: None,
            duration: "2 hours".to_string(),
            music_styles: vec!["Jazz".to_string()],
            song_requests: None,
            special_requirements: None,
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@example.com".to_string(),
            contact_phone: "2045550123".to_string(),
            referral_source: None,
            created_at: Utc.with_ymd_and_hms(2031, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn disabled_dispatcher_is_a_silent_noop() {
        // Must not panic and must not require a runtime reactor beyond
        // the current one.
        Dispatcher::disabled().dispatch_booking_notifications(&sample_booking());
    }
}
