//! Plain-text email bodies for booking notifications.
//!
//! Free-text booking fields arrive here already sanitized by the
//! submission pipeline; templates only assemble them.

use cadenza_db::models::booking::Booking;

/// Subject and body for the customer confirmation email.
pub fn customer_confirmation(booking: &Booking) -> (String, String) {
    let subject = format!("Booking request received - {}", booking.reference);
    let body = format!(
        "Hi {name},\n\n\
         Thank you for your booking request! Here is what we have:\n\n\
         Reference:   {reference}\n\
         Event:       {event_type}\n\
         Date:        {event_date}\n\
         Time:        {time_preference}\n\
         Venue:       {venue}\n\
         Duration:    {duration}\n\
         Music:       {music}\n\n\
         We will review the details and get back to you within two business\n\
         days to confirm. Keep your reference handy if you want to check on\n\
         your request.\n\n\
         Warm regards,\n\
         Cadenza Strings",
        name = booking.contact_name,
        reference = booking.reference,
        event_type = booking.event_type,
        event_date = booking.event_date.format("%B %e, %Y"),
        time_preference = booking.time_preference,
        venue = booking.venue.as_deref().unwrap_or("To be confirmed"),
        duration = booking.duration,
        music = booking.music_styles.join(", "),
    );
    (subject, body)
}

/// Subject and body for the owner alert email.
pub fn owner_alert(booking: &Booking) -> (String, String) {
    let subject = format!(
        "New booking request: {} on {}",
        booking.event_type,
        booking.event_date.format("%Y-%m-%d")
    );
    let body = format!(
        "New booking request {reference}.\n\n\
         Event:        {event_type}\n\
         Date:         {event_date}\n\
         Time:         {time_preference}\n\
         Venue:        {venue}\n\
         Guests:       {guest_count}\n\
         Setting:      {setting}\n\
         Duration:     {duration}\n\
         Music styles: {music}\n\
         Song requests: {songs}\n\
         Requirements: {requirements}\n\n\
         Contact: {name} <{email}> {phone}\n\
         Referral: {referral}",
        reference = booking.reference,
        event_type = booking.event_type,
        event_date = booking.event_date.format("%Y-%m-%d"),
        time_preference = booking.time_preference,
        venue = booking.venue.as_deref().unwrap_or("-"),
        guest_count = booking.guest_count.as_deref().unwrap_or("-"),
        setting = booking.setting.as_deref().unwrap_or("-"),
        duration = booking.duration,
        music = booking.music_styles.join(", "),
        songs = booking.song_requests.as_deref().unwrap_or("-"),
        requirements = booking.special_requirements.as_deref().unwrap_or("-"),
        name = booking.contact_name,
        email = booking.contact_email,
        phone = booking.contact_phone,
        referral = booking.referral_source.as_deref().unwrap_or("-"),
    );
    (subject, body)
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
            venue: Some("Fort Garry Hotel".to_string()),
            guest_count: Some("50-100".to_string()),
            setting: None,
            duration: "2 hours".to_string(),
            music_styles: vec!["Classical".to_string(), "Jazz".to_string()],
            song_requests: None,
            special_requirements: None,
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@example.com".to_string(),
            contact_phone: "2045550123".to_string(),
            referral_source: None,
            created_at: Utc.with_ymd_and_hms(2031, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn confirmation_includes_reference_and_name() {
        let (subject, body) = customer_confirmation(&sample_booking());
        assert!(subject.contains("BK-20310615-AB12"));
        assert!(body.contains("Hi Jane Doe,"));
        assert!(body.contains("Classical, Jazz"));
    }

    #[test]
    fn owner_alert_includes_contact_details() {
        let (subject, body) = owner_alert(&sample_booking());
        assert!(subject.contains("Wedding"));
        assert!(body.contains("jane@example.com"));
        assert!(body.contains("2045550123"));
    }

    #[test]
    fn missing_optional_fields_render_placeholders() {
        let (_, body) = owner_alert(&sample_booking());
        assert!(body.contains("Setting:      -"));
    }
}
