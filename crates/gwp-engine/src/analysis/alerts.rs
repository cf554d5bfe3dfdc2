//! Alert subscriptions.
//!
//! Subscriptions are acknowledged but not persisted; delivery is handled by
//! the notification channels listed in the response.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use gwp_common::{Coordinate, GwpClass, GwpError, GwpResult};
use gwp_protocol::analysis::{
    AlertPreference, AlertsResponse, Channel, NotificationChannels, SubscriberContact,
    Subscription, UpcomingAlert,
};

const NOT_PROVIDED: &str = "Not provided";

/// Deterministic id derived from the location and contact details.
pub fn subscription_id(location: Coordinate, email: &str, phone: &str) -> String {
    let mut hasher = DefaultHasher::new();
    email.hash(&mut hasher);
    phone.hash(&mut hasher);

    format!(
        "SUB{}{}{}",
        (location.lat * 1000.0) as i64,
        (location.lon * 1000.0) as i64,
        hasher.finish() % 1000
    )
}

fn preference(alert_type: &str, description: &str, frequency: &str, enabled: bool) -> AlertPreference {
    AlertPreference {
        alert_type: alert_type.to_string(),
        description: description.to_string(),
        frequency: frequency.to_string(),
        enabled,
    }
}

fn first_of_next_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

fn channel(enabled: bool, frequency: &str, note: Option<&str>) -> Channel {
    Channel {
        enabled,
        frequency: frequency.to_string(),
        note: note.map(str::to_string),
    }
}

/// Register alerts for a location. At least one of `email` or `phone` must be
/// non-empty.
pub fn alert_subscription(
    location: Coordinate,
    class: GwpClass,
    email: &str,
    phone: &str,
    now: NaiveDateTime,
) -> GwpResult<AlertsResponse> {
    if email.is_empty() && phone.is_empty() {
        return Err(GwpError::MissingContact);
    }

    let id = subscription_id(location, email, phone);
    let has_email = !email.is_empty();
    let has_phone = !phone.is_empty();
    let today = now.date();

    Ok(AlertsResponse {
        location,
        gwp_class: class,
        subscription: Subscription {
            subscription_id: id.clone(),
            status: "Active".to_string(),
            created_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            email_verified: has_email,
            phone_verified: has_phone,
        },
        contact_info: SubscriberContact {
            email: if has_email { email } else { NOT_PROVIDED }.to_string(),
            phone: if has_phone { phone } else { NOT_PROVIDED }.to_string(),
        },
        alert_preferences: vec![
            preference(
                "Groundwater Level Alert",
                "Notify when groundwater potential changes",
                "Monthly",
                true,
            ),
            preference(
                "Rainfall Alert",
                "Heavy rainfall predictions for recharge",
                "Real-time",
                true,
            ),
            preference(
                "Drought Warning",
                "Early warning for drought conditions",
                "Seasonal",
                true,
            ),
            preference(
                "Water Quality Update",
                "Periodic water quality advisories",
                "Quarterly",
                false,
            ),
            preference(
                "Policy Updates",
                "Government regulations and policy changes",
                "As needed",
                true,
            ),
        ],
        upcoming_alerts: vec![
            UpcomingAlert {
                date: (today + Duration::days(7)).format("%Y-%m-%d").to_string(),
                alert_type: "Rainfall Alert".to_string(),
                message: "Heavy rainfall expected (50-80mm) - Good for groundwater recharge"
                    .to_string(),
            },
            UpcomingAlert {
                date: first_of_next_month(today).format("%Y-%m-%d").to_string(),
                alert_type: "Monthly Report".to_string(),
                message: "Monthly groundwater status report for your location".to_string(),
            },
        ],
        notification_channels: NotificationChannels {
            email: channel(has_email, "Daily digest + Urgent alerts", None),
            whatsapp: channel(
                has_phone,
                "Urgent alerts only",
                Some("Requires WhatsApp Business API integration"),
            ),
            sms: channel(has_phone, "Critical alerts only", None),
        },
        message: format!(
            "✅ Alert system configured successfully! Subscription ID: {}",
            id
        ),
        next_steps: vec![
            "Verify your email/phone (verification link sent)".to_string(),
            "Customize alert preferences in settings".to_string(),
            "Download mobile app for push notifications".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 12, 28)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_requires_contact() {
        let err = alert_subscription(Coordinate::new(15.45, 75.0), GwpClass::High, "", "", now())
            .unwrap_err();
        assert!(matches!(err, GwpError::MissingContact));
    }

    #[test]
    fn test_phone_only_subscription() {
        let resp = alert_subscription(
            Coordinate::new(15.45, 75.0),
            GwpClass::Moderate,
            "",
            "+91 9876543210",
            now(),
        )
        .unwrap();

        assert!(resp.subscription.subscription_id.starts_with("SUB1545075000"));
        assert!(!resp.subscription.email_verified);
        assert!(resp.subscription.phone_verified);
        assert_eq!(resp.subscription.created_at, "2026-12-28 09:30:00");
        assert_eq!(resp.contact_info.email, "Not provided");
        assert!(!resp.notification_channels.email.enabled);
        assert!(resp.notification_channels.sms.enabled);
        assert_eq!(resp.alert_preferences.len(), 5);
        assert!(!resp.alert_preferences[3].enabled);
        assert!(resp.message.ends_with(&resp.subscription.subscription_id));
    }

    #[test]
    fn test_upcoming_alerts_roll_into_next_year() {
        let resp = alert_subscription(
            Coordinate::new(15.45, 75.0),
            GwpClass::High,
            "farmer@example.com",
            "",
            now(),
        )
        .unwrap();
        assert_eq!(resp.upcoming_alerts[0].date, "2027-01-04");
        assert_eq!(resp.upcoming_alerts[1].date, "2027-01-01");
    }

    #[test]
    fn test_subscription_id_is_stable() {
        let p = Coordinate::new(15.45, 75.0);
        assert_eq!(
            subscription_id(p, "a@b.c", ""),
            subscription_id(p, "a@b.c", "")
        );
    }
}
