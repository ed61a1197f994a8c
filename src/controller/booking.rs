use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::client::EmailClient;
use crate::domain::{
    BookingSubmission, ContactInfo, DateRange, Messenger, RequestType, RequestedItem,
};
use crate::notify::dispatch::{self, DispatchOutcome};
use crate::notify::{format, NotifyConfig};

/// Wire representation of a booking submission. Fields required by the
/// validation contract are optional here so that every violation can be
/// reported at once instead of failing on the first decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    #[serde(rename = "type", default)]
    request_type: RequestType,
    dates: Option<DateRangeForm>,
    #[serde(default, deserialize_with = "items_or_none")]
    items: Option<Vec<RequestedItem>>,
    contact: Option<ContactForm>,
    comment: Option<String>,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    created_at_iso: String,
}

#[derive(Debug, Deserialize)]
struct DateRangeForm {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactForm {
    email: Option<String>,
    phone: Option<String>,
    #[serde(default)]
    messenger: Messenger,
    messenger_handle: Option<String>,
}

impl BookingForm {
    /// Validate and convert into the domain submission, collecting every
    /// violated rule rather than stopping at the first.
    fn into_submission(self) -> Result<BookingSubmission, Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        let contact = match self.contact {
            Some(form) => {
                let email = form.email.filter(|email| !email.is_empty());
                let phone = form.phone.filter(|phone| !phone.is_empty());
                if email.is_none() {
                    errors.push("Missing contact.email".into());
                }
                if phone.is_none() {
                    errors.push("Missing contact.phone".into());
                }
                match (email, phone) {
                    (Some(email), Some(phone)) => Some(ContactInfo {
                        email,
                        phone,
                        messenger: form.messenger,
                        messenger_handle: form.messenger_handle,
                    }),
                    _ => None,
                }
            }
            None => {
                errors.push("Missing contact.email".into());
                errors.push("Missing contact.phone".into());
                None
            }
        };

        let dates = self.dates.and_then(|dates| match (dates.from, dates.to) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
                Some(DateRange { from, to })
            }
            _ => None,
        });
        if dates.is_none() {
            errors.push("Missing dates".into());
        }

        let items = self.items.filter(|items| !items.is_empty());
        if items.is_none() {
            errors.push("Missing items".into());
        }

        match (contact, dates, items) {
            (Some(contact), Some(dates), Some(items)) => Ok(BookingSubmission {
                request_type: self.request_type,
                dates,
                items,
                contact,
                comment: self.comment,
                locale: self.locale,
                created_at_iso: self.created_at_iso,
            }),
            _ => Err(errors),
        }
    }
}

/// Anything that is not a JSON array reports as a missing-items validation
/// failure; malformed entries inside a real array stay structural errors.
fn items_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<RequestedItem>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Booking submission endpoint: decode, validate, format both notifications,
/// dispatch, and aggregate the per-recipient outcomes.
#[tracing::instrument(
    name = "Handle a booking submission",
    skip(body, email_client, notify)
)]
pub async fn submit(
    body: web::Bytes,
    email_client: web::Data<EmailClient>,
    notify: web::Data<NotifyConfig>,
) -> Result<HttpResponse, BookingRejection> {
    let form: BookingForm =
        serde_json::from_slice(&body).map_err(BookingRejection::InvalidJson)?;
    let submission = form.into_submission().map_err(BookingRejection::Invalid)?;

    tracing::info!(
        request_type = submission.request_type.label(),
        locale = %submission.locale,
        item_count = submission.items.len(),
        "Accepted a booking submission"
    );

    let owner_email = format::owner_email(&submission);
    let customer_email = format::customer_email(&submission, &notify.shop);

    let outcome = dispatch::send_both(
        &email_client,
        &notify.owner_address,
        &submission.contact.email,
        &owner_email,
        &customer_email,
    )
    .await;

    if outcome.is_success() {
        Ok(HttpResponse::Ok().json(SubmissionAccepted {
            ok: true,
            results: &outcome,
            message: outcome.message(),
        }))
    } else {
        Ok(HttpResponse::InternalServerError().json(SubmissionFailed {
            ok: false,
            error: "Failed to send emails",
            results: &outcome,
        }))
    }
}

#[derive(Debug, Error)]
pub enum BookingRejection {
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Validation failed: {0:?}")]
    Invalid(Vec<String>),
}

impl ResponseError for BookingRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::InvalidJson(_) => HttpResponse::BadRequest().json(SubmissionMalformed {
                ok: false,
                error: "Invalid JSON",
            }),
            Self::Invalid(errors) => HttpResponse::BadRequest().json(SubmissionRejected {
                ok: false,
                errors,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmissionAccepted<'a> {
    ok: bool,
    results: &'a DispatchOutcome,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct SubmissionFailed<'a> {
    ok: bool,
    error: &'static str,
    results: &'a DispatchOutcome,
}

#[derive(Debug, Serialize)]
struct SubmissionRejected<'a> {
    ok: bool,
    errors: &'a [String],
}

#[derive(Debug, Serialize)]
struct SubmissionMalformed {
    ok: bool,
    error: &'static str,
}
