use chrono::{DateTime, Utc};

use crate::client::Email;
use crate::domain::BookingSubmission;

use super::html;
use super::labels::resolve_item_label;

const DIVIDER: &str = "---------------------------------------------------------";

/// Shared stylesheet for both notification emails
const STYLES: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
.header { background: #2c3e50; color: white; padding: 20px; text-align: center; border-radius: 8px; margin-bottom: 25px; }
.header h2 { margin: 0; font-size: 20px; }
.section { background: white; padding: 20px; margin: 20px 0; border-radius: 8px; }
.section-title { font-size: 18px; font-weight: bold; margin-bottom: 15px; color: #2c3e50; }
.divider { border-top: 1px solid #e0e0e0; margin: 15px 0; }
.item { background: #f9f9f9; padding: 15px; margin: 10px 0; border-left: 4px solid #3498db; border-radius: 4px; }
.field { margin: 8px 0; }
.field-label { font-weight: bold; display: inline-block; min-width: 150px; color: #555; }
.comment { background: #fff3cd; padding: 15px; border-left: 4px solid #ffc107; white-space: pre-wrap; border-radius: 4px; }
.footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #e0e0e0; color: #666; }";

/// Shop identity echoed back to customers in the confirmation email
#[derive(Debug, Clone)]
pub struct ShopContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Render the internal notification alerting shop staff of a new request
pub fn owner_email(submission: &BookingSubmission) -> Email {
    let type_label = submission.request_type.label();
    let created_at = format_created_at(&submission.created_at_iso);
    let heading = format!("NEW BOOKING REQUEST - {}", type_label.to_uppercase());

    let subject = format!(
        "New {} Request: {} to {}",
        type_label, submission.dates.from, submission.dates.to
    );

    Email {
        subject,
        text_body: owner_text(submission, &heading, &created_at),
        html_body: owner_html(submission, &heading, &created_at),
    }
}

/// Render the confirmation sent back to the requester
pub fn customer_email(submission: &BookingSubmission, shop: &ShopContact) -> Email {
    let type_label = submission.request_type.label();

    let subject = format!(
        "{}: Your {} Request Has Been Received",
        shop.name, type_label
    );

    Email {
        subject,
        text_body: customer_text(submission, shop),
        html_body: customer_html(submission, shop),
    }
}

fn owner_text(submission: &BookingSubmission, heading: &str, created_at: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(heading.to_string());
    lines.push(String::new());

    lines.push("REQUEST DETAILS".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(format!(
        "Request Type:     {}",
        submission.request_type.label()
    ));
    lines.push(format!("Created At:       {}", created_at));
    lines.push(format!(
        "Rental Period:    {} → {}",
        submission.dates.from, submission.dates.to
    ));
    lines.push(String::new());

    lines.push(format!(
        "REQUESTED ITEMS ({})",
        item_count(submission.items.len())
    ));
    lines.push(DIVIDER.to_string());
    for (idx, item) in submission.items.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.push(format!("Item {}:", idx + 1));
        lines.push(format!(
            "  - Type:        {}",
            resolve_item_label(&item.item_type, item.item_label.as_deref())
        ));
        lines.push(format!("  - Segment:     {}", item.segment.label()));
        lines.push(format!("  - Quantity:    {}", item.quantity));
        if let Some(note) = trimmed(item.note.as_deref()) {
            lines.push(format!("  - Note:        {}", note));
        }
    }
    lines.push(String::new());

    lines.push("CONTACT INFORMATION".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(format!("Email:            {}", submission.contact.email));
    lines.push(format!("Phone:            {}", submission.contact.phone));
    if !submission.contact.messenger.is_none() {
        lines.push(format!(
            "Messenger:        {}",
            submission.contact.messenger.label()
        ));
        if let Some(handle) = trimmed(submission.contact.messenger_handle.as_deref()) {
            lines.push(format!("Messenger Handle: {}", handle));
        }
    }

    if let Some(comment) = trimmed(submission.comment.as_deref()) {
        lines.push(String::new());
        lines.push("ADDITIONAL COMMENT".to_string());
        lines.push(DIVIDER.to_string());
        for line in comment.lines().filter(|line| !line.trim().is_empty()) {
            lines.push(format!("   {}", line.trim()));
        }
    }

    lines.join("\n")
}

fn owner_html(submission: &BookingSubmission, heading: &str, created_at: &str) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(html::banner(heading));

    let details = [
        html::field("Request Type", submission.request_type.label()),
        html::field("Created At", created_at),
        html::field(
            "Rental Period",
            &format!("{} → {}", submission.dates.from, submission.dates.to),
        ),
    ]
    .concat();
    sections.push(html::section("REQUEST DETAILS", &details));

    let items: String = submission
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let mut fields = String::new();
            fields.push_str(&html::field(
                "Type",
                &resolve_item_label(&item.item_type, item.item_label.as_deref()),
            ));
            fields.push_str(&html::field("Segment", item.segment.label()));
            fields.push_str(&html::field("Quantity", &item.quantity.to_string()));
            if let Some(note) = trimmed(item.note.as_deref()) {
                fields.push_str(&html::field("Note", note));
            }
            html::item_block(&format!("Item {}:", idx + 1), &fields)
        })
        .collect();
    sections.push(html::section(
        &format!("REQUESTED ITEMS ({})", item_count(submission.items.len())),
        &items,
    ));

    let mut contact = String::new();
    contact.push_str(&html::field("Email", &submission.contact.email));
    contact.push_str(&html::field("Phone", &submission.contact.phone));
    if !submission.contact.messenger.is_none() {
        contact.push_str(&html::field(
            "Messenger",
            submission.contact.messenger.label(),
        ));
        if let Some(handle) = trimmed(submission.contact.messenger_handle.as_deref()) {
            contact.push_str(&html::field("Messenger Handle", handle));
        }
    }
    sections.push(html::section("CONTACT INFORMATION", &contact));

    if let Some(comment) = submission
        .comment
        .as_deref()
        .filter(|comment| !comment.trim().is_empty())
    {
        sections.push(html::section(
            "ADDITIONAL COMMENT",
            &html::comment_block(comment),
        ));
    }

    html::document(STYLES, &sections.join("\n"))
}

fn customer_text(submission: &BookingSubmission, shop: &ShopContact) -> String {
    let type_label = submission.request_type.label();
    let mut lines: Vec<String> = Vec::new();

    lines.push("YOUR REQUEST HAS BEEN RECEIVED".to_string());
    lines.push(String::new());
    lines.push(format!("Thank you for your interest in {}!", shop.name));
    lines.push(String::new());
    lines.push(format!(
        "We have received your {} request and will process it shortly.",
        type_label.to_lowercase()
    ));
    lines.push(String::new());

    lines.push("REQUEST DETAILS".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(format!("Request Type: {}", type_label));
    lines.push(format!(
        "Rental Period: From {} to {}",
        submission.dates.from, submission.dates.to
    ));
    lines.push(String::new());
    lines.push("Requested Items:".to_string());
    for (idx, item) in submission.items.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.push(format!(
            "  {}. {}",
            idx + 1,
            resolve_item_label(&item.item_type, item.item_label.as_deref())
        ));
        lines.push(format!("     Segment: {}", item.segment.label()));
        lines.push(format!("     Quantity: {}", item.quantity));
        if let Some(note) = trimmed(item.note.as_deref()) {
            lines.push(format!("     Note: {}", note));
        }
    }
    lines.push(String::new());

    lines.push("YOUR CONTACT DETAILS".to_string());
    lines.push(DIVIDER.to_string());
    lines.push("We will use these details to get back to you:".to_string());
    lines.push(format!("Email: {}", submission.contact.email));
    lines.push(format!("Phone: {}", submission.contact.phone));
    if !submission.contact.messenger.is_none() {
        let handle = trimmed(submission.contact.messenger_handle.as_deref())
            .map(|handle| format!(" ({})", handle))
            .unwrap_or_default();
        lines.push(format!(
            "Messenger: {}{}",
            submission.contact.messenger.label(),
            handle
        ));
    }
    lines.push(String::new());

    lines.push("WHAT HAPPENS NEXT?".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(
        "We will review your request and check availability for the requested dates and items."
            .to_string(),
    );
    lines.push(
        "You will receive a confirmation email or phone call from us shortly to finalize your booking."
            .to_string(),
    );
    lines.push(String::new());

    lines.push("HOW TO REACH US".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(
        "If you have any questions or need to make changes to your request, please contact us:"
            .to_string(),
    );
    lines.push(format!("Email: {}", shop.email));
    lines.push(format!("Phone: {}", shop.phone));
    lines.push(String::new());

    lines.push("Best regards,".to_string());
    lines.push(format!("{} Team", shop.name));

    lines.join("\n")
}

fn customer_html(submission: &BookingSubmission, shop: &ShopContact) -> String {
    let type_label = submission.request_type.label();
    let mut sections: Vec<String> = Vec::new();

    sections.push(html::banner("YOUR REQUEST HAS BEEN RECEIVED"));
    sections.push(html::paragraph(&format!(
        "Thank you for your interest in {}!",
        shop.name
    )));
    sections.push(html::paragraph(&format!(
        "We have received your {} request and will process it shortly.",
        type_label.to_lowercase()
    )));

    let mut details = String::new();
    details.push_str(&html::field("Request Type", type_label));
    details.push_str(&html::field(
        "Rental Period",
        &format!(
            "From {} to {}",
            submission.dates.from, submission.dates.to
        ),
    ));
    let items: String = submission
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let mut fields = String::new();
            fields.push_str(&html::field("Segment", item.segment.label()));
            fields.push_str(&html::field("Quantity", &item.quantity.to_string()));
            if let Some(note) = trimmed(item.note.as_deref()) {
                fields.push_str(&html::field("Note", note));
            }
            html::item_block(
                &format!(
                    "{}. {}",
                    idx + 1,
                    resolve_item_label(&item.item_type, item.item_label.as_deref())
                ),
                &fields,
            )
        })
        .collect();
    details.push_str(&items);
    sections.push(html::section("REQUEST DETAILS", &details));

    let mut own_contact = String::new();
    own_contact.push_str(&html::paragraph(
        "We will use these details to get back to you:",
    ));
    own_contact.push_str(&html::field("Email", &submission.contact.email));
    own_contact.push_str(&html::field("Phone", &submission.contact.phone));
    if !submission.contact.messenger.is_none() {
        let handle = trimmed(submission.contact.messenger_handle.as_deref())
            .map(|handle| format!(" ({})", handle))
            .unwrap_or_default();
        own_contact.push_str(&html::field(
            "Messenger",
            &format!("{}{}", submission.contact.messenger.label(), handle),
        ));
    }
    sections.push(html::section("YOUR CONTACT DETAILS", &own_contact));

    let next_steps = [
        html::paragraph(
            "We will review your request and check availability for the requested dates and items.",
        ),
        html::paragraph(
            "You will receive a confirmation email or phone call from us shortly to finalize your booking.",
        ),
    ]
    .concat();
    sections.push(html::section("WHAT HAPPENS NEXT?", &next_steps));

    let mut shop_contact = String::new();
    shop_contact.push_str(&html::paragraph(
        "If you have any questions or need to make changes to your request, please contact us:",
    ));
    shop_contact.push_str(&html::field("Email", &shop.email));
    shop_contact.push_str(&html::field("Phone", &shop.phone));
    sections.push(html::section("HOW TO REACH US", &shop_contact));

    sections.push(html::footer(&[
        html::paragraph("Best regards,"),
        html::paragraph(&format!("{} Team", shop.name)),
    ]
    .concat()));

    html::document(STYLES, &sections.join("\n"))
}

/// Render the submitter's timestamp for humans; fall back to the raw string
/// rather than failing the message over a bad timestamp.
fn format_created_at(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(instant) => instant
            .with_timezone(&Utc)
            .format("%d %b %Y, %H:%M UTC")
            .to_string(),
        Err(_) => iso.to_string(),
    }
}

fn item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
