use serde::Deserialize;

/// A structurally valid booking request, produced by the intake gateway
#[derive(Debug, Clone)]
pub struct BookingSubmission {
    pub request_type: RequestType,
    pub dates: DateRange,
    pub items: Vec<RequestedItem>,
    pub contact: ContactInfo,
    pub comment: Option<String>,
    pub locale: String,
    pub created_at_iso: String,
}

/// Requested period, display-only: date ordering is the submitting form's concern
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub item_type: String,
    pub item_label: Option<String>,
    #[serde(default)]
    pub segment: Segment,
    pub quantity: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub messenger: Messenger,
    pub messenger_handle: Option<String>,
}

/// Booking request kind as submitted by the form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RequestType {
    Rental,
    Lesson,
    Other(String),
}

impl RequestType {
    pub fn label(&self) -> &str {
        match self {
            Self::Rental => "Rental",
            Self::Lesson => "Lesson",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rental" => Self::Rental,
            "lesson" => Self::Lesson,
            _ => Self::Other(value),
        }
    }
}

impl Default for RequestType {
    // Historical form behavior: anything that is not a rental reads as a lesson
    fn default() -> Self {
        Self::Lesson
    }
}

/// Equipment tier; unknown wire values are carried through for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Segment {
    Economy,
    Premium,
    NotApplicable,
    Other(String),
}

impl Segment {
    pub fn label(&self) -> &str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium",
            Self::NotApplicable => "Not applicable",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "economy" => Self::Economy,
            "premium" => Self::Premium,
            "n/a" => Self::NotApplicable,
            _ => Self::Other(value),
        }
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::NotApplicable
    }
}

/// Preferred messenger channel; unknown wire values are carried through for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Messenger {
    None,
    WhatsApp,
    Telegram,
    Viber,
    Other(String),
}

impl Messenger {
    pub fn label(&self) -> &str {
        match self {
            Self::None => "None",
            Self::WhatsApp => "WhatsApp",
            Self::Telegram => "Telegram",
            Self::Viber => "Viber",
            Self::Other(value) => value,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<String> for Messenger {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => Self::None,
            "whatsapp" => Self::WhatsApp,
            "telegram" => Self::Telegram,
            "viber" => Self::Viber,
            _ => Self::Other(value),
        }
    }
}

impl Default for Messenger {
    fn default() -> Self {
        Self::None
    }
}
