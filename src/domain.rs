mod booking;
mod sender_identity;

pub use booking::{
    BookingSubmission, ContactInfo, DateRange, Messenger, RequestType, RequestedItem, Segment,
};
pub use sender_identity::SenderIdentity;
