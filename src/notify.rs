pub mod dispatch;
pub mod format;
pub mod html;
mod labels;

pub use format::ShopContact;

/// Notification routing and shop identity, read once from settings at startup
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub owner_address: String,
    pub shop: ShopContact,
}
