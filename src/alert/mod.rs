//! Alert delivery.
//!
//! This module provides:
//! - The channel abstraction the monitor is written against ([`AlertChannel`])
//! - Alert kinds and their text templates ([`Alert`], [`AlertTemplates`])
//! - The production channel posting to a Telegram bot ([`TelegramChannel`])

mod channel;
mod message;
mod telegram;


pub use channel::{AlertChannel, AlertError};
pub use message::{Alert, AlertTemplates, defaults};
pub use telegram::TelegramChannel;
