//! Account capability trait
//!
//! The login SDK's account object, reduced to the surface the reminder flow
//! needs. The real SDK stays out of scope; anything that can answer these
//! five questions can drive the flow.

use crate::{KeyValueStore, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Logged-in account handle
#[async_trait]
pub trait Account: Send + Sync {
    /// Account username, `None` for PIN-only/light logins
    fn username(&self) -> Option<String>;

    /// Current OTP secret, present once two-factor is enabled
    fn otp_key(&self) -> Option<String>;

    /// Account creation time, when known
    fn created(&self) -> Option<DateTime<Utc>>;

    /// Enable two-factor protection, returning the newly generated secret
    async fn enable_otp(&self) -> Result<String>;

    /// Per-account key-value store
    fn data_store(&self) -> &dyn KeyValueStore;
}
