//! OTP reminder flow
//!
//! At login, decides whether to nudge the user toward enabling two-factor
//! protection, and records their answer. The decision is two ordered
//! threshold checks, kept as separate predicates on purpose: the first fires
//! for accounts that have never been reminded, the second re-fires every
//! seven days for accounts that deferred. When the first check just recorded
//! a fresh timestamp, the second sees that fresh value and stays quiet, so at
//! most one prompt appears per login.
//!
//! Reads fail open (a broken data store looks like a fresh install); writes
//! and the enable-OTP call propagate their errors to the caller.

use crate::{Account, Result};
use async_trait::async_trait;
use chrono::Utc;

/// Key-value store namespace for login state
pub const LOGIN_STORE_ID: &str = "app.edge.login";

/// Key holding the last reminder time, as a decimal epoch-milliseconds string
pub const LAST_OTP_CHECK_KEY: &str = "lastOtpCheck";

/// Key holding the permanent opt-out flag (`"true"` when set)
pub const OTP_DONT_ASK_KEY: &str = "OtpDontAsk";

/// Reminder threshold: account age before the first nudge, and the pause
/// between repeat nudges
pub const OTP_REMINDER_DELAY_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Which reminder prompt to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// First nudge: two options (enable / skip)
    First,
    /// Repeat nudge: three options (enable / skip / don't ask again)
    Repeat,
}

/// The user's answer to a reminder prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderChoice {
    /// Enable two-factor protection now
    Enable,
    /// Ask again later
    Skip,
    /// Never ask again (repeat prompt only)
    DontAskAgain,
}

/// What the flow did on this login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// No prompt was due (OTP already on, no username, or thresholds not met)
    NotNeeded,
    /// The user opted out earlier; nothing shown, nothing written
    OptedOut,
    /// The user skipped or dismissed; `lastOtpCheck` now holds this login
    Deferred,
    /// The user chose "don't ask again"; the opt-out flag is now set
    DontAskAgain,
    /// The user enabled OTP and was shown the new secret
    Enabled,
}

/// Modal-presentation capability.
///
/// Rendering stays with the app shell; the flow only needs a prompt that
/// resolves to a choice (or `None` when dismissed, treated as skip) and an
/// acknowledgment dialog for the freshly generated secret.
#[async_trait]
pub trait ReminderUi: Send + Sync {
    /// Dismiss any on-screen keyboard before presenting a prompt
    async fn dismiss_keyboard(&self);

    /// Present a reminder prompt and wait for the user's choice
    async fn show_reminder(&self, kind: ReminderKind) -> Option<ReminderChoice>;

    /// Show the new OTP secret in a one-button acknowledgment dialog
    async fn show_otp_secret(&self, secret: &str);
}

/// First-reminder predicate: never reminded, and the account is older than
/// the threshold (unknown creation time counts as old enough).
pub fn first_reminder_due(
    last_check_ms: Option<i64>,
    created_ms: Option<i64>,
    now_ms: i64,
) -> bool {
    last_check_ms.is_none()
        && created_ms.map_or(true, |created| now_ms - created > OTP_REMINDER_DELAY_MS)
}

/// Repeat-reminder predicate: reminded before, and at least the threshold
/// has elapsed since.
pub fn repeat_reminder_due(last_check_ms: Option<i64>, now_ms: i64) -> bool {
    last_check_ms.map_or(false, |last| now_ms - last >= OTP_REMINDER_DELAY_MS)
}

/// One login-time evaluation of the OTP reminder.
///
/// Construct per login and call [`run`](Self::run) once; all state lives in
/// the account's key-value store.
pub struct OtpReminderFlow<'a> {
    account: &'a dyn Account,
    ui: &'a dyn ReminderUi,
}

impl<'a> OtpReminderFlow<'a> {
    /// Create a flow over an account and a prompt presenter
    pub fn new(account: &'a dyn Account, ui: &'a dyn ReminderUi) -> Self {
        Self { account, ui }
    }

    /// Evaluate the reminder and persist the user's response.
    pub async fn run(&self) -> Result<ReminderOutcome> {
        if self.account.username().is_none() || self.account.otp_key().is_some() {
            return Ok(ReminderOutcome::NotNeeded);
        }

        let store = self.account.data_store();
        let (dont_ask, last_check) = tokio::join!(
            store.get_item(LOGIN_STORE_ID, OTP_DONT_ASK_KEY),
            store.get_item(LOGIN_STORE_ID, LAST_OTP_CHECK_KEY),
        );

        // Read failures look like a fresh install.
        if dont_ask.ok().flatten().is_some() {
            tracing::debug!("OTP reminder suppressed: user opted out");
            return Ok(ReminderOutcome::OptedOut);
        }
        let mut last_check_ms: Option<i64> = last_check
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok());

        let now_ms = Utc::now().timestamp_millis();
        let created_ms = self.account.created().map(|dt| dt.timestamp_millis());
        let mut outcome = ReminderOutcome::NotNeeded;

        if first_reminder_due(last_check_ms, created_ms, now_ms) {
            self.ui.dismiss_keyboard().await;
            match self.ui.show_reminder(ReminderKind::First).await {
                Some(ReminderChoice::Enable) => {
                    return self.enable_otp().await;
                }
                _ => {
                    // Skip or dismissed: record this login, and let the
                    // repeat check below see the fresh timestamp.
                    store
                        .set_item(LOGIN_STORE_ID, LAST_OTP_CHECK_KEY, &now_ms.to_string())
                        .await?;
                    last_check_ms = Some(now_ms);
                    outcome = ReminderOutcome::Deferred;
                }
            }
        }

        if repeat_reminder_due(last_check_ms, now_ms) {
            self.ui.dismiss_keyboard().await;
            match self.ui.show_reminder(ReminderKind::Repeat).await {
                Some(ReminderChoice::Enable) => {
                    return self.enable_otp().await;
                }
                Some(ReminderChoice::DontAskAgain) => {
                    store
                        .set_item(LOGIN_STORE_ID, OTP_DONT_ASK_KEY, "true")
                        .await?;
                    tracing::info!("OTP reminder disabled by user");
                    return Ok(ReminderOutcome::DontAskAgain);
                }
                _ => {
                    store
                        .set_item(LOGIN_STORE_ID, LAST_OTP_CHECK_KEY, &now_ms.to_string())
                        .await?;
                    return Ok(ReminderOutcome::Deferred);
                }
            }
        }

        Ok(outcome)
    }

    async fn enable_otp(&self) -> Result<ReminderOutcome> {
        let secret = self.account.enable_otp().await?;
        tracing::info!("OTP enabled from login reminder");
        self.ui.show_otp_secret(&secret).await;
        Ok(ReminderOutcome::Enabled)
    }
}
