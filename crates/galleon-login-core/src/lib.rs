//! Galleon login core
//!
//! Account-management logic shared by the wallet's login screens: the
//! duress-mode settings lifecycle and the login-time OTP reminder flow.
//! Everything with a platform behind it (files, key-value storage, modal
//! prompts, the account SDK itself) sits behind capability traits; concrete
//! persistence lives in `galleon-login-storage`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod duress;
pub mod error;
pub mod otp_reminder;
pub mod startup;
pub mod storage;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use account::Account;
pub use duress::{
    DuressSettings, DuressSettingsStore, DuressSettingsUpdate, DURESS_SETTINGS_FILE,
};
pub use error::{Error, Result};
pub use otp_reminder::{
    first_reminder_due, repeat_reminder_due, OtpReminderFlow, ReminderChoice, ReminderKind,
    ReminderOutcome, ReminderUi, LAST_OTP_CHECK_KEY, LOGIN_STORE_ID, OTP_DONT_ASK_KEY,
    OTP_REMINDER_DELAY_MS,
};
pub use startup::{spawn_reported, ErrorSink, LogErrorSink};
pub use storage::{KeyValueStore, SettingsBackend};
