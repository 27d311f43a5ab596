//! Password reset codes.
//!
//! Reset codes are short numeric codes emailed to the account holder. The
//! code and its expiry live on the user row; verification here is pure so it
//! can be tested without a database.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::common::{Error, Result};

/// How long a reset code stays valid after it is issued.
pub const RESET_CODE_TTL_MINUTES: i64 = 60;

/// Generates a four digit reset code, matching what the reset email renders.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(1000..10000).to_string()
}

/// Expiry timestamp for a code issued at `issued_at`.
pub fn code_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::minutes(RESET_CODE_TTL_MINUTES)
}

/// Checks a presented reset code against what is stored on the account.
///
/// `stored` pairs the code with its expiry; `None` means no reset was ever
/// requested for this account. A wrong code and an absent code are reported
/// identically so the response does not reveal whether a reset is pending.
pub fn verify_code(
    stored: Option<(&str, DateTime<Utc>)>,
    presented: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let presented = presented.trim();
    if presented.is_empty() {
        return Err(Error::validation("please enter the reset code"));
    }

    let (code, expires_at) = match stored {
        Some(stored) => stored,
        None => return Err(Error::validation("invalid reset code")),
    };

    if code != presented {
        return Err(Error::validation("invalid reset code"));
    }

    if now > expires_at {
        return Err(Error::validation("reset code has expired"));
    }

    Ok(())
}
