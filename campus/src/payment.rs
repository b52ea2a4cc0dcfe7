//! Payment callback verification.
//!
//! After checkout the payment gateway redirects back with the payment id and
//! a status in the query string. The redirect is not trusted on its own: the
//! backend is polled for the payment's status a bounded number of times, and
//! only if it never gives an answer does the redirect status decide.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use url::Url;

/// Errors from the payment flow.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid callback URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Callback URL has no payment_id")]
    MissingPaymentId,

    /// Status lookup failed (network, backend error).
    #[error("Status lookup failed: {0}")]
    Lookup(String),
}

/// Status of a payment as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Not settled yet.
    Pending,
    Succeeded,
    Failed,
}

/// Source of truth for payment statuses, normally the backend API.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use campus::payment::{PaymentError, PaymentStatus, PaymentStatusSource};
///
/// struct AlwaysPaid;
///
/// #[async_trait]
/// impl PaymentStatusSource for AlwaysPaid {
///     async fn status(&self, _payment_id: &str) -> Result<PaymentStatus, PaymentError> {
///         Ok(PaymentStatus::Succeeded)
///     }
/// }
/// ```
#[async_trait]
pub trait PaymentStatusSource: Send + Sync {
    /// Current status of `payment_id`.
    async fn status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError>;
}

/// A source that always reports the same status.
#[derive(Debug, Clone)]
pub struct StaticStatusSource {
    status: PaymentStatus,
}

impl StaticStatusSource {
    pub fn new(status: PaymentStatus) -> Self {
        Self { status }
    }
}

#[async_trait]
impl PaymentStatusSource for StaticStatusSource {
    async fn status(&self, _payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        Ok(self.status)
    }
}

/// Query parameters of the gateway redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub payment_id: String,
    /// Raw `status` parameter, if present.
    pub status: Option<String>,
}

/// Redirect statuses that claim a successful payment.
const SUCCESS_STATUSES: [&str; 4] = ["success", "succeeded", "paid", "completed"];

impl CallbackParams {
    /// Read `payment_id` and `status` from a redirect URL.
    pub fn from_url(callback: &str) -> Result<Self, PaymentError> {
        let url = Url::parse(callback)?;
        let mut payment_id = None;
        let mut status = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "payment_id" if !value.is_empty() => payment_id = Some(value.into_owned()),
                "status" => status = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(Self {
            payment_id: payment_id.ok_or(PaymentError::MissingPaymentId)?,
            status,
        })
    }

    /// Whether the redirect claims success.
    pub fn redirect_succeeded(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| SUCCESS_STATUSES.contains(&s.to_ascii_lowercase().as_str()))
    }
}

/// Polling behavior for [`verify_callback`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use campus::payment::PollConfig;
///
/// let config = PollConfig::default()
///     .max_attempts(3)
///     .delay(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Status lookups before giving up. Zero is treated as one.
    pub max_attempts: u32,
    /// Fixed wait between lookups.
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

impl PollConfig {
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// What the callback page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Backend confirmed the payment.
    Confirmed,
    /// Backend reported a failed payment.
    Failed,
    /// Backend never settled, but the redirect reported success.
    TrustedRedirect,
    /// Neither the backend nor the redirect reported success.
    Unverified,
}

impl PaymentOutcome {
    /// Whether the order can be treated as paid.
    pub fn is_paid(self) -> bool {
        matches!(self, Self::Confirmed | Self::TrustedRedirect)
    }
}

/// Poll `source` until it settles or attempts run out.
///
/// Lookup errors count as attempts. There is no wait after the last attempt.
pub async fn verify_callback(
    source: &dyn PaymentStatusSource,
    params: &CallbackParams,
    config: &PollConfig,
) -> PaymentOutcome {
    let attempts = config.max_attempts.max(1);

    for attempt in 1..=attempts {
        match source.status(&params.payment_id).await {
            Ok(PaymentStatus::Succeeded) => {
                info!("payment {} confirmed on attempt {attempt}", params.payment_id);
                return PaymentOutcome::Confirmed;
            }
            Ok(PaymentStatus::Failed) => {
                info!("payment {} failed", params.payment_id);
                return PaymentOutcome::Failed;
            }
            Ok(PaymentStatus::Pending) => {
                debug!("payment {} pending ({attempt}/{attempts})", params.payment_id);
            }
            Err(e) => {
                warn!(
                    "payment {} lookup failed ({attempt}/{attempts}): {e}",
                    params.payment_id
                );
            }
        }
        if attempt < attempts {
            tokio::time::sleep(config.delay).await;
        }
    }

    if params.redirect_succeeded() {
        warn!(
            "payment {} unconfirmed after {attempts} attempts, trusting redirect",
            params.payment_id
        );
        PaymentOutcome::TrustedRedirect
    } else {
        PaymentOutcome::Unverified
    }
}
