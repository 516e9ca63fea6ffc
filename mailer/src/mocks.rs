//! Mock transport for testing.

use crate::error::{MailError, Result};
use crate::transport::{MailTransport, OutgoingMail, SentMail};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};

/// Mock mail transport.
///
/// Records every message it is asked to send. Can be switched to fail sends
/// with a fixed error, or to report a failed connection check.
#[derive(Debug, Clone)]
pub struct MockMailTransport {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    failure: Arc<Mutex<Option<MailError>>>,
    verify_result: Arc<Mutex<Result<bool>>>,
}

impl MockMailTransport {
    /// Create a mock that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            verify_result: Arc::new(Mutex::new(Ok(true))),
        }
    }

    /// Create a mock whose sends fail with `error`.
    #[must_use]
    pub fn failing(error: MailError) -> Self {
        let mock = Self::new();
        mock.fail_with(error);
        mock
    }

    /// Make subsequent sends fail with `error`.
    pub fn fail_with(&self, error: MailError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(error);
        }
    }

    /// Let subsequent sends succeed again.
    pub fn clear_failure(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    /// Set what `verify()` returns.
    pub fn set_verify_result(&self, result: Result<bool>) {
        if let Ok(mut verify) = self.verify_result.lock() {
            *verify = result;
        }
    }

    /// Messages sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl Default for MockMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MailTransport for MockMailTransport {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<SentMail>> {
        Box::pin(async move {
            if let Some(error) = self
                .failure
                .lock()
                .map_err(|_| MailError::TaskFailed("mock poisoned".to_string()))?
                .clone()
            {
                return Err(error);
            }

            let mut sent = self
                .sent
                .lock()
                .map_err(|_| MailError::TaskFailed("mock poisoned".to_string()))?;
            sent.push(mail);
            Ok(SentMail {
                message_id: format!("<mock-{}@signalist.test>", sent.len()),
            })
        })
    }

    fn verify(&self) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async move {
            self.verify_result
                .lock()
                .map_err(|_| MailError::TaskFailed("mock poisoned".to_string()))?
                .clone()
        })
    }
}
