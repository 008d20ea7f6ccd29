// Hand-maintained helpers for the errors namespace.

impl Error {
    /// Returns true if the failed call may be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.tag.as_str() {
            ERROR_RATE_LIMIT => true,
            ERROR_RETRY => self
                .retry
                .as_deref()
                .is_some_and(|policy| policy.tag != super::common::RETRY_POLICY_NONE),
            _ => false,
        }
    }
}
