use std::future::Future;

use crate::SubmissionRecord;

/// Trait for collaborators that accept a completed submission.
///
/// A sink receives the flat record exactly once per submission attempt and
/// reports either acceptance or a transport failure. It does not retry; the
/// wizard re-enables its submit control and the user decides.
pub trait ResponseSink {
    /// The error type for this sink.
    type Error: Into<anyhow::Error>;

    /// Deliver one record.
    ///
    /// # Returns
    /// * `Ok(())` once the delivery completed
    /// * `Err` on transport failure (unreachable, timed out, rejected)
    fn deliver(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
