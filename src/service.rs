use std::future::Future;

use crate::Result;
use crate::payload::{CaptionRequest, CaptionResponse};

/// Pluggable captioning collaborator used by [`crate::session::FetchSession`].
///
/// A service takes a request (link or identifier plus language) and returns the
/// collaborator's response body. How it obtains the captions is its own business.
///
/// Contract:
/// - Transport-level failures (unreachable host, non-2xx without a usable body) are returned
///   as `Err`, preferably [`crate::Error::Collaborator`] with a readable message.
/// - A well-formed body is returned as `Ok` even when it reports `success: false`; the session
///   decides what counts as success.
pub trait CaptionService {
    fn fetch_captions(
        &self,
        request: &CaptionRequest,
    ) -> impl Future<Output = Result<CaptionResponse>> + Send;
}
