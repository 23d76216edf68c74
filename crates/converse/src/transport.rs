//! Transport abstraction for the model endpoint.

use ccore::{Request, Response, StreamEvent};
use futures_core::Stream;

/// Carries requests to a model endpoint.
///
/// Implementations own authentication, region selection and the wire
/// protocol. Failures surface as [`anyhow::Error`] and become
/// [`ccore::Error::Transport`] at the conversation boundary.
pub trait Transport {
    /// Send a request and wait for the complete response.
    fn send(&self, request: &Request) -> impl Future<Output = anyhow::Result<Response>> + Send;

    /// Send a request and receive its reply as stream events.
    fn stream(&self, request: Request) -> impl Stream<Item = anyhow::Result<StreamEvent>> + Send;
}
