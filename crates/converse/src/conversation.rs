//! Conversation driver.
//!
//! Ties a [`Builder`] to a [`Transport`]. History is committed only once a
//! reply has been fully received; a failed or abandoned turn leaves it as it
//! was before the turn was built.

use crate::{Builder, Reassembler, Step, Transport, handler};
use ccore::{ContentSegment, Error, History, Message, Modality, Result};
use futures_core::Stream;
use futures_util::StreamExt;
use std::{
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// A conversation with one model over one transport.
pub struct Conversation<T: Transport> {
    builder: Builder,
    transport: T,
}

impl<T: Transport> Conversation<T> {
    /// Create a conversation from a builder and a transport.
    pub fn new(builder: Builder, transport: T) -> Self {
        Self { builder, transport }
    }

    /// The builder, for inspection.
    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// The builder, to stage the next turn.
    pub fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }

    /// The committed history.
    pub fn history(&self) -> &History {
        self.builder.history()
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the staged turn and wait for the whole reply.
    pub async fn converse(&mut self) -> Result<Message> {
        let request = self.builder.build()?;
        tracing::trace!("sending request to {}: {request:?}", request.model().id);

        let response = self
            .transport
            .send(&request)
            .await
            .inspect_err(|e| tracing::error!("transport failed: {e:?}"))?;
        tracing::trace!("received response: {response:?}");
        let message = handler::complete(&response)?;
        if let Some(usage) = response.usage {
            tracing::debug!(
                input = usage.input_tokens,
                output = usage.output_tokens,
                "turn completed"
            );
        }

        self.builder.record(request, message.clone())?;
        Ok(message)
    }

    /// Send the staged turn and stream the reply.
    ///
    /// The stream yields text segments as they arrive. [`Pending`] resolves
    /// to the complete assistant message once the stream reaches
    /// `message_stop`, and fails if the stream errors or is dropped first.
    /// History is only updated on completion. Metadata after `message_stop`
    /// is read before the segment stream ends; a failure at that point is
    /// logged and does not undo the committed reply.
    pub fn converse_stream(
        &mut self,
    ) -> Result<(
        impl Stream<Item = Result<ContentSegment>> + use<'_, T>,
        Pending,
    )> {
        self.builder.model().require(Modality::Streaming)?;
        let request = self.builder.build()?;
        tracing::trace!("streaming request to {}: {request:?}", request.model().id);

        let (tx, rx) = oneshot::channel();
        let Self { builder, transport } = self;
        let stream = async_stream::try_stream! {
            let mut engine = Reassembler::new();
            let events = transport.stream(request.clone());
            futures_util::pin_mut!(events);

            let mut completed = false;
            while let Some(event) = events.next().await {
                let event = event.inspect_err(|e| tracing::error!("error in event stream: {e:?}"))?;
                match engine
                    .accept(event)
                    .inspect_err(|e| tracing::error!("failed to reassemble reply: {e}"))?
                {
                    Step::Segment(segment) => yield segment,
                    Step::Continue => {}
                    Step::Complete(message) => {
                        builder.record(request, message.clone())?;
                        let _ = tx.send(message);
                        completed = true;
                        break;
                    }
                }
            }

            if !completed {
                Err::<(), _>(Error::Protocol("event stream ended before message_stop".into()))?;
            }

            // The reply is committed; only trailing metadata may follow.
            while let Some(event) = events.next().await {
                if let Err(e) = event.map_err(Error::from).and_then(|event| engine.accept(event)) {
                    tracing::warn!("ignored event after message_stop: {e}");
                    break;
                }
            }
            if let Some(usage) = engine.usage() {
                tracing::debug!(
                    input = usage.input_tokens,
                    output = usage.output_tokens,
                    "turn completed"
                );
            }
        };

        Ok((stream, Pending(rx)))
    }
}

/// The assistant message of a streamed turn, available once the stream
/// completes.
#[derive(Debug)]
pub struct Pending(oneshot::Receiver<Message>);

impl Future for Pending {
    type Output = Result<Message>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(|result| {
            result.map_err(|_| Error::Protocol("stream terminated before message_stop".into()))
        })
    }
}
