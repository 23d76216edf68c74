//! Scripted transport for tests.

use crate::Transport;
use ccore::{Message, Request, Response, StreamEvent};
use futures_core::Stream;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

/// One scripted reply.
#[derive(Debug, Clone)]
enum Script {
    Response(Response),
    Events {
        events: Vec<StreamEvent>,
        error: Option<String>,
    },
    Fail(String),
}

/// A transport that replays scripted replies in order and records every
/// request it receives.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    /// Create a transport with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(script);
        self
    }

    /// Reply with a raw response payload.
    pub fn respond(self, response: Response) -> Self {
        self.push(Script::Response(response))
    }

    /// Reply with a well-formed payload carrying `message`.
    pub fn reply(self, message: &Message) -> Self {
        let response = Response::new(message).unwrap_or_default();
        self.respond(response)
    }

    /// Reply with a stream of events.
    pub fn events(self, events: Vec<StreamEvent>) -> Self {
        self.push(Script::Events {
            events,
            error: None,
        })
    }

    /// Reply with a stream of events followed by a transport error.
    pub fn events_then_fail(self, events: Vec<StreamEvent>, error: &str) -> Self {
        self.push(Script::Events {
            events,
            error: Some(error.into()),
        })
    }

    /// Fail the next call.
    pub fn fail(self, error: &str) -> Self {
        self.push(Script::Fail(error.into()))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn next(&self, request: &Request) -> Option<Script> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl Transport for Scripted {
    fn send(&self, request: &Request) -> impl Future<Output = anyhow::Result<Response>> + Send {
        let result = match self.next(request) {
            Some(Script::Response(response)) => Ok(response),
            Some(Script::Fail(error)) => Err(anyhow::anyhow!(error)),
            Some(Script::Events { .. }) => Err(anyhow::anyhow!("scripted a stream, got send")),
            None => Err(anyhow::anyhow!("no scripted reply")),
        };
        async move { result }
    }

    fn stream(&self, request: Request) -> impl Stream<Item = anyhow::Result<StreamEvent>> + Send {
        let items: Vec<anyhow::Result<StreamEvent>> = match self.next(&request) {
            Some(Script::Events { events, error }) => events
                .into_iter()
                .map(Ok)
                .chain(error.map(|error| Err(anyhow::anyhow!(error))))
                .collect(),
            Some(Script::Fail(error)) => vec![Err(anyhow::anyhow!(error))],
            Some(Script::Response(_)) => vec![Err(anyhow::anyhow!("scripted a response, got stream"))],
            None => vec![Err(anyhow::anyhow!("no scripted reply"))],
        };
        futures_util::stream::iter(items)
    }
}
