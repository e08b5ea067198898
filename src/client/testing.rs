//! Scripted [`HttpTransport`] for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use crate::client::http::{
    BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportFailure,
};

#[derive(Debug, Clone)]
enum Reply {
    Response { status: u16, body: String },
    Fail(String),
}

#[derive(Debug, Clone)]
struct Route {
    url_contains: String,
    reply: Reply,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    routes: Vec<Route>,
    requests: Vec<HttpRequest>,
}

/// Answers each request with the first route whose pattern occurs in the URL.
/// Unmatched requests get a 404.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, url_contains: &str, status: u16, body: impl Into<String>) -> Self {
        self.push(
            url_contains,
            Reply::Response {
                status,
                body: body.into(),
            },
        )
    }

    pub(crate) fn fail(self, url_contains: &str, message: &str) -> Self {
        self.push(url_contains, Reply::Fail(message.to_owned()))
    }

    /// Answer the token endpoint with a token valid for `expires_in` seconds.
    pub(crate) fn with_token(self, token: &str, expires_in: u64) -> Self {
        self.respond(
            "/oauth2/token",
            200,
            format!(r#"{{"access_token":"{token}","token_type":"bearer","expires_in":{expires_in}}}"#),
        )
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn requests_to(&self, url_contains: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.contains(url_contains))
            .collect()
    }

    pub(crate) fn token_requests(&self) -> usize {
        self.requests_to("/oauth2/token").len()
    }

    fn push(self, url_contains: &str, reply: Reply) -> Self {
        self.state.lock().unwrap().routes.push(Route {
            url_contains: url_contains.to_owned(),
            reply,
        });
        self
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let reply = {
                let mut state = self.state.lock().unwrap();
                let reply = state
                    .routes
                    .iter()
                    .find(|route| request.url.contains(&route.url_contains))
                    .map(|route| route.reply.clone());
                state.requests.push(request);
                reply
            };
            match reply {
                Some(Reply::Response { status, body }) => Ok(HttpResponse { status, body }),
                Some(Reply::Fail(message)) => Err(io::Error::other(message).into()),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "no route".to_owned(),
                }),
            }
        })
    }
}
