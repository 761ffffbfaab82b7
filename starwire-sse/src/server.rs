//! SSE types for servers.

use futures_util::Stream;
use http::{HeaderValue, Response, header};
use http_body::{Body, Frame};
use pin_project_lite::pin_project;
use smol_str::SmolStr;
use starwire_error::{BoxError, ErrorContext, OpaqueError};
use starwire_utils::macros::generate_set_and_with;
use std::{
    pin::Pin,
    task::{Context, Poll, ready},
    time::Duration,
};
use sync_wrapper::SyncWrapper;

use super::{Event, EventDataWrite};

pin_project! {
    /// An [`http_body::Body`] streaming SSE events, one data frame per event.
    pub struct SseResponseBody<S> {
        #[pin]
        event_stream: SyncWrapper<S>,
    }
}

impl<S> std::fmt::Debug for SseResponseBody<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SseResponseBody").finish_non_exhaustive()
    }
}

impl<S> SseResponseBody<S> {
    /// Create a new [`SseResponseBody`] from a [`Stream`] of events.
    pub fn new<T, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Event<T>, E>>,
        T: EventDataWrite,
        E: Into<BoxError>,
    {
        Self {
            event_stream: SyncWrapper::new(stream),
        }
    }
}

impl<S, E, T> Body for SseResponseBody<S>
where
    S: Stream<Item = Result<Event<T>, E>>,
    E: Into<BoxError>,
    T: EventDataWrite,
{
    type Data = bytes::Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();

        match ready!(this.event_stream.get_pin_mut().poll_next(cx)) {
            Some(Ok(event)) => Poll::Ready(Some(Ok(Frame::data(event.serialize()?)))),
            Some(Err(error)) => Poll::Ready(Some(Err(error.into()))),
            None => Poll::Ready(None),
        }
    }
}

/// Configure the interval between keep-alive messages
/// and the event sent as keep-alive message.
#[derive(Debug, Clone)]
#[must_use]
pub struct KeepAlive<T = String> {
    event: Event<T>,
    max_interval: Duration,
}

impl<T> KeepAlive<T> {
    /// Create a new [`KeepAlive`], sending an empty comment every 15 seconds.
    pub fn new() -> Self {
        Self {
            event: Event::empty_comment(),
            max_interval: Duration::from_secs(15),
        }
    }

    /// The maximum time the stream stays silent.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.max_interval
    }

    generate_set_and_with! {
        /// Customize the interval between keep-alive messages.
        ///
        /// Default is 15 seconds.
        pub fn interval(mut self, time: Duration) -> Self {
            self.max_interval = time;
            self
        }
    }

    generate_set_and_with! {
        /// Customize the text of the keep-alive message.
        ///
        /// Default is an empty comment.
        pub fn text(mut self, text: impl Into<SmolStr>) -> Result<Self, OpaqueError> {
            self.event = Event::new()
                .try_with_comment(text)
                .context("build keep-alive event with comment")?;
            Ok(self)
        }
    }

    generate_set_and_with! {
        /// Customize the event of the keep-alive message.
        pub fn event(mut self, event: Event<T>) -> Self {
            self.event = event;
            self
        }
    }
}

impl<T> Default for KeepAlive<T> {
    fn default() -> Self {
        Self::new()
    }
}

pin_project! {
    /// A wrapper around a stream of events which produces
    /// keep-alive events while the stream is idle.
    #[derive(Debug)]
    pub struct KeepAliveStream<S, T = String> {
        #[pin]
        alive_timer: tokio::time::Sleep,
        #[pin]
        inner: S,
        keep_alive: KeepAlive<T>,
    }
}

impl<S, T, E> KeepAliveStream<S, T>
where
    S: Stream<Item = Result<Event<T>, E>>,
    E: Into<BoxError>,
    T: EventDataWrite,
{
    /// Wrap the given stream.
    pub fn new(keep_alive: KeepAlive<T>, inner: S) -> Self {
        Self {
            alive_timer: tokio::time::sleep(keep_alive.max_interval),
            inner,
            keep_alive,
        }
    }

    fn reset(self: Pin<&mut Self>) {
        let this = self.project();
        this.alive_timer
            .reset(tokio::time::Instant::now() + this.keep_alive.max_interval);
    }
}

impl<S, E, T> Stream for KeepAliveStream<S, T>
where
    S: Stream<Item = Result<Event<T>, E>>,
    E: Into<BoxError>,
    T: EventDataWrite + Clone,
{
    type Item = Result<Event<T>, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.as_mut().project();
        match this.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(event))) => {
                self.reset();
                Poll::Ready(Some(Ok(event)))
            }
            Poll::Ready(Some(Err(error))) => Poll::Ready(Some(Err(error))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => {
                ready!(this.alive_timer.poll(cx));
                tracing::trace!("sse stream idle: send keep-alive event");
                let event = this.keep_alive.event.clone();
                self.reset();
                Poll::Ready(Some(Ok(event)))
            }
        }
    }
}

/// An SSE response.
#[must_use]
#[derive(Debug, Clone)]
pub struct Sse<S> {
    stream: S,
}

impl<S> Sse<S> {
    /// Create a new [`Sse`] response that will respond with the given stream of [`Event`]s.
    pub fn new<T, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Event<T>, E>>,
        E: Into<BoxError>,
        T: EventDataWrite,
    {
        Self { stream }
    }

    /// Configure the interval between keep-alive messages.
    ///
    /// Defaults to no keep-alive messages.
    pub fn with_keep_alive<T, E>(self, keep_alive: KeepAlive<T>) -> Sse<KeepAliveStream<S, T>>
    where
        S: Stream<Item = Result<Event<T>, E>>,
        E: Into<BoxError>,
        T: EventDataWrite,
    {
        Sse {
            stream: KeepAliveStream::new(keep_alive, self.stream),
        }
    }

    /// Turn `self` into an [`http::Response`] with the SSE headers set.
    pub fn into_response<T, E>(self) -> Response<SseResponseBody<S>>
    where
        S: Stream<Item = Result<Event<T>, E>>,
        E: Into<BoxError>,
        T: EventDataWrite,
    {
        let mut response = Response::new(SseResponseBody::new(self.stream));
        let headers = response.headers_mut();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/event-stream"),
        );
        // not allowed for h2+, to be filtered out by the server
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt as _, stream};
    use http_body_util::BodyExt as _;
    use std::convert::Infallible;

    #[tokio::test]
    async fn test_sse_response() {
        let stream = stream::iter(vec![
            Event::new()
                .with_data("one")
                .try_with_comment("this is a comment")
                .unwrap(),
            Event::new()
                .try_with_event("three")
                .unwrap()
                .with_retry(Duration::from_secs(30))
                .try_with_id("unique-id")
                .unwrap(),
        ])
        .map(Ok::<_, Infallible>);

        let response = Sse::new(stream).into_response();
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        assert_eq!(response.headers()["cache-control"], "no-cache");
        assert_eq!(response.headers()["connection"], "keep-alive");

        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(frame, ": this is a comment\ndata: one\n\n");
        let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(frame, "id: unique-id\nevent: three\nretry: 30000\n\n");
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn test_sse_body_stream_error() {
        let stream = stream::iter(vec![
            Ok(Event::new().with_data("ok")),
            Err(OpaqueError::from_display("boom")),
        ]);
        let mut body = SseResponseBody::new(stream);
        body.frame().await.unwrap().unwrap();
        let err = body.frame().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive() {
        let inner = stream::pending::<Result<Event<&'static str>, Infallible>>();
        let keep_alive = KeepAlive::new()
            .with_interval(Duration::from_secs(5))
            .try_with_text("ping")
            .unwrap();
        let stream = KeepAliveStream::new(keep_alive, inner);
        let mut stream = std::pin::pin!(stream);

        let start = tokio::time::Instant::now();
        for _ in 0..2 {
            let event = stream.next().await.unwrap().unwrap();
            assert_eq!(event.comment().collect::<Vec<_>>(), ["ping"]);
            assert_eq!(event.serialize().unwrap(), ": ping\n\n");
        }
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_is_not_sent_when_busy() {
        let inner = stream::iter(["a", "b"])
            .map(|data| Ok::<_, Infallible>(Event::new().with_data(data)))
            .chain(stream::pending());
        let stream = KeepAliveStream::new(KeepAlive::new(), inner);
        let mut stream = std::pin::pin!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap().data(), Some(&"a"));
        assert_eq!(stream.next().await.unwrap().unwrap().data(), Some(&"b"));
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.data(), None);
        assert_eq!(event.serialize().unwrap(), ": \n\n");
    }
}
