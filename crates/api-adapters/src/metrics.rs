//! Prometheus counters for the write-side events of the blog.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue, LabelValueEncoder};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Event {
    Signup,
    Login,
    PostCreated,
    PostDeleted,
    CommentCreated,
    CommentDeleted,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::PostCreated => "post_created",
            Self::PostDeleted => "post_deleted",
            Self::CommentCreated => "comment_created",
            Self::CommentDeleted => "comment_deleted",
        }
    }
}

impl EncodeLabelValue for Event {
    fn encode(&self, encoder: &mut LabelValueEncoder<'_>) -> Result<(), std::fmt::Error> {
        encoder.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl EncodeLabelValue for Outcome {
    fn encode(&self, encoder: &mut LabelValueEncoder<'_>) -> Result<(), std::fmt::Error> {
        encoder.write_str(match self {
            Self::Success => "success",
            Self::Failure => "failure",
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct EventLabels {
    pub event: Event,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub struct Metrics {
    registry: Registry,
    events: Family<EventLabels, Counter>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let events = Family::<EventLabels, Counter>::default();
        registry.register(
            "blog_events",
            "Signups, logins and content writes by outcome",
            events.clone(),
        );
        Self { registry, events }
    }

    pub fn record(&self, event: Event, outcome: Outcome) {
        self.events
            .get_or_create(&EventLabels { event, outcome })
            .inc();
    }

    /// Records the outcome of `result` and hands it back unchanged.
    pub fn observe<T, E>(&self, event: Event, result: Result<T, E>) -> Result<T, E> {
        let outcome = if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        self.record(event, outcome);
        result
    }

    pub fn count(&self, event: Event, outcome: Outcome) -> u64 {
        self.events
            .get_or_create(&EventLabels { event, outcome })
            .get()
    }

    /// OpenMetrics text exposition of every registered metric.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut body = String::new();
        encode(&mut body, &self.registry)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_tracked_per_event_and_outcome() {
        let metrics = Metrics::new();
        metrics.record(Event::Signup, Outcome::Success);
        metrics.record(Event::Signup, Outcome::Success);
        metrics.record(Event::Signup, Outcome::Failure);

        assert_eq!(metrics.count(Event::Signup, Outcome::Success), 2);
        assert_eq!(metrics.count(Event::Signup, Outcome::Failure), 1);
        assert_eq!(metrics.count(Event::Login, Outcome::Success), 0);
    }

    #[test]
    fn observe_passes_the_result_through() {
        let metrics = Metrics::new();
        let ok: Result<u8, ()> = metrics.observe(Event::PostCreated, Ok(7));
        let err: Result<u8, ()> = metrics.observe(Event::PostCreated, Err(()));

        assert_eq!(ok, Ok(7));
        assert_eq!(err, Err(()));
        assert_eq!(metrics.count(Event::PostCreated, Outcome::Success), 1);
        assert_eq!(metrics.count(Event::PostCreated, Outcome::Failure), 1);
    }

    #[test]
    fn render_exposes_snake_case_labels() {
        let metrics = Metrics::new();
        metrics.record(Event::CommentDeleted, Outcome::Failure);

        let body = metrics.render().unwrap();
        assert!(body.contains("blog_events_total"));
        assert!(body.contains(r#"event="comment_deleted""#));
        assert!(body.contains(r#"outcome="failure""#));
        assert!(body.ends_with("# EOF\n"));
    }
}
