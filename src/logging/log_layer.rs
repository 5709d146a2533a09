use std::{collections::BTreeMap, time::SystemTime};

use crate::logging::{EventSpan, LogEvent};
use tracing::{info, Level};
use tracing_subscriber::Layer;

/// Collects the `LogEvent`s emitted under a span tree and logs them as one
/// entry when the root span closes.
#[derive(Default)]
pub struct VotingLogsLayer {
    pub prod: bool,
    pub log_type: &'static str,
}

impl<S> Layer<S> for VotingLogsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        _attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if *span.metadata().level() > Level::INFO {
            return;
        }

        let mut extensions = span.extensions_mut();
        extensions.insert(EventSpan::new(span.name()));
        extensions.insert(StartTime(SystemTime::now()));
    }

    fn on_close(&self, id: tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if *span.metadata().level() > Level::INFO {
            return;
        }

        let mut extensions = span.extensions_mut();
        if let Some(mut event_span) = extensions.remove::<EventSpan>() {
            event_span.latency = match extensions.remove::<StartTime>() {
                Some(start) => SystemTime::now()
                    .duration_since(start.0)
                    .map(|elapsed| elapsed.as_millis() as u64)
                    .unwrap_or_default(),
                None => 0,
            };

            match span.scope().nth(1) {
                Some(parent) => {
                    let mut extensions = parent.extensions_mut();
                    if let Some(parent_event_span) = extensions.get_mut::<EventSpan>() {
                        parent_event_span.children.push(event_span);
                    }
                }
                None => {
                    if event_span.is_empty() {
                        return;
                    }
                    let entry = serde_json::to_string(&event_span).unwrap_or_default();
                    if self.prod {
                        info!(
                            labels.log_type = self.log_type,
                            labels.handler = span.name(),
                            entry = entry.as_str(),
                            "'{}' log entry",
                            span.name()
                        );
                    } else {
                        info!("'{}' log entry ==> {}", span.name(), entry);
                    }
                }
            }
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if let Some(scope) = ctx.event_scope(event) {
            if let Some(span) = scope.into_iter().next() {
                let mut extensions = span.extensions_mut();
                if let Some(event_span) = extensions.get_mut::<EventSpan>() {
                    let collector = FieldCollector::new(event);
                    if let Some(Field::Str(encoded)) = collector.fields.get("event") {
                        if let Ok(log) = serde_json::from_str::<LogEvent>(encoded) {
                            event_span.events.push(log);
                        }
                    }
                }
            }
        }
    }
}

struct StartTime(SystemTime);

struct FieldCollector {
    fields: BTreeMap<&'static str, Field>,
}

enum Field {
    Other,
    Str(String),
}

impl FieldCollector {
    fn new(event: &tracing::Event<'_>) -> Self {
        let mut collector = FieldCollector {
            fields: BTreeMap::new(),
        };
        event.record(&mut collector);
        collector
    }
}

impl tracing::field::Visit for FieldCollector {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name(), Field::Str(value.to_owned()));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {
        self.fields.insert(field.name(), Field::Other);
    }
}
