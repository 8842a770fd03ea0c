use serde_derive::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    io::{self, Write},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};
use tracing::*;

/// Thread safe json logger that writes a [`SearchRecord`] into `W` for every search event.
/// Fields that an event leaves out are taken from the `@search_step` span it is emitted in.
///
/// Writing is best effort: a record that fails to serialize or write is dropped without
/// affecting the search that emitted it.
pub struct JsonLogger<W: Write> {
    writer: Mutex<W>,
    next_id: AtomicU64,
    dropped: AtomicU64,
    spans: Mutex<HashMap<u64, Recorder>>,
    stack: Mutex<Vec<u64>>,
}

impl<W: Write> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            next_id: AtomicU64::new(1),
            dropped: AtomicU64::new(0),
            spans: Mutex::new(HashMap::new()),
            stack: Mutex::new(Vec::new()),
        }
    }

    fn current_span(&self) -> Option<Recorder> {
        let id = self.stack.lock().ok()?.last().copied()?;
        self.spans.lock().ok()?.get(&id).cloned()
    }

    /// Writes `record`, dropping it if it cannot be written.
    fn write(&self, record: &SearchRecord) {
        let written = serde_json::to_string_pretty(record)
            .map_err(io::Error::from)
            .and_then(|json| match self.writer.lock() {
                Ok(mut writer) => writeln!(writer, "{}", json),
                Err(_) => Err(io::Error::new(io::ErrorKind::Other, "poisoned writer")),
            });
        if written.is_err() {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Returns the number of records that could not be written.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl<W: Write + 'static> subscriber::Subscriber for JsonLogger<W> {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn new_span(&self, span: &span::Attributes) -> Id {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = Recorder::default();
        span.record(&mut record);
        if let Ok(mut spans) = self.spans.lock() {
            spans.insert(id, record);
        }
        Id::from_u64(id)
    }

    fn record(&self, span: &Id, values: &span::Record) {
        if let Ok(mut spans) = self.spans.lock() {
            if let Some(record) = spans.get_mut(&span.into_u64()) {
                values.record(record);
            }
        }
    }

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);
        if let Some(span) = self.current_span() {
            recorder.inherit(span);
        }

        if let Some(event_type) = &recorder.event {
            match event_type.as_str() {
                super::EXACT
                | super::CANDIDATE
                | super::DERIVED
                | super::EXTEND
                | super::FAIL
                | super::DEPTH => {
                    if let Some(record) = SearchRecord::from_recorder(recorder) {
                        self.write(&record);
                    }
                }
                _ => (),
            }
        }
    }

    fn enter(&self, span: &Id) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.push(span.into_u64());
        }
    }

    fn exit(&self, _span: &Id) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.pop();
        }
    }
}

/// A record of one search event, with the target and remaining depth of the search it belongs
/// to and, depending on the event, the candidate rule, its premises or the derived theorem.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchRecord {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theorem: Option<String>,
}

impl SearchRecord {
    fn from_recorder(value: Recorder) -> Option<Self> {
        Some(Self {
            event: value.event?,
            target: value.target,
            depth: value.depth,
            rule: value.rule,
            premises: value.premises,
            theorem: value.theorem,
        })
    }
}

/// Generic trace visitor to collect as many fields as it can.
#[derive(Clone, Default)]
struct Recorder {
    event: Option<String>,
    target: Option<String>,
    depth: Option<u64>,
    rule: Option<String>,
    premises: Option<String>,
    theorem: Option<String>,
}

impl Recorder {
    /// Fills the fields that the receiver is missing from the record of its span.
    fn inherit(&mut self, span: Recorder) {
        self.target = self.target.take().or(span.target);
        self.depth = self.depth.or(span.depth);
    }
}

impl field::Visit for Recorder {
    fn record_u64(&mut self, field: &field::Field, value: u64) {
        if field.name() == super::DEPTH_FIELD {
            self.depth = Some(value);
        }
    }

    fn record_str(&mut self, field: &field::Field, value: &str) {
        if field.name() == super::EVENT_FIELD {
            self.event = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        match field.name() {
            super::TARGET_FIELD => self.target = Some(format!("{:?}", value)),
            super::RULE_FIELD => self.rule = Some(format!("{:?}", value)),
            super::PREMISES_FIELD => self.premises = Some(format!("{:?}", value)),
            super::THEOREM_FIELD => self.theorem = Some(format!("{:?}", value)),
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{search::search_recursive, test_prelude::*};
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn records(&self) -> Vec<SearchRecord> {
            let bytes = self.0.lock().unwrap().clone();
            let text = String::from_utf8(bytes).unwrap();
            serde_json::Deserializer::from_str(&text)
                .into_iter::<SearchRecord>()
                .map(|r| r.unwrap())
                .collect()
        }
    }

    #[test]
    fn test_exact_match_record() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone());
        tracing::subscriber::with_default(logger, || {
            search_recursive(&modus_ponens_theory(), &P(), 3).unwrap();
        });

        let records = buffer.records();
        assert_eq!(1, records.len());
        assert_eq!(
            SearchRecord {
                event: "@exact".to_string(),
                target: Some("P".to_string()),
                depth: Some(3),
                rule: None,
                premises: None,
                theorem: Some("⊢ P".to_string()),
            },
            records[0]
        );
    }

    #[test]
    fn test_derivation_records() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone());
        tracing::subscriber::with_default(logger, || {
            search_recursive(&mixed_theory(), &conj(Q(), P()), 3).unwrap();
        });

        let events: Vec<String> = buffer.records().into_iter().map(|r| r.event).collect();
        assert!(events.contains(&"@candidate".to_string()));
        assert!(events.contains(&"@derived".to_string()));
        assert!(events.contains(&"@extend".to_string()));
        // a theorem is reported derived once the theory is extended with it
        let tail: Vec<&str> = events.iter().rev().take(2).map(|e| e.as_str()).collect();
        assert_eq!(vec!["@derived", "@extend"], tail);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failures_do_not_stop_search() {
        let logger = Arc::new(JsonLogger::new(Broken));
        let outcome = tracing::subscriber::with_default(logger.clone(), || {
            search_recursive(&mixed_theory(), &conj(Q(), P()), 3).unwrap()
        });
        assert!(outcome.is_success());
        assert!(logger.dropped() > 0);
    }

    #[test]
    fn test_ignores_unknown_events() {
        let buffer = Buffer::default();
        let logger = JsonLogger::new(buffer.clone());
        tracing::subscriber::with_default(logger, || {
            info!(event = "@unknown", target = %P());
            info!("no event field");
        });
        assert!(buffer.records().is_empty());
    }
}
