use crate::model::LogRecord;

/// The record expanded in the detail panel, if any.
#[derive(Debug, Default)]
pub struct DetailInspector {
    selected: Option<LogRecord>,
}

impl DetailInspector {
    pub fn open(&mut self, record: LogRecord) {
        self.selected = Some(record);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&LogRecord> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogLevel, RecordId};

    fn record(id: u64) -> LogRecord {
        LogRecord {
            id: RecordId::Number(id),
            timestamp: None,
            level: LogLevel::Error,
            message: "download failed".into(),
            source: "youtube".into(),
            details: Some("Traceback ...".into()),
        }
    }

    #[test]
    fn test_open_replaces_and_close_clears() {
        let mut inspector = DetailInspector::default();
        assert!(!inspector.is_open());

        inspector.open(record(1));
        inspector.open(record(2));
        assert_eq!(inspector.selected().unwrap().id, RecordId::Number(2));

        inspector.close();
        assert!(inspector.selected().is_none());
    }
}
