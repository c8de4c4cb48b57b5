//! Property-based tests for cloudrun_logger using proptest

use cloudrun_logger::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn any_field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        ".*".prop_map(FieldValue::String),
        any::<i64>().prop_map(FieldValue::Int),
        any::<bool>().prop_map(FieldValue::Bool),
        Just(FieldValue::Null),
    ]
}

/// Extra field names that never collide with keys the formatter writes
fn extra_key() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}".prop_filter("reserved key", |k| {
        !matches!(k.as_str(), "level" | "message" | "severity" | "time" | "stack")
    })
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Test that the selected level only depends on the production flag
    #[test]
    fn test_select_level(production in any::<bool>()) {
        let level = select_level(production);
        if production {
            prop_assert_eq!(level, LogLevel::Info);
        } else {
            prop_assert_eq!(level, LogLevel::Debug);
        }
    }

    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.as_name().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.as_name().to_string()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(input.parse::<LogLevel>(), Ok(level));
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Test that every extra field survives unchanged and level is removed
    #[test]
    fn test_extra_fields_preserved(
        level in any_level(),
        message in ".*",
        extras in proptest::collection::vec((extra_key(), any_field_value()), 0..8)
    ) {
        let mut record = LogRecord::new(level, message.clone());
        for (key, value) in &extras {
            record = record.with_field(key.clone(), value.clone());
        }
        let expected = record.fields.clone();

        let formatted = CloudLoggingFormatter::default().format(record).unwrap();

        prop_assert!(formatted.get("level").is_none());
        prop_assert_eq!(formatted.message(), Some(message.as_str()));
        prop_assert_eq!(formatted.severity(), Some(level.to_str()));
        prop_assert!(formatted.time().is_some());
        for (key, value) in expected.iter() {
            prop_assert_eq!(formatted.get(key), Some(value));
        }
        // message + extras + severity + time, nothing else
        prop_assert_eq!(formatted.fields().len(), expected.len() + 3);
    }

    /// Test that trace identifiers are copied verbatim
    #[test]
    fn test_trace_fields_verbatim(
        trace_id in "[0-9a-f]{32}",
        span_id in "[0-9a-f]{16}",
        sampled in proptest::option::of(any::<bool>())
    ) {
        let mut trace = TraceContext::new(trace_id.clone(), span_id.clone());
        trace.trace_sampled = sampled;
        let formatter = CloudLoggingFormatter::new(
            EnrichmentOptions::new().with_trace(move || Ok(Some(trace.clone()))),
        );

        let value = formatter
            .format(LogRecord::new(LogLevel::Info, "hello there"))
            .unwrap()
            .to_json_value();

        prop_assert_eq!(&value["logging.googleapis.com/trace"], &serde_json::json!(trace_id));
        prop_assert_eq!(&value["logging.googleapis.com/spanId"], &serde_json::json!(span_id));
        prop_assert_eq!(
            &value["logging.googleapis.com/trace_sampled"],
            &serde_json::json!(sampled.unwrap_or(true))
        );
    }

    /// Test that every formatted record is one parsable JSON line
    #[test]
    fn test_format_line_is_single_json_line(level in any_level(), message in ".*") {
        let line = CloudLoggingFormatter::default()
            .format_line(LogRecord::new(level, message.clone()))
            .unwrap();

        prop_assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(&parsed["message"], &serde_json::json!(message));
    }
}
