/// Formats a message and hands it to a [`Reporter`](crate::report::Reporter),
/// much like `tracing::event!` but without touching any global state.
/// You can pass in a starting time and the elapsed run time gets appended.
/// ```ignore
/// record!(reporter, Level::INFO, "str {}, {}", 1, 2);
/// let time = Local::now();
/// record!(reporter, Level::INFO, time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! record {
    ($reporter:expr, $level:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        $crate::report::Reporter::record(&$reporter, $level, &format!($strfm $(, $arg)*));
    }};
    ($reporter:expr, $level:expr, $time:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        let run_time = (::chrono::Local::now() - $time)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        $crate::report::Reporter::record(
            &$reporter,
            $level,
            &format!("{} (runtime: {} sec)", format!($strfm $(, $arg)*), run_time),
        );
    }};
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use crate::report::{Level, MemoryReporter};

    #[test]
    fn formats_arguments() {
        let reporter = MemoryReporter::new();
        record!(reporter, Level::WARN, "page {}/{}", 2, 5);
        assert_eq!(reporter.records(), vec![(Level::WARN, "page 2/5".to_string())]);
    }

    #[test]
    fn appends_runtime_when_given_a_start_time() {
        let reporter = MemoryReporter::new();
        let start = Local::now();
        record!(reporter, Level::INFO, start, "done with {}", "batch");
        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].1.starts_with("done with batch (runtime: "));
        assert!(records[0].1.ends_with(" sec)"));
    }
}
