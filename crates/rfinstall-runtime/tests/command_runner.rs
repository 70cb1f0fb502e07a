//! Process runner behaviour observed from outside the crate.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use rfinstall_core::LogSinkPort;
use rfinstall_runtime::{CommandLine, CommandRunnerPort, ProcessCommandRunner};

/// Sink that stamps every line with its arrival time.
#[derive(Default)]
struct TimedSink {
    lines: Mutex<Vec<(Instant, String)>>,
}

impl LogSinkPort for TimedSink {
    fn append(&self, line: String) {
        self.lines.lock().unwrap().push((Instant::now(), line));
    }
}

#[tokio::test]
async fn test_output_reaches_sink_before_exit() {
    let sink = TimedSink::default();
    let command = CommandLine::new("sh")
        .arg("-c")
        .arg("echo first; sleep 1; echo second");

    let ok = ProcessCommandRunner::new().run(&command, &sink).await.unwrap();
    let finished = Instant::now();
    assert!(ok);

    let lines = sink.lines.into_inner().unwrap();
    let texts: Vec<&str> = lines.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(&texts[1..], &["first", "second"]);

    let first_at = lines[1].0;
    assert!(finished.duration_since(first_at) >= Duration::from_millis(500));
}

#[tokio::test]
async fn test_interleaved_streams_keep_order() {
    let sink = TimedSink::default();
    let script = "for i in 1 2 3; do echo out$i; echo err$i 1>&2; done";
    let command = CommandLine::new("sh").arg("-c").arg(script);

    assert!(ProcessCommandRunner::new().run(&command, &sink).await.unwrap());

    let lines = sink.lines.into_inner().unwrap();
    let texts: Vec<&str> = lines.iter().skip(1).map(|(_, l)| l.as_str()).collect();
    assert_eq!(texts, vec!["out1", "err1", "out2", "err2", "out3", "err3"]);
}
