use std::io;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tdview::{NullSurface, Viewer};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn load_logs_entity_counts_once() {
    let graph = json!({
        "vertices": [{"id": 0}, {"id": 1}, {"id": 2}],
        "arcs": [
            {"id": 0, "source": 0, "target": 1},
            {"id": 1, "source": 1, "target": 2},
            {"id": 2, "source": 2, "target": 0}
        ],
        "dualgraph": {"vertices": [{"id": 0}], "arcs": [], "bags": [[{"id": 0}]]},
        "faces": [{"id": 0, "arcs": [0, 1, 2], "vertices": [0, 1, 2]}]
    })
    .to_string();

    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let mut viewer = Viewer::default();
        viewer.load_json(&graph, "", &mut NullSurface).unwrap();
    });

    let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    let count_lines: Vec<&str> = out.lines().filter(|l| l.contains("vertices=3")).collect();
    assert_eq!(count_lines.len(), 1, "log output:\n{out}");
    assert!(count_lines[0].contains("INFO"));
}
