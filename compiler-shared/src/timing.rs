//! Measures time taken by single phases of the compiler.
//!
//! This is NOT an utility that should be used for benchmarking!
//! Benchmarking involves running a program multiple times with
//! warm up phases and median/avg/stddev of measurements.
//!
//! Output is controlled by two environment variables: `MEASURE_STDERR`
//! prints a table of all phases, `MEASURE_JSON=<path>` dumps them as json.
use std::{
    fmt,
    fs::File,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

lazy_static::lazy_static! {
    static ref TIMINGS: Mutex<Timings> = Mutex::new(Timings { measurements: Vec::new() });
}

fn timings() -> MutexGuard<'static, Timings> {
    // a panic while holding the lock cannot leave the vec half-written
    TIMINGS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone)]
pub struct Measurement {
    start: Instant,
    label: String,
}

impl Measurement {
    pub fn start(label: &str) -> Measurement {
        Self {
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    pub fn stop(&self) {
        let measurement = CompletedMeasurement {
            label: self.label.clone(),
            start: self.start,
            stop: Instant::now(),
        };
        timings().measurements.push(measurement);
    }

    pub fn guard(label: &str) -> MeasurementGuard {
        MeasurementGuard(Measurement::start(label))
    }
}

pub struct MeasurementGuard(Measurement);

impl Drop for MeasurementGuard {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Measure the time until the end of the enclosing scope.
#[macro_export]
macro_rules! timed_scope {
    ($label:expr) => {
        let _measurement = $crate::timing::Measurement::guard($label);
    };
}

#[derive(Debug, Clone)]
struct CompletedMeasurement {
    start: Instant,
    stop: Instant,
    label: String,
}

impl CompletedMeasurement {
    fn duration(&self) -> Duration {
        self.stop.duration_since(self.start)
    }
}

#[derive(Debug, Clone)]
struct Timings {
    measurements: Vec<CompletedMeasurement>,
}

impl<'a> fmt::Display for AsciiDisp<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min_label_width = 50;

        for timing in self.0 {
            let indent = "  ".repeat(timing.indent);

            writeln!(
                f,
                "{nesting}{: <label_width$}    {: >ms_width$}ms",
                timing.label,
                timing.duration.as_millis(),
                nesting = indent,
                label_width = min_label_width - indent.len(),
                ms_width = 6
            )?;
        }

        Ok(())
    }
}

/// Frozen copy of all measurements completed so far.
pub fn snapshot() -> CompilerMeasurements {
    CompilerMeasurements::from(timings().clone())
}

pub fn print() -> Result<(), failure::Error> {
    if std::env::var("MEASURE_STDERR").is_ok() {
        eprintln!("Performance Analysis");
        eprintln!("====================\n");
        eprintln!("{}", AsciiDisp(&snapshot()));
    }

    if let Ok(path) = std::env::var("MEASURE_JSON") {
        let file = File::create(path)?;
        serde_json::to_writer(file, &snapshot())?;
    }

    Ok(())
}

// Frozen and completed measurements that can be serialized
pub type CompilerMeasurements = Vec<SingleMeasurement>;
pub struct AsciiDisp<'a>(pub &'a CompilerMeasurements);

impl From<Timings> for CompilerMeasurements {
    fn from(measurements: Timings) -> Self {
        let mut frozen = vec![];
        let mut active = vec![];

        let mut listing = measurements.measurements;
        listing.sort_by(|a, b| a.start.cmp(&b.start));

        for timing in listing {
            active.retain(|measurement: &CompletedMeasurement| measurement.stop > timing.start);

            frozen.push(SingleMeasurement {
                label: timing.label.clone(),
                indent: active.len(),
                duration: timing.duration(),
            });

            active.push(timing);
        }

        frozen
    }
}

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct SingleMeasurement {
    pub label: String,
    pub indent: usize,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_measurements_are_indented() {
        {
            let _outer = Measurement::guard("timing test: outer");
            std::thread::sleep(Duration::from_millis(1));
            {
                let _inner = Measurement::guard("timing test: inner");
            }
        }

        let frozen = snapshot();
        let outer = frozen
            .iter()
            .find(|m| m.label == "timing test: outer")
            .unwrap();
        let inner = frozen
            .iter()
            .find(|m| m.label == "timing test: inner")
            .unwrap();
        assert!(inner.indent > outer.indent);

        let table = AsciiDisp(&frozen).to_string();
        assert!(table.contains("  timing test: inner"));
    }

    #[test]
    fn print_writes_json_when_asked_to() {
        let path = std::env::temp_dir().join(format!("measure-{}.json", std::process::id()));
        {
            timed_scope!("timing test: json");
        }

        std::env::set_var("MEASURE_JSON", &path);
        let printed = print();
        std::env::remove_var("MEASURE_JSON");
        printed.unwrap();

        let file = File::open(&path).unwrap();
        let measurements: CompilerMeasurements = serde_json::from_reader(file).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(measurements
            .iter()
            .any(|measurement| measurement.label == "timing test: json"));
    }
}
