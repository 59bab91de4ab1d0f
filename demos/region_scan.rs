//! Region Scan
//!
//! Drives a tracker over a few small C snippets and prints which lines
//! fall inside the kept regions of `TEST_PP_CONDITIONAL`.
//!
//! Key concepts:
//! - A front end classifies each directive (here: a naive line scanner)
//! - A text-aware sink turns begin/end calls into line markers
//! - The end-of-stream check catches unterminated regions
//!
//! Run with: RUST_LOG=pp_region=debug cargo run --example region_scan

use pp_region::{ActionSink, Directive, RegionTracker, TrackerError};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

const SYMBOL: &str = "TEST_PP_CONDITIONAL";

/// Sink that remembers on which line each region starts and ends.
#[derive(Default)]
struct LineMarkers {
    line: usize,
    begin: Option<usize>,
    regions: Vec<(usize, usize)>,
}

impl ActionSink for LineMarkers {
    fn begin_region(&mut self) {
        self.begin = Some(self.line);
    }

    fn end_region(&mut self) {
        if let Some(begin) = self.begin.take() {
            self.regions.push((begin, self.line));
        }
    }

    fn push(&mut self) {}
    fn pop(&mut self) {}
}

fn scan(corpus: &str, defined: &HashSet<&str>) -> Result<Vec<(usize, usize)>, TrackerError> {
    let mut tracker = RegionTracker::new(SYMBOL, LineMarkers::default())
        .expect("symbol is a valid identifier");

    for (line, text) in corpus.lines().enumerate() {
        let Some(rest) = text.trim_start().strip_prefix('#') else {
            continue;
        };
        let rest = rest.trim_start();
        let (keyword, expression) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let expression = expression.split("//").next().unwrap_or("").trim();
        let Some(directive) = Directive::from_keyword(keyword) else {
            continue;
        };

        tracker.sink_mut().line = line;
        let value = defined.contains(expression);
        tracker.process_directive(directive, expression, value);
    }

    Ok(tracker.finish()?.regions)
}

fn report(title: &str, corpus: &str, defined: &HashSet<&str>) {
    println!("\n{title}:");
    match scan(corpus, defined) {
        Ok(regions) if regions.is_empty() => println!("  no regions"),
        Ok(regions) => {
            let lines: Vec<&str> = corpus.lines().collect();
            for (begin, end) in regions {
                println!("  region after line {} up to line {}:", begin + 1, end + 1);
                for text in lines.get(begin + 1..end).unwrap_or_default() {
                    println!("    | {text}");
                }
            }
        }
        Err(e) => println!("  error: {e}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let defined: HashSet<&str> = [SYMBOL].into_iter().collect();

    report(
        "Ignored PP code",
        "#ifdef SOME_UNKNOWN_MACRO\n\
         some code here\n\
         #else\n\
         some other code here\n\
         #endif  // SOME_UNKNOWN_MACRO\n",
        &defined,
    );

    report(
        "Simple matching PP code",
        "#ifdef TEST_PP_CONDITIONAL\n\
         some code here\n\
         #endif\n",
        &defined,
    );

    report(
        "Matching PP if/else/endif",
        "#ifdef TEST_PP_CONDITIONAL\n\
         some code here\n\
         #else\n\
         some other code here\n\
         #endif  // TEST_PP_CONDITIONAL\n",
        &defined,
    );

    report(
        "Matching PP if/else/endif, condition false",
        "#ifndef TEST_PP_CONDITIONAL\n\
         some code here\n\
         #else\n\
         some other code here\n\
         #endif  // TEST_PP_CONDITIONAL\n",
        &defined,
    );

    report(
        "Matching PP if/else/endif with nested ifdefs",
        "#ifdef TEST_PP_CONDITIONAL\n\
         code we want here\n\
         #ifdef UNDEFINED_MACRO\n\
         #endif  // UNDEFINED_MACRO\n\
         some other code we want\n\
         #else\n\
         code we do NOT want\n\
         #ifdef OTHER_UNDEFINED_MACRO\n\
         other code we do not want\n\
         #else\n\
         yet more code we do not want\n\
         #endif  // OTHER_UNDEFINED_MACRO\n\
         still more code we do not want\n\
         #endif  // TEST_PP_CONDITIONAL\n",
        &defined,
    );

    report(
        "Truncated input",
        "#ifdef TEST_PP_CONDITIONAL\n\
         never closed\n",
        &defined,
    );
}
