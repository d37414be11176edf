//! Common test utilities for minibuild integration tests

#![allow(dead_code)]

use std::sync::Arc;

use minibuild::{Context, Coordinate, MemorySink};

/// Context wired to a collecting sink; keep the sink to assert on lines
pub fn context() -> (Context, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (Context::new(sink.clone()), sink)
}

/// The coordinate used throughout the integration tests
pub fn widget_coordinate() -> Coordinate {
    Coordinate::builder()
        .group("org.example.tools")
        .artifact("widget")
        .version("1.0.0")
        .build()
        .expect("valid coordinate")
}

/// Repository-relative path of [`widget_coordinate`]
pub const WIDGET_PATH: &str = "org/example/tools/widget/1.0.0/widget-1.0.0.zip";
