//! Benchmark crate for fixturefs; see `benches/`.
