//! Benchmarks for whole subsystems under realistic load.

mod drums;
mod engine;
mod voices;

pub use drums::bench_drums;
pub use engine::bench_engine;
pub use voices::bench_voices;
