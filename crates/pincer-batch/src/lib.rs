pub mod driver;

pub use driver::{run_batch, run_batch_parallel, BatchOptions};
