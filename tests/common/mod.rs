#![allow(dead_code)]

pub use wavedag_test_utils::builders;
pub use wavedag_test_utils::fake_executor::FakeExecutor;
pub use wavedag_test_utils::{init_tracing, with_timeout};
