#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod assertions;
pub mod case;
pub mod cases;
pub mod error;
pub mod host;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod suite;

pub use assertions::{assert_equal, assert_not_same, assert_pixel_approx, assert_same};
pub use case::{Completion, TestCase, TestContext};
pub use cases::builtin_suite;
pub use error::{ConformanceError, ConformanceResult};
pub use host::software::SoftwareHost;
pub use host::{
    CanvasHost, HostError, HostResult, RenderingContext2d, Rgba, Surface, CONTEXT_2D,
};
pub use outcome::{CaseError, CaseResult, CaseSignal, Failure, Outcome};
pub use report::{CaseReport, OutcomeKind, RunReport, Summary};
pub use runner::{Runner, RunnerConfig};
pub use suite::Suite;
