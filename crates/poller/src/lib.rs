pub mod client;
pub mod poller;

pub use client::{ReviewApi, ReviewClient};
pub use poller::{CycleOutcome, HomeworkPoller};
