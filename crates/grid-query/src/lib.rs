#![warn(clippy::pedantic)]

pub mod cancel;
pub mod running;

pub use cancel::QueryCancel;
pub use running::RunningQueryInfo;
