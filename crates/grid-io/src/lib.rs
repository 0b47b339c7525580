#![warn(clippy::pedantic)]

pub mod access;
pub mod array;
pub mod buffer;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod stream;

mod utf;

pub use access::RandomAccess;
pub use array::{ABSENT_LEN, Element};
pub use buffer::BufferInput;
pub use config::InputConfig;
pub use error::InputError;
pub use grid::GridInput;
pub use input::{DataInput, GridDataInput};
pub use stream::StreamInput;
