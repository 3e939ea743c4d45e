#![warn(clippy::unwrap_used)]

pub mod client;
pub mod settings;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::*;
pub use settings::*;
pub use types::*;

#[cfg(test)]
#[ctor::ctor]
fn _setup() {
    crate::test_utils::logger();
}
