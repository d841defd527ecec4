//! Test doubles for exercising viewhost-core's anchor bookkeeping.

pub mod testing;

// Re-export testing utilities
pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
