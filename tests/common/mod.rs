pub mod producers;

pub use producers::*;
