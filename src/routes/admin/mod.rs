mod subscribers;

pub use subscribers::*;
