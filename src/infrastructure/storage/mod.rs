mod preferences;

pub use preferences::*;
