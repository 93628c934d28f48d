pub use factories::*;
