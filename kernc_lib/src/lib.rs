pub mod compile;
pub mod diagnostic;
pub mod passes;
pub mod printer;
pub mod token;
pub mod types;
mod util;
pub mod value;
