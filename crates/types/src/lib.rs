pub mod codec;
pub mod error;
pub mod intent;
pub mod validation;

pub use codec::*;
pub use error::*;
pub use intent::*;
pub use validation::*;

pub const PROTOCOL_VERSION: &str = "1.0";
