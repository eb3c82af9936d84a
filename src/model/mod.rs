pub mod artifact;
pub mod definition;
pub mod enums;
pub mod process;

pub use artifact::*;
pub use definition::*;
pub use enums::*;
pub use process::*;
