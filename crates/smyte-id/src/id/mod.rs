mod layout;
mod machine;
mod smyte;

pub use machine::*;
pub use smyte::*;
