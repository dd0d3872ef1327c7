pub mod device;
pub mod print;
pub mod timer;
pub mod traits;
