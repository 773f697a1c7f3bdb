pub mod constants;
pub mod frame;
pub mod rpc;
pub mod utils;
