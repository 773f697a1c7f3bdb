mod rpc_method;
pub use rpc_method::*;
mod transport_interface;
pub use transport_interface::*;
