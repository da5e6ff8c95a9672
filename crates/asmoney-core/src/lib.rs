pub mod api;
pub mod config;
pub mod error;
pub mod rpc;
#[cfg(test)]
mod test_util;
pub mod types;

pub use api::{Asmoney, Operation};
pub use config::{Config, ConfigSource};
pub use error::{CoreError, RpcError};
pub use types::{BatchNumber, ResultCode};
