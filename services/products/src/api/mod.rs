//! API layer - gRPC service implementations

mod conversions;
mod grpc_service;
mod proto_converters;

pub use conversions::*;
pub use grpc_service::ProductServiceImpl;
pub use proto_converters::*;
