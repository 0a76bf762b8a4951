//! 领域层
//!
//! 商品实体、状态、仓储接口

pub mod entities;
pub mod enums;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use enums::*;
pub use repositories::*;
pub use value_objects::*;
