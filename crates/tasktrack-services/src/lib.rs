pub mod client;
pub mod group;
pub mod todo;

pub use client::{ApiClient, ApiResult};
pub use group::{Group, GroupCreateRequest, GroupUpdateRequest};
pub use todo::{Todo, TodoCreateRequest, TodoQuery};
