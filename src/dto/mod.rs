mod requests;
mod responses;

pub use requests::{LoginRequest, PostListQuery};
pub use responses::{AuthResponse, PostDetailResponse, PostListResponse};
