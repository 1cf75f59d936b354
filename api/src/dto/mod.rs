pub mod identity;

pub use identity::{
    AuthFailedResponse, AuthResponse, AuthSuccessResponse, LoginRequest, RefreshRequest, RegisterRequest,
};
