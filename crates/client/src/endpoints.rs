//! Backend endpoint paths consumed by this core.

pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const REFRESH: &str = "/auth/refresh";
pub const ME: &str = "/me";
pub const USER_MENU_TREE: &str = "/api/v1/menu/user/tree";
