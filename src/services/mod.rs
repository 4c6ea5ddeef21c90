pub mod classify;
pub mod recommend;
