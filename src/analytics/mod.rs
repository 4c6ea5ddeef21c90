pub mod patterns;
pub mod weekly;
