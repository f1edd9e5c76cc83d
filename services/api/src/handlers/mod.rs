pub mod guest;
pub mod login;
pub mod root;
