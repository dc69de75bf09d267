pub mod login;
pub mod pin;
pub mod register;
pub mod sweep;
pub mod token;
