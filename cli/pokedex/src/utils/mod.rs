pub mod display;
pub mod init;
pub mod message;
pub mod presenter;
