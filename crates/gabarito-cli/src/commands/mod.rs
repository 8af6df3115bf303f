pub mod init;
pub mod normalize;
pub mod resolve;
pub mod score;
pub mod validate;
