pub mod generate;
pub mod init;
pub mod score;
pub mod simulate;
pub mod stats;
