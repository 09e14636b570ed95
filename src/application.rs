// アプリケーション層
// ポートを組み合わせてユースケースを実現する

pub mod error;
pub mod service;

pub use error::ApplicationError;
