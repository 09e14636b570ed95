// アダプター層
// ポートの実装（driven）と外部からの入力の変換（driver）

pub mod driven;
pub mod driver;
pub mod server_config;

pub use server_config::ServerConfig;
