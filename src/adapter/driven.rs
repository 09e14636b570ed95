// 駆動される側アダプター（カタログ・レジストリ・ロガー・イベント発行者の実装）

mod in_memory_catalog;
mod in_memory_order_registry;
mod console_logger;
mod console_event_publisher;

pub use in_memory_catalog::InMemoryProductCatalog;
pub use in_memory_order_registry::InMemoryOrderRegistry;
pub use console_logger::{ConsoleLogger, LogEntry};
pub use console_event_publisher::ConsoleEventPublisher;
