pub mod console;
pub mod file_store;
pub mod memory_store;
pub mod session;

pub use console::ConsoleNotifier;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use session::StoredSessionManager;
