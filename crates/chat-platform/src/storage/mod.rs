pub mod memory;
pub mod local;
pub mod auto;

pub use memory::MemoryStorage;
pub use local::LocalStorage;
pub use auto::open_storage;
