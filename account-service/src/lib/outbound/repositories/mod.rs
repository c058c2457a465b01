pub mod account;
pub mod memory;
pub mod role;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryRoleRepository;
pub use role::PostgresRoleRepository;
