pub mod account_store;
pub mod account_repo;
pub mod in_memory_store;

pub use account_store::AccountStore;
pub use account_repo::AccountRepository;
pub use in_memory_store::InMemoryAccountStore;
