//! Repository layer: one `XxxRepo` per table, all methods take a pool.

pub mod form2_response_repo;
pub mod form_response_repo;
pub mod user_repo;

pub use form2_response_repo::Form2ResponseRepo;
pub use form_response_repo::FormResponseRepo;
pub use user_repo::UserRepo;
