// kind of trying to load based on dependency order here, but it's not perfect.
pub mod holder;
pub mod denomination;
pub mod stack;
pub mod container;
pub mod account;
