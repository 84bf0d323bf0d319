pub mod command;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::command::CartCommandService;
pub use self::query::CartQueryService;
