pub mod command;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;
