pub mod audit;
pub mod constants;
pub mod pagination;
pub mod query;
pub mod record;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
