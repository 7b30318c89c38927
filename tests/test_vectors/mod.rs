// Shared vector documents for the integration tests

pub mod documents;
