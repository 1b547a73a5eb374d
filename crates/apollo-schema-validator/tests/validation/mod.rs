mod interfaces;
mod memoization;
mod registry;
mod reporting;
mod root_operations;
mod rules;
