pub mod repositories;
pub mod services;

#[cfg(test)]
mod trash_flow_test;
