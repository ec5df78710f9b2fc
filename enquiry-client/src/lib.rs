pub mod config;
pub mod enquiries;
pub mod form;
pub mod http;
pub mod intent;
pub mod reviews;

#[cfg(test)]
mod testing;
