pub mod excel_ops;
pub mod excel_runtime;
pub mod helpers;
pub mod host;

#[cfg(test)]
pub mod testing;
