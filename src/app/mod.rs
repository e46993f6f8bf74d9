pub mod fetch_use_case;
pub mod ports;
pub mod push_use_case;

#[cfg(test)]
pub(crate) mod test_support;
