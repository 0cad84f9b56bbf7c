pub mod mock_provider;
pub mod test_setup;
