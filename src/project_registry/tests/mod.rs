//! Unit tests for the project registry services.

mod apply_config_tests;
