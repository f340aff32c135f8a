//! Unit tests for the orchestration services.

mod fleet_service_tests;
