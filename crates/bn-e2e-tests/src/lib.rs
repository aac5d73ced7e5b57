//! End-to-end tests for botnlu live under `tests/`.
