//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the mock rig.  All tests run on the host (x86_64) with no
//! real hardware required.

mod dispatcher_tests;
mod lifecycle_tests;
