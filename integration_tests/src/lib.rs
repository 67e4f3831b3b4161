//! Cross-contract workflow tests for the dividend and salary engines live
//! in `tests/`; this crate only carries their shared dependency set.
