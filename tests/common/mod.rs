// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: not every test binary uses all of them
#[allow(unused_imports)]
pub use engine::{FakeEngine, State};
#[allow(unused_imports)]
pub use fixtures::{movies_for_faceting, Movie};
#[allow(unused_imports)]
pub use helpers::{set_up_index_for_faceting, test_client};
