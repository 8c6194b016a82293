pub mod self_test;
pub mod serve;

pub use self_test::self_test;
pub use serve::serve;
