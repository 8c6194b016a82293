pub mod layout;
pub mod pricing;
