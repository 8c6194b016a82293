pub mod form;
pub mod results;
pub mod view;

pub use view::PricingPage;
