pub mod lookup;
pub mod pricing;
pub mod scheduling;
pub mod store;
pub mod wizard;
