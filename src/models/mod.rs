pub mod coordinate;
pub mod district;
pub mod feature_record;
pub mod prediction;
pub mod property;
pub mod session;
