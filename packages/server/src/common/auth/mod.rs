// Authorization helpers shared by resolvers

mod errors;

pub use errors::AuthError;
