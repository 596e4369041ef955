// Domain modules
//
// Each domain follows the layout:
// - actions/: business logic called from edges
// - data/: GraphQL types
// - edges/: GraphQL resolvers (thin wrappers over actions)
// - models/: plain domain types

pub mod admissions;
pub mod auth;
pub mod content;
pub mod inquiries;
