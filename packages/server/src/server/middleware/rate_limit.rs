// Rate limiting settings for tower-governor
//
// Per client IP: 10 requests per second with bursts of 20. The OTP and
// password reset mutations trigger SMS and email sends upstream, so the
// limiter sits in front of /graphql and the Google routes.
//
// Applied in app.rs as a GovernorLayer.

/// Base replenish rate per client IP
pub const REQUESTS_PER_SECOND: u64 = 10;

/// Requests allowed in a burst before throttling starts
pub const BURST_SIZE: u32 = 20;
