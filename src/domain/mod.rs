// Domain layer: resource models mirroring the remote API, OData envelopes, and ports.

pub mod entitlement;
pub mod named_location;
pub mod odata;
pub mod ports;
