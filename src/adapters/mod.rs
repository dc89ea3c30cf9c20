// Adapters layer: concrete implementations of the domain ports.

pub mod resend;

pub use resend::ResendClient;
