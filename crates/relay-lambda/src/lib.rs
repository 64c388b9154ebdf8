//! Outbound side of the relay: the [`Invoker`] capability and its AWS Lambda
//! implementation.

/// Environment-sourced AWS credentials.
pub mod credentials;
/// The invocation capability trait.
pub mod invoker;
/// Lambda Invoke API client.
pub mod lambda;
pub mod sigv4;

pub use credentials::Credentials;
pub use invoker::Invoker;
pub use lambda::LambdaInvoker;
