pub mod client;
pub mod poller;
pub mod telemetry;
pub mod translator;
pub mod validator;
