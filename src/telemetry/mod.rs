//! Live telemetry over a server push channel.

mod channel;
mod sample;
mod session;
mod sse;

pub use channel::{HttpTelemetryChannel, MessageStream, TelemetryChannel};
pub use sample::TelemetrySample;
pub use session::{
    ConnectionState, ReconnectPolicy, ReconnectTimer, TelemetryHandle, TelemetrySession,
    TokioTimer,
};
pub use sse::SseDecoder;
