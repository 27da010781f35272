mod scalar_types;
mod vector_types;

pub use scalar_types::*;
pub use vector_types::*;

/// Used for EventType::Gradient(channel). X is the frequency-encode (readout)
/// axis, Y the phase-encode axis and Z the slice-select axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientChannel {
    X,
    Y,
    Z,
}

/// Used to fetch the next event window of the given type from the sequence
/// diagram, see `SequenceDiagram::encounter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    RfPulse,
    Adc,
    Gradient(GradientChannel),
}
