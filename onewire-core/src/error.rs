/// One wire communication error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Bus(E),
    /// Indicates that no device answered the reset with a presence pulse.
    NoDevicePresent,
    /// Indicates that the line was held low for longer than a reset cycle,
    /// which usually means a short circuit on the bus.
    ShortCircuit,
    /// Indicates that the operation is not supported by the bus
    /// implementation, such as holding the line high for parasitic power.
    Unimplemented,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Bus(other)
    }
}
