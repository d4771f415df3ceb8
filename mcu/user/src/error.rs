use derive_more::Display;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum ErrorKind {
    /// Requested functionality is absent on this device.
    #[display(fmt = "not supported")]
    NotSupported,
    #[display(fmt = "invalid argument")]
    InvalidArg,
    #[display(fmt = "out of memory")]
    NoMem,
    #[display(fmt = "invalid state")]
    InvalidState,
    #[display(fmt = "timed out")]
    TimedOut,
    #[display(fmt = "invalid data")]
    InvalidData,
    #[display(fmt = "device failure")]
    Device,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
#[display(fmt = "{} ({})", kind, context)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: &'static str,
}

impl Error {
    pub const fn new(kind: ErrorKind, context: &'static str) -> Self {
        Self { kind, context }
    }

    pub fn is_not_supported(&self) -> bool {
        self.kind == ErrorKind::NotSupported
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, context: "" }
    }
}
