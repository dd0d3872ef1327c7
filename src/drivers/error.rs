/// Errno values handed back to C-style callers.
const EINVAL: i32 = 22;
const ENOENT: i32 = 2;
const ENODEV: i32 = 19;
const ETIMEDOUT: i32 = 110;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum DriverError {
    /// The register block address could not be resolved.
    #[display(fmt = "invalid register address")]
    InvalidAddress,
    /// No clock at the requested index.
    #[display(fmt = "clock lookup failed")]
    ClockLookupFailure,
    /// The clock provider refused to enable, carrying its error code.
    #[display(fmt = "failed to enable clock ({})", _0)]
    ClockEnableFailure(i32),
    /// The software reset bit never self-cleared.
    #[display(fmt = "timed out waiting for reset")]
    ResetTimeout,
    /// No driver claims the device's compatible string.
    #[display(fmt = "no matching driver")]
    NoMatchingDriver,
}

impl DriverError {
    /// Returns the negative errno-style code of this error.
    pub const fn code(self) -> i32 {
        match self {
            DriverError::InvalidAddress => -EINVAL,
            DriverError::ClockLookupFailure => -ENOENT,
            DriverError::ClockEnableFailure(code) if code < 0 => code,
            DriverError::ClockEnableFailure(code) => -code,
            DriverError::ResetTimeout => -ETIMEDOUT,
            DriverError::NoMatchingDriver => -ENODEV,
        }
    }
}
