//! Interfaces of the peripheral drivers the sampling loop runs on.

use crate::{
    cali::{LineCoeffs, RefPoint},
    Error,
};
use common::{
    channel::{AdcChannel, AdcUnit, Atten, BitWidth, DacChannel},
    units::{DacCode, Raw},
};

/// One-shot ADC unit.
pub trait AdcUnitIface {
    fn config_channel(&mut self, channel: AdcChannel, atten: Atten, bitwidth: BitWidth) -> Result<(), Error>;
    /// Blocks until the conversion is complete.
    fn read(&mut self, channel: AdcChannel) -> Result<Raw, Error>;
}

/// One-shot DAC output channel.
pub trait DacIface {
    fn write(&mut self, code: DacCode) -> Result<(), Error>;
}

pub trait Board {
    type Unit: AdcUnitIface;
    type Dac: DacIface;

    fn new_unit(&mut self, unit: AdcUnit) -> Result<Self::Unit, Error>;
    fn del_unit(&mut self, unit: Self::Unit) -> Result<(), Error>;

    fn enable_dac(&mut self, channel: DacChannel) -> Result<Self::Dac, Error>;
    fn disable_dac(&mut self, dac: Self::Dac) -> Result<(), Error>;
}

/// Monotonic microsecond clock.
pub trait Clock {
    fn now_us(&self) -> u64;
}

/// Factory-programmed calibration data.
pub trait Efuse {
    /// Line coefficients measured at two points for the unit and attenuation.
    fn two_point(&self, unit: AdcUnit, atten: Atten) -> Option<LineCoeffs>;
    /// Measured reference voltage in millivolts.
    fn vref(&self) -> Option<u16>;
    /// Reference point for curve fitting.
    fn curve_ref(&self, unit: AdcUnit, atten: Atten) -> Option<RefPoint>;
}
