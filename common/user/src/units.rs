use crate::config::{DAC_CODE_MAX, DAC_FULL_SCALE};
use core::fmt::Debug;
use derive_more::{Display, From, Into};

/// Raw ADC conversion code as reported by the converter.
pub type Raw = u16;

pub trait Voltage: Copy + Debug {
    fn to_voltage(self) -> f64;
    fn from_voltage_saturating(v: f64) -> Self;
}

/// Calibrated input voltage in millivolts.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Ord, PartialOrd, From, Into, Display)]
#[display(fmt = "{} mV", _0)]
pub struct Mv(pub i32);

impl Voltage for Mv {
    fn to_voltage(self) -> f64 {
        self.0 as f64 / 1000.0
    }
    fn from_voltage_saturating(v: f64) -> Self {
        Self((v * 1000.0).clamp(i32::MIN as f64, i32::MAX as f64) as i32)
    }
}

/// Output code of the 8-bit DAC.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Ord, PartialOrd, From, Into, Display)]
pub struct DacCode(pub u8);

impl DacCode {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(DAC_CODE_MAX);
}

impl Voltage for DacCode {
    fn to_voltage(self) -> f64 {
        self.0 as f64 * DAC_FULL_SCALE / DAC_CODE_MAX as f64
    }
    /// Hard clamp to `[0, DAC_FULL_SCALE]`, then truncate to the nearest lower code.
    fn from_voltage_saturating(v: f64) -> Self {
        let v = v.clamp(0.0, DAC_FULL_SCALE);
        // `as` saturates, NaN maps to zero.
        Self((v * DAC_CODE_MAX as f64 / DAC_FULL_SCALE) as u8)
    }
}
