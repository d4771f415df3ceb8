//! Signal conditioning between the calibrated input and the DAC.

use common::{
    config::{TRANSFORM_BIAS, TRANSFORM_GAIN, TRANSFORM_OFFSET},
    units::{DacCode, Mv, Voltage},
};

/// Linear map `(v - offset) * gain + bias` followed by a hard clamp to the DAC range.
///
/// No state is kept between samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoltageTransform {
    /// Volts.
    pub offset: f64,
    pub gain: f64,
}

impl Default for VoltageTransform {
    fn default() -> Self {
        Self::new(TRANSFORM_OFFSET, TRANSFORM_GAIN)
    }
}

impl VoltageTransform {
    pub const fn new(offset: f64, gain: f64) -> Self {
        Self { offset, gain }
    }

    pub fn apply(&self, input: Mv) -> DacCode {
        transform(input.0, self.offset, self.gain)
    }
}

pub fn transform(mv: i32, offset: f64, gain: f64) -> DacCode {
    let v = Mv(mv).to_voltage() - offset;
    DacCode::from_voltage_saturating(v * gain + TRANSFORM_BIAS)
}
