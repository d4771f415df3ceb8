use common::channel::{AdcUnit, Atten};
use mcu::{
    cali::{LineCoeffs, RefPoint},
    hal::Efuse,
};

/// Contents of the calibration eFuse block of an emulated chip.
#[derive(Clone, Debug, Default)]
pub struct EfuseImage {
    pub two_point: [[Option<LineCoeffs>; Atten::COUNT]; AdcUnit::COUNT],
    pub vref: Option<u16>,
    pub curve: [[Option<RefPoint>; Atten::COUNT]; AdcUnit::COUNT],
}

impl EfuseImage {
    /// Chip without any calibration data.
    pub fn blank() -> Self {
        Self::default()
    }
    /// Chip with only the reference voltage burnt.
    pub fn vref(vref: u16) -> Self {
        Self {
            vref: Some(vref),
            ..Self::default()
        }
    }

    pub fn with_two_point(mut self, unit: AdcUnit, atten: Atten, coeffs: LineCoeffs) -> Self {
        self.two_point[unit.index()][atten.index()] = Some(coeffs);
        self
    }
    pub fn with_curve(mut self, unit: AdcUnit, atten: Atten, point: RefPoint) -> Self {
        self.curve[unit.index()][atten.index()] = Some(point);
        self
    }
}

impl Efuse for EfuseImage {
    fn two_point(&self, unit: AdcUnit, atten: Atten) -> Option<LineCoeffs> {
        self.two_point[unit.index()][atten.index()]
    }
    fn vref(&self) -> Option<u16> {
        self.vref
    }
    fn curve_ref(&self, unit: AdcUnit, atten: Atten) -> Option<RefPoint> {
        self.curve[unit.index()][atten.index()]
    }
}
