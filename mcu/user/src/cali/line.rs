use crate::{
    error::{Error, ErrorKind},
    hal::Efuse,
};
use common::{
    channel::{Atten, BitWidth, ChannelDesc},
    units::{Mv, Raw},
};
use derive_more::Display;

const COEFF_A_SCALE: u64 = 65536;
const COEFF_A_ROUND: u64 = COEFF_A_SCALE / 2;

/// Codes are scaled to this width before conversion.
const FULL_BITS: u32 = 12;
const FULL_RES: u32 = 1 << FULL_BITS;

/// Gain of each attenuation relative to the reference voltage, fixed point.
const ATTEN_SCALES: [u32; Atten::COUNT] = [57431, 76236, 105481, 196602];
/// Zero-code voltage of each attenuation in millivolts.
const ATTEN_OFFSETS: [i32; Atten::COUNT] = [75, 78, 88, 142];

/// `mv = coeff_a * raw / 65536 + coeff_b` for 12-bit codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineCoeffs {
    pub coeff_a: u32,
    pub coeff_b: i32,
}

impl LineCoeffs {
    /// Coefficients derived from a measured reference voltage.
    pub fn from_vref(vref: u16, atten: Atten) -> Self {
        Self {
            coeff_a: (vref as u32 * ATTEN_SCALES[atten.index()]) / FULL_RES,
            coeff_b: ATTEN_OFFSETS[atten.index()],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum LineSource {
    #[display(fmt = "two point")]
    TwoPoint,
    #[display(fmt = "vref")]
    Vref,
}

/// Unit-wide linear calibration.
///
/// Coefficients depend on the unit and attenuation only, so every channel of a unit
/// configured the same way converts identically.
#[derive(Debug, PartialEq, Eq)]
pub struct LineFitting {
    bitwidth: BitWidth,
    coeffs: LineCoeffs,
    source: LineSource,
}

impl LineFitting {
    pub fn create(efuse: &impl Efuse, desc: &ChannelDesc) -> Result<Self, Error> {
        let (coeffs, source) = if let Some(coeffs) = efuse.two_point(desc.unit, desc.atten) {
            (coeffs, LineSource::TwoPoint)
        } else if let Some(vref) = efuse.vref() {
            (LineCoeffs::from_vref(vref, desc.atten), LineSource::Vref)
        } else {
            return Err(Error::new(ErrorKind::NotSupported, "no line fitting data in eFuse"));
        };
        log::debug!("{} line fitting from {}: {:?}", desc.unit, source, coeffs);
        Ok(Self {
            bitwidth: desc.bitwidth,
            coeffs,
            source,
        })
    }

    pub fn coeffs(&self) -> LineCoeffs {
        self.coeffs
    }
    pub fn source(&self) -> LineSource {
        self.source
    }

    pub fn raw_to_voltage(&self, raw: Raw) -> Mv {
        let raw = (raw as u64) << (FULL_BITS - self.bitwidth.bits());
        let mv = (self.coeffs.coeff_a as u64 * raw + COEFF_A_ROUND) / COEFF_A_SCALE;
        Mv(mv as i32 + self.coeffs.coeff_b)
    }
}
