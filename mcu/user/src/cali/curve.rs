use crate::{
    error::{Error, ErrorKind},
    hal::Efuse,
};
use common::{
    channel::{Atten, ChannelDesc},
    units::{Mv, Raw},
};

const COEFF_A_SCALE: u64 = 65536;
/// Only full-width codes can be curve fitted.
const SUPPORTED_BITS: u32 = 12;

/// Code measured by the factory at a known input voltage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RefPoint {
    pub digi: u32,
    pub mv: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ErrorTerm {
    num: i128,
    den: i128,
}

impl ErrorTerm {
    const fn new(num: i128, den: i128) -> Self {
        Self { num, den }
    }
}

const E15: i128 = 1_000_000_000_000_000;
const E16: i128 = 10_000_000_000_000_000;

/// Error polynomial of the converter, lowest order first.
const ERROR_TERMS: [[ErrorTerm; 3]; Atten::COUNT] = [
    [
        ErrorTerm::new(225966470500043, E15),
        ErrorTerm::new(-7265418501948, E16),
        ErrorTerm::new(109410402681, E16),
    ],
    [
        ErrorTerm::new(4229623392600516, E16),
        ErrorTerm::new(-731527490903, E16),
        ErrorTerm::new(88166562521, E16),
    ],
    [
        ErrorTerm::new(1017859239236435, E15),
        ErrorTerm::new(-97159265299153, E16),
        ErrorTerm::new(149794028038, E16),
    ],
    [
        ErrorTerm::new(14912262772850453, E16),
        ErrorTerm::new(-228549975564099, E16),
        ErrorTerm::new(356391935717, E16),
    ],
];

/// Per-channel calibration: a line through the reference point corrected by the
/// error polynomial of the attenuation.
#[derive(Debug, PartialEq, Eq)]
pub struct CurveFitting {
    atten: Atten,
    coeff_a: u64,
}

impl CurveFitting {
    pub fn create(efuse: &impl Efuse, desc: &ChannelDesc) -> Result<Self, Error> {
        if desc.channel >= desc.unit.channel_count() {
            return Err(Error::new(ErrorKind::InvalidArg, "ADC channel out of range"));
        }
        if desc.bitwidth.bits() != SUPPORTED_BITS {
            return Err(Error::new(ErrorKind::NotSupported, "curve fitting needs 12 bit width"));
        }
        let point = efuse
            .curve_ref(desc.unit, desc.atten)
            .ok_or(Error::new(ErrorKind::NotSupported, "no curve fitting data in eFuse"))?;
        if point.digi == 0 {
            return Err(Error::new(ErrorKind::NotSupported, "curve fitting reference is blank"));
        }
        log::debug!("{} curve fitting reference: {:?}", desc, point);
        Ok(Self {
            atten: desc.atten,
            coeff_a: COEFF_A_SCALE * point.mv as u64 / point.digi as u64,
        })
    }

    pub fn coeff_a(&self) -> u64 {
        self.coeff_a
    }

    fn reading_error(&self, v: i128) -> i128 {
        let mut power = 1;
        let mut error = 0;
        for term in ERROR_TERMS[self.atten.index()].iter() {
            error += power * term.num / term.den;
            power *= v;
        }
        error
    }

    pub fn raw_to_voltage(&self, raw: Raw) -> Mv {
        let v = (raw as u64 * self.coeff_a / COEFF_A_SCALE) as i128;
        Mv((v - self.reading_error(v)) as i32)
    }
}
