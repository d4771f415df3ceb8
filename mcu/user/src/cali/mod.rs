//! Raw code to millivolt calibration.
//!
//! Several calibration schemes exist and which of them a chip can use depends on the
//! data burnt into its eFuse. [`Calibrator`] tries the schemes it is given in order and
//! hands out a [`Calibration`] for the first one that can be built.

mod curve;
mod line;

pub use curve::{CurveFitting, RefPoint};
pub use line::{LineCoeffs, LineFitting, LineSource};

use crate::{
    error::{Error, ErrorKind},
    hal::Efuse,
};
use common::{
    channel::ChannelDesc,
    units::{Mv, Raw},
};
use derive_more::{Display, From};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum SchemeKind {
    #[display(fmt = "Curve Fitting")]
    CurveFitting,
    #[display(fmt = "Line Fitting")]
    LineFitting,
}

impl SchemeKind {
    /// Most accurate first.
    pub const PRIORITY: &'static [SchemeKind] = &[SchemeKind::CurveFitting, SchemeKind::LineFitting];
}

/// Calibration of a single channel.
///
/// Not [`Clone`]: each handle is given back to [`Calibrator::release`] exactly once.
#[derive(Debug, PartialEq, Eq, From)]
pub enum Calibration {
    CurveFitting(CurveFitting),
    LineFitting(LineFitting),
}

impl Calibration {
    pub fn scheme(&self) -> SchemeKind {
        match self {
            Calibration::CurveFitting(_) => SchemeKind::CurveFitting,
            Calibration::LineFitting(_) => SchemeKind::LineFitting,
        }
    }

    pub fn raw_to_voltage(&self, raw: Raw) -> Mv {
        match self {
            Calibration::CurveFitting(cali) => cali.raw_to_voltage(raw),
            Calibration::LineFitting(cali) => cali.raw_to_voltage(raw),
        }
    }
}

pub struct Calibrator<E: Efuse> {
    efuse: E,
    schemes: &'static [SchemeKind],
    /// Number of handles given out and not yet released.
    live: usize,
}

impl<E: Efuse> Calibrator<E> {
    /// `schemes` lists the schemes the platform implements, in order of preference.
    pub fn new(efuse: E, schemes: &'static [SchemeKind]) -> Self {
        Self {
            efuse,
            schemes,
            live: 0,
        }
    }

    pub fn efuse(&self) -> &E {
        &self.efuse
    }
    pub fn live_handles(&self) -> usize {
        self.live
    }

    fn create(&self, scheme: SchemeKind, desc: &ChannelDesc) -> Result<Calibration, Error> {
        Ok(match scheme {
            SchemeKind::CurveFitting => CurveFitting::create(&self.efuse, desc)?.into(),
            SchemeKind::LineFitting => LineFitting::create(&self.efuse, desc)?.into(),
        })
    }

    /// Builds the calibration for `desc`.
    ///
    /// Returns `Ok(None)` when no scheme is supported by the chip, which is normal for
    /// parts without burnt calibration data. Only invalid arguments and allocation
    /// failures are reported as errors.
    pub fn init(&mut self, desc: &ChannelDesc) -> Result<Option<Calibration>, Error> {
        if desc.channel >= desc.unit.channel_count() {
            log::error!("Invalid arg or no memory");
            return Err(Error::new(ErrorKind::InvalidArg, "ADC channel out of range"));
        }
        for &scheme in self.schemes {
            log::info!("calibration scheme version is {}", scheme);
            match self.create(scheme, desc) {
                Ok(cali) => {
                    log::info!("Calibration Success");
                    self.live += 1;
                    return Ok(Some(cali));
                }
                Err(e) if e.is_not_supported() => log::debug!("{}: {}", desc, e),
                Err(e) => {
                    log::error!("Invalid arg or no memory");
                    return Err(e);
                }
            }
        }
        log::warn!("eFuse not burnt, skip software calibration");
        Ok(None)
    }

    pub fn release(&mut self, cali: Calibration) {
        log::info!("deregister {} calibration scheme", cali.scheme());
        debug_assert!(self.live > 0);
        self.live = self.live.saturating_sub(1);
    }
}
