use super::stats::Statistics;
use crate::{
    cali::{Calibration, Calibrator, SchemeKind},
    error::{Error, ErrorKind},
    hal::{AdcUnitIface, Board, Clock, DacIface, Efuse},
    transform::VoltageTransform,
};
use alloc::{sync::Arc, vec::Vec};
use common::{
    channel::{AdcUnit, ChannelDesc, DacChannel, InputPlan},
    config::{CHANNEL_PLAN, STATS_PRINT_PERIOD},
    units::{Mv, Raw},
};
use core::time::Duration;

#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Inputs in sampling order.
    pub inputs: Vec<InputPlan>,
    pub transform: VoltageTransform,
    pub stats_period: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            inputs: CHANNEL_PLAN.to_vec(),
            transform: VoltageTransform::default(),
            stats_period: STATS_PRINT_PERIOD,
        }
    }
}

struct Input {
    desc: ChannelDesc,
    /// Index in `Control::units`.
    unit: usize,
    /// Index in `Control::dacs`.
    dac: Option<usize>,
    cali: Option<Calibration>,
    last_raw: Raw,
    last_mv: Option<Mv>,
}

/// Sampling loop.
///
/// Each iteration reads every input in declared order, converts it when the input is
/// calibrated and drives the associated DAC, if any. Inputs without calibration are
/// still read so that the sampling pattern of a shared unit does not change.
pub struct Control<B: Board, K: Clock, E: Efuse> {
    board: B,
    clock: K,
    calibrator: Calibrator<E>,

    units: Vec<(AdcUnit, B::Unit)>,
    dacs: Vec<(DacChannel, B::Dac)>,
    inputs: Vec<Input>,

    transform: VoltageTransform,
    stats: Arc<Statistics>,
    stats_period_us: u64,
    last_print: u64,
}

impl<B: Board, K: Clock, E: Efuse> Control<B, K, E> {
    pub fn new(
        mut board: B,
        clock: K,
        mut calibrator: Calibrator<E>,
        config: LoopConfig,
        stats: Arc<Statistics>,
    ) -> Result<Self, Error> {
        if stats.channels.len() < config.inputs.len() {
            return Err(Error::new(ErrorKind::InvalidArg, "statistics has fewer channels than inputs"));
        }

        let mut units: Vec<(AdcUnit, B::Unit)> = Vec::new();
        let mut inputs = Vec::with_capacity(config.inputs.len());
        for plan in config.inputs.iter() {
            let desc = plan.desc;
            let unit = match units.iter().position(|(id, _)| *id == desc.unit) {
                Some(index) => index,
                None => {
                    log::info!("Init {}", desc.unit);
                    units.push((desc.unit, board.new_unit(desc.unit)?));
                    units.len() - 1
                }
            };
            units[unit].1.config_channel(desc.channel, desc.atten, desc.bitwidth)?;
            let cali = calibrator.init(&desc)?;
            inputs.push(Input {
                desc,
                unit,
                dac: None,
                cali,
                last_raw: 0,
                last_mv: None,
            });
        }

        let mut dacs: Vec<(DacChannel, B::Dac)> = Vec::new();
        for (input, plan) in inputs.iter_mut().zip(config.inputs.iter()) {
            if let Some(channel) = plan.output {
                if dacs.iter().any(|(id, _)| *id == channel) {
                    return Err(Error::new(ErrorKind::InvalidArg, "DAC channel driven by several inputs"));
                }
                log::info!("Enable {} for {}", channel, input.desc);
                dacs.push((channel, board.enable_dac(channel)?));
                input.dac = Some(dacs.len() - 1);
            }
        }

        let last_print = clock.now_us();
        Ok(Self {
            board,
            clock,
            calibrator,
            units,
            dacs,
            inputs,
            transform: config.transform,
            stats,
            stats_period_us: config.stats_period.as_micros() as u64,
            last_print,
        })
    }

    pub fn stats(&self) -> &Arc<Statistics> {
        &self.stats
    }
    pub fn board(&self) -> &B {
        &self.board
    }
    pub fn calibrator(&self) -> &Calibrator<E> {
        &self.calibrator
    }

    /// Scheme calibrating the input with the given index, `None` for uncalibrated inputs.
    pub fn scheme(&self, input: usize) -> Option<SchemeKind> {
        self.inputs.get(input)?.cali.as_ref().map(Calibration::scheme)
    }
    pub fn last_raw(&self, input: usize) -> Option<Raw> {
        self.inputs.get(input).map(|input| input.last_raw)
    }
    pub fn last_voltage(&self, input: usize) -> Option<Mv> {
        self.inputs.get(input)?.last_mv
    }

    /// Performs a single iteration over all inputs.
    pub fn step(&mut self) -> Result<(), Error> {
        let stats = &self.stats;
        let start = self.clock.now_us();

        for (index, input) in self.inputs.iter_mut().enumerate() {
            let desc = input.desc;
            let channel_stats = &stats.channels[index];

            let read_start = self.clock.now_us();
            let raw = self.units[input.unit].1.read(desc.channel)?;
            let read_end = self.clock.now_us();
            channel_stats.read_time.update(read_end.saturating_sub(read_start));
            log::trace!("{} Read Time: {} us", desc, read_end.saturating_sub(read_start));
            input.last_raw = raw;
            channel_stats.update_raw(raw);
            stats.report_sample();

            let cali = match &input.cali {
                Some(cali) => cali,
                None => {
                    stats.report_uncalibrated();
                    continue;
                }
            };
            let mv = cali.raw_to_voltage(raw);
            let cali_end = self.clock.now_us();
            channel_stats.cali_time.update(cali_end.saturating_sub(read_end));
            log::trace!("Calibration Time: {} us", cali_end.saturating_sub(read_end));
            log::debug!("Time: {} us, {} Cali Voltage: {}", cali_end, desc, mv);
            input.last_mv = Some(mv);
            channel_stats.update_mv(mv.0);

            if let Some(dac) = input.dac {
                let (channel, output) = &mut self.dacs[dac];
                let code = self.transform.apply(mv);
                output.write(code)?;
                log::debug!("{} <- {}", channel, code);
                stats.report_output();
            }
        }

        let end = self.clock.now_us();
        stats.report_iter(end.saturating_sub(start));
        log::trace!("Total Loop Time: {} us", end.saturating_sub(start));

        if end.saturating_sub(self.last_print) >= self.stats_period_us {
            self.last_print = end;
            log::info!("[Statistics]{}", stats);
        }
        Ok(())
    }

    /// Iterates until `stop` returns `true`. `stop` receives the number of iterations done so far.
    ///
    /// Returns the number of iterations done, or the first device error.
    pub fn run_until<F: FnMut(u64) -> bool>(&mut self, mut stop: F) -> Result<u64, Error> {
        let mut count = 0;
        while !stop(count) {
            self.step()?;
            count += 1;
        }
        Ok(count)
    }

    /// Runs forever. A device error is fatal.
    pub fn run(mut self) -> ! {
        log::info!("Enter sampling loop");
        loop {
            if let Err(e) = self.step() {
                panic!("Fatal device error: {}", e);
            }
        }
    }

    /// Deletes ADC units, releases calibrations and disables DAC outputs.
    pub fn shutdown(self) -> Result<(B, Calibrator<E>), Error> {
        let Self {
            mut board,
            mut calibrator,
            units,
            dacs,
            inputs,
            ..
        } = self;
        for (id, unit) in units {
            log::info!("Delete {}", id);
            board.del_unit(unit)?;
        }
        for input in inputs {
            if let Some(cali) = input.cali {
                calibrator.release(cali);
            }
        }
        for (id, dac) in dacs {
            log::info!("Disable {}", id);
            board.disable_dac(dac)?;
        }
        Ok((board, calibrator))
    }
}
