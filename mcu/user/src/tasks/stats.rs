use alloc::{sync::Arc, vec::Vec};
use common::config::CHANNEL_PLAN;
use core::{
    fmt::{self, Display, Formatter, Write},
    sync::atomic::{fence, AtomicI32, Ordering},
};
use indenter::indented;
use lazy_static::lazy_static;
use portable_atomic::AtomicU64;

const INDENT: &str = "    ";

lazy_static! {
    pub static ref STATISTICS: Arc<Statistics> = Arc::new(Statistics::new(CHANNEL_PLAN.len()));
}

pub struct Statistics {
    /// Number of completed loop iterations.
    iter_count: AtomicU64,
    /// Number of raw reads across all channels.
    sample_count: AtomicU64,
    /// Reads not converted because the channel has no calibration.
    uncalibrated_count: AtomicU64,
    /// Number of DAC writes.
    output_count: AtomicU64,

    pub loop_time: TimeStats,
    pub channels: Vec<ChannelStats>,
}

#[derive(Default)]
pub struct ChannelStats {
    pub read_time: TimeStats,
    pub cali_time: TimeStats,
    last_raw: AtomicU64,
    last_mv: AtomicI32,
}

/// Durations in microseconds.
#[derive(Default)]
pub struct TimeStats {
    sum: AtomicU64,
    count: AtomicU64,
    last: AtomicU64,
    min: AtomicU64,
    max: AtomicU64,
}

impl Statistics {
    pub fn new(channels: usize) -> Self {
        let this = Self {
            iter_count: AtomicU64::new(0),
            sample_count: AtomicU64::new(0),
            uncalibrated_count: AtomicU64::new(0),
            output_count: AtomicU64::new(0),
            loop_time: TimeStats::default(),
            channels: (0..channels).map(|_| ChannelStats::default()).collect(),
        };
        this.reset();
        this
    }
    pub fn reset(&self) {
        fence(Ordering::Acquire);
        self.iter_count.store(0, Ordering::Relaxed);
        self.sample_count.store(0, Ordering::Relaxed);
        self.uncalibrated_count.store(0, Ordering::Relaxed);
        self.output_count.store(0, Ordering::Relaxed);
        fence(Ordering::Release);

        self.loop_time.reset();
        self.channels.iter().for_each(ChannelStats::reset);
    }

    pub fn report_iter(&self, time_us: u64) {
        self.loop_time.update(time_us);
        self.iter_count.fetch_add(1, Ordering::AcqRel);
    }
    pub fn report_sample(&self) {
        self.sample_count.fetch_add(1, Ordering::AcqRel);
    }
    pub fn report_uncalibrated(&self) {
        self.uncalibrated_count.fetch_add(1, Ordering::AcqRel);
    }
    pub fn report_output(&self) {
        self.output_count.fetch_add(1, Ordering::AcqRel);
    }

    pub fn iter_count(&self) -> u64 {
        self.iter_count.load(Ordering::Acquire)
    }
    pub fn sample_count(&self) -> u64 {
        self.sample_count.load(Ordering::Acquire)
    }
    pub fn uncalibrated_count(&self) -> u64 {
        self.uncalibrated_count.load(Ordering::Acquire)
    }
    pub fn output_count(&self) -> u64 {
        self.output_count.load(Ordering::Acquire)
    }
}

impl ChannelStats {
    pub fn reset(&self) {
        fence(Ordering::Acquire);
        self.last_raw.store(0, Ordering::Relaxed);
        self.last_mv.store(0, Ordering::Relaxed);
        fence(Ordering::Release);
        self.read_time.reset();
        self.cali_time.reset();
    }

    pub fn update_raw(&self, raw: u16) {
        self.last_raw.store(raw as u64, Ordering::Release);
    }
    pub fn update_mv(&self, mv: i32) {
        self.last_mv.store(mv, Ordering::Release);
    }
}

impl TimeStats {
    pub fn reset(&self) {
        fence(Ordering::Acquire);
        self.count.store(0, Ordering::Relaxed);
        self.sum.store(0, Ordering::Relaxed);
        self.max.store(u64::MIN, Ordering::Relaxed);
        self.min.store(u64::MAX, Ordering::Relaxed);
        self.last.store(0, Ordering::Relaxed);
        fence(Ordering::Release);
    }
    pub fn update(&self, value: u64) {
        fence(Ordering::Acquire);
        self.min.fetch_min(value, Ordering::Relaxed);
        self.max.fetch_max(value, Ordering::Relaxed);
        self.last.store(value, Ordering::Relaxed);
        self.sum.fetch_add(value, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
        fence(Ordering::Release);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
    pub fn max(&self) -> Option<u64> {
        match self.count() {
            0 => None,
            _ => Some(self.max.load(Ordering::Acquire)),
        }
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fence(Ordering::Acquire);
        writeln!(f)?;

        writeln!(f, "iter_count: {}", self.iter_count.load(Ordering::Relaxed))?;
        writeln!(f, "sample_count: {}", self.sample_count.load(Ordering::Relaxed))?;
        writeln!(f, "uncalibrated_count: {}", self.uncalibrated_count.load(Ordering::Relaxed))?;
        writeln!(f, "output_count: {}", self.output_count.load(Ordering::Relaxed))?;

        writeln!(f, "loop_time:")?;
        write!(indented(f).with_str(INDENT), "{}", self.loop_time)?;

        for (i, channel) in self.channels.iter().enumerate() {
            writeln!(f, "{}:", i)?;
            write!(indented(f).with_str(INDENT), "{}", channel)?;
        }
        Ok(())
    }
}

impl Display for ChannelStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fence(Ordering::Acquire);
        writeln!(f, "last_raw: {}", self.last_raw.load(Ordering::Relaxed))?;
        writeln!(f, "last_mv: {}", self.last_mv.load(Ordering::Relaxed))?;
        writeln!(f, "read_time:")?;
        write!(indented(f).with_str(INDENT), "{}", self.read_time)?;
        writeln!(f, "cali_time:")?;
        write!(indented(f).with_str(INDENT), "{}", self.cali_time)?;
        Ok(())
    }
}

impl Display for TimeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fence(Ordering::Acquire);
        let count = self.count.load(Ordering::Relaxed);
        if count == 0 {
            return writeln!(f, "none");
        }
        writeln!(f, "last: {} us", self.last.load(Ordering::Relaxed))?;
        writeln!(f, "min: {} us", self.min.load(Ordering::Relaxed))?;
        writeln!(f, "max: {} us", self.max.load(Ordering::Relaxed))?;
        writeln!(f, "avg: {} us", self.sum.load(Ordering::Relaxed) / count)?;
        Ok(())
    }
}
