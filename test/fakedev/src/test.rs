use common::{
    channel::{AdcUnit, DacChannel},
    config::{ADC1_CHAN0, ADC1_CHAN1, ADC2_CHAN0, CHANNEL_PLAN},
};
use fakedev::{default_efuse, init_logger, EmulBoard, EmulClock, Signal, VREF};
use indicatif::ProgressBar;
use mcu::{
    cali::{Calibrator, SchemeKind},
    tasks::{Control, LoopConfig, Statistics},
};
use std::sync::Arc;

const ITERATIONS: u64 = 100_000;
const BATCH: u64 = 1000;
/// Tolerance of calibrated constant input, in millivolts.
const MV_TOLERANCE: i32 = 3;

fn main() {
    init_logger();

    let (board, handle) = EmulBoard::new(VREF, 0x5eed);
    handle.set_noise(1);
    handle.set_signal(
        AdcUnit::Unit1,
        ADC1_CHAN0,
        Signal::Ramp {
            from: 0.0,
            to: 1.2,
            period: 997,
        },
    );
    handle.set_signal(AdcUnit::Unit1, ADC1_CHAN1, Signal::Const(0.5));
    handle.set_signal(AdcUnit::Unit2, ADC2_CHAN0, Signal::Const(2.0));

    let config = LoopConfig::default();
    let transform = config.transform;
    let stats = Arc::new(Statistics::new(CHANNEL_PLAN.len()));
    let calibrator = Calibrator::new(default_efuse(), SchemeKind::PRIORITY);
    let mut control = Control::new(board, EmulClock::real(), calibrator, config, stats.clone()).unwrap();

    let pb = ProgressBar::new(ITERATIONS / BATCH);
    let mut done = 0;
    while done < ITERATIONS {
        done += control.run_until(|n| n >= BATCH).unwrap();

        for (input, dac) in [(0, DacChannel::Chan0), (1, DacChannel::Chan1)] {
            let mv = control.last_voltage(input).unwrap();
            assert_eq!(handle.last_code(dac), Some(transform.apply(mv)));
        }
        let mv = control.last_voltage(1).unwrap();
        assert!((mv.0 - 500).abs() <= MV_TOLERANCE, "{}", mv);
        let mv = control.last_voltage(2).unwrap();
        assert!((mv.0 - 2000).abs() <= MV_TOLERANCE, "{}", mv);

        pb.inc(1);
    }
    pb.finish();

    let (_, calibrator) = control.shutdown().unwrap();
    assert_eq!(calibrator.live_handles(), 0);
    assert_eq!(handle.read_count(AdcUnit::Unit2, ADC2_CHAN0), ITERATIONS);
    assert_eq!(handle.write_count(DacChannel::Chan0), ITERATIONS);

    println!("Statistics: {}", stats);
}
