use approx::assert_abs_diff_eq;
use common::{
    channel::{AdcUnit, Atten, DacChannel},
    config::{ADC1_CHAN0, ADC1_CHAN1, ADC2_CHAN0, CHANNEL_PLAN},
    units::DacCode,
};
use fakedev::{default_efuse, EfuseImage, EmulBoard, EmulClock, EmulHandle, Signal, VREF};
use mcu::{
    cali::{Calibrator, LineCoeffs, RefPoint, SchemeKind},
    error::ErrorKind,
    tasks::{Control, LoopConfig, Statistics},
    transform::VoltageTransform,
};
use std::sync::Arc;

const TWO_POINT: LineCoeffs = LineCoeffs {
    coeff_a: 52798,
    coeff_b: 142,
};

type EmulControl = Control<EmulBoard, EmulClock, EfuseImage>;

fn setup(efuse: EfuseImage) -> (EmulHandle, EmulControl) {
    let (board, handle) = EmulBoard::new(VREF, 1);
    let control = Control::new(
        board,
        EmulClock::sim(3),
        Calibrator::new(efuse, SchemeKind::PRIORITY),
        LoopConfig::default(),
        Arc::new(Statistics::new(CHANNEL_PLAN.len())),
    )
    .unwrap();
    (handle, control)
}

#[test]
fn output_follows_input() {
    let (handle, mut control) = setup(default_efuse());
    handle.set_signal(AdcUnit::Unit1, ADC1_CHAN0, Signal::Const(0.3));
    handle.set_signal(AdcUnit::Unit1, ADC1_CHAN1, Signal::Const(0.22));
    control.step().unwrap();

    let mv = control.last_voltage(0).unwrap();
    assert_abs_diff_eq!(mv.0 as f64, 300.0, epsilon = 2.0);
    assert_eq!(handle.last_code(DacChannel::Chan0), Some(VoltageTransform::default().apply(mv)));
    assert_eq!(handle.last_code(DacChannel::Chan0), Some(DacCode(71)));

    // Around the offset the output sits at the bias.
    let code = handle.last_code(DacChannel::Chan1).unwrap();
    assert_abs_diff_eq!(code.0 as f64, 96.0, epsilon = 1.0);
}

#[test]
fn uncalibrated_unit_is_only_sampled() {
    let efuse = EfuseImage::blank().with_two_point(AdcUnit::Unit1, Atten::Db12, TWO_POINT);
    let (handle, mut control) = setup(efuse);
    assert_eq!(control.scheme(2), None);

    assert_eq!(control.run_until(|n| n >= 50), Ok(50));
    assert_eq!(handle.read_count(AdcUnit::Unit2, ADC2_CHAN0), 50);
    assert_eq!(handle.write_count(DacChannel::Chan0), 50);
    assert_eq!(handle.write_count(DacChannel::Chan1), 50);
    assert_eq!(control.last_voltage(2), None);
    assert_eq!(control.stats().uncalibrated_count(), 50);
    assert_eq!(control.stats().channels[2].cali_time.count(), 0);
}

#[test]
fn blank_chip_drives_nothing() {
    let (handle, mut control) = setup(EfuseImage::blank());
    control.run_until(|n| n >= 5).unwrap();
    assert_eq!(handle.read_count(AdcUnit::Unit1, ADC1_CHAN0), 5);
    assert_eq!(handle.write_count(DacChannel::Chan0), 0);
    assert_eq!(handle.write_count(DacChannel::Chan1), 0);
    assert_eq!(control.calibrator().live_handles(), 0);
}

#[test]
fn scheme_per_unit() {
    let efuse = default_efuse().with_curve(AdcUnit::Unit1, Atten::Db12, RefPoint { digi: 3300, mv: 2700 });
    let (_handle, control) = setup(efuse);
    assert_eq!(control.scheme(0), Some(SchemeKind::CurveFitting));
    assert_eq!(control.scheme(1), Some(SchemeKind::CurveFitting));
    assert_eq!(control.scheme(2), Some(SchemeKind::LineFitting));
    assert_eq!(control.calibrator().live_handles(), 3);
}

#[test]
fn decreasing_output_for_rising_input() {
    let (handle, mut control) = setup(default_efuse());
    handle.set_signal(
        AdcUnit::Unit1,
        ADC1_CHAN0,
        Signal::Ramp {
            from: 0.0,
            to: 0.6,
            period: 100,
        },
    );
    control.run_until(|n| n >= 100).unwrap();
    let history = handle.history(DacChannel::Chan0);
    assert_eq!(history.len(), 100);
    assert!(history.windows(2).all(|w| w[1] <= w[0]));
    assert!(history[0] > history[99]);
}

#[test]
fn device_error_is_fatal() {
    let (handle, mut control) = setup(default_efuse());
    handle.fail_reads(AdcUnit::Unit2, ADC2_CHAN0, true);
    let err = control.step().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Device);
    // Inputs before the failing one were already handled.
    assert_eq!(handle.write_count(DacChannel::Chan0), 1);
    assert_eq!(handle.write_count(DacChannel::Chan1), 1);
    assert_eq!(control.stats().iter_count(), 0);
}

#[test]
fn shutdown_releases_everything() {
    let (handle, mut control) = setup(default_efuse());
    control.run_until(|n| n >= 3).unwrap();
    assert!(handle.unit_active(AdcUnit::Unit1));
    assert!(handle.dac_enabled(DacChannel::Chan1));

    let (_, calibrator) = control.shutdown().unwrap();
    assert_eq!(calibrator.live_handles(), 0);
    assert!(!handle.unit_active(AdcUnit::Unit1));
    assert!(!handle.unit_active(AdcUnit::Unit2));
    assert!(!handle.dac_enabled(DacChannel::Chan0));
    assert!(!handle.dac_enabled(DacChannel::Chan1));
}
