use crate::channel::{AdcChannel, AdcUnit, Atten, BitWidth, ChannelDesc, DacChannel, InputPlan};
use core::time::Duration;

pub const ADC1_CHAN0: AdcChannel = 4;
pub const ADC1_CHAN1: AdcChannel = 5;
pub const ADC2_CHAN0: AdcChannel = 0;

pub const ADC_ATTEN: Atten = Atten::Db12;
pub const ADC_BITWIDTH: BitWidth = BitWidth::Default;

/// Inputs in sampling order.
pub const CHANNEL_PLAN: [InputPlan; 3] = [
    InputPlan {
        desc: ChannelDesc {
            unit: AdcUnit::Unit1,
            channel: ADC1_CHAN0,
            atten: ADC_ATTEN,
            bitwidth: ADC_BITWIDTH,
        },
        output: Some(DacChannel::Chan0),
    },
    InputPlan {
        desc: ChannelDesc {
            unit: AdcUnit::Unit1,
            channel: ADC1_CHAN1,
            atten: ADC_ATTEN,
            bitwidth: ADC_BITWIDTH,
        },
        output: Some(DacChannel::Chan1),
    },
    InputPlan {
        desc: ChannelDesc {
            unit: AdcUnit::Unit2,
            channel: ADC2_CHAN0,
            atten: ADC_ATTEN,
            bitwidth: ADC_BITWIDTH,
        },
        output: None,
    },
];

pub const TRANSFORM_OFFSET: f64 = 0.22;
pub const TRANSFORM_GAIN: f64 = -4.0;
/// Fixed output bias in volts.
pub const TRANSFORM_BIAS: f64 = 1.25;

pub const DAC_FULL_SCALE: f64 = 3.3;
pub const DAC_CODE_MAX: u8 = 255;

pub const STATS_PRINT_PERIOD: Duration = Duration::from_secs(10);
