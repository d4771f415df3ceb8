use derive_more::Display;

/// Channel index within an ADC unit.
pub type AdcChannel = u8;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display)]
pub enum AdcUnit {
    #[display(fmt = "ADC1")]
    Unit1,
    #[display(fmt = "ADC2")]
    Unit2,
}

impl AdcUnit {
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        match self {
            AdcUnit::Unit1 => 0,
            AdcUnit::Unit2 => 1,
        }
    }
    /// Number of input channels multiplexed onto the unit.
    pub const fn channel_count(self) -> u8 {
        match self {
            AdcUnit::Unit1 => 8,
            AdcUnit::Unit2 => 10,
        }
    }
}

/// Input attenuation, selects the measurable voltage range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display)]
pub enum Atten {
    #[display(fmt = "0 dB")]
    Db0,
    #[display(fmt = "2.5 dB")]
    Db2_5,
    #[display(fmt = "6 dB")]
    Db6,
    #[display(fmt = "12 dB")]
    Db12,
}

impl Atten {
    pub const COUNT: usize = 4;

    pub const fn index(self) -> usize {
        match self {
            Atten::Db0 => 0,
            Atten::Db2_5 => 1,
            Atten::Db6 => 2,
            Atten::Db12 => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Display)]
pub enum BitWidth {
    /// Widest width supported by the converter.
    #[default]
    #[display(fmt = "default")]
    Default,
    #[display(fmt = "9 bit")]
    Bits9,
    #[display(fmt = "10 bit")]
    Bits10,
    #[display(fmt = "11 bit")]
    Bits11,
    #[display(fmt = "12 bit")]
    Bits12,
}

impl BitWidth {
    pub const fn bits(self) -> u32 {
        match self {
            BitWidth::Bits9 => 9,
            BitWidth::Bits10 => 10,
            BitWidth::Bits11 => 11,
            BitWidth::Default | BitWidth::Bits12 => 12,
        }
    }
    pub const fn max_raw(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

/// Physical sampling configuration of one monitored input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "{} Channel[{}]", unit, channel)]
pub struct ChannelDesc {
    pub unit: AdcUnit,
    pub channel: AdcChannel,
    pub atten: Atten,
    pub bitwidth: BitWidth,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display)]
pub enum DacChannel {
    #[display(fmt = "DAC_CHAN_0")]
    Chan0,
    #[display(fmt = "DAC_CHAN_1")]
    Chan1,
}

/// Input to sample and, optionally, the DAC channel it drives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputPlan {
    pub desc: ChannelDesc,
    pub output: Option<DacChannel>,
}
