use super::timing::{
    Window, PREWIND, READOUT, REWINDER, RF_EXCITATION, SLICE_REPHASE, SPOILER,
};
use super::ky_target;
use crate::{
    DiagramSample, DiagramSampleVec, EventType, GradientChannel, GradientSample, SequenceParams,
    SequenceType,
};

/// A constant-amplitude gradient lobe.
#[derive(Debug, Clone, Copy)]
struct Lobe {
    window: Window,
    amp: f64,
}

/// Pulse sequence diagram of one TR for a parameter snapshot and line.
///
/// Lobes of one channel are kept in time order; where two lobes touch, the
/// earlier one wins the shared boundary tick.
#[derive(Debug, Clone)]
pub struct SequenceDiagram {
    gx: Vec<Lobe>,
    gy: Vec<Lobe>,
    gz: Vec<Lobe>,
}

impl SequenceDiagram {
    pub fn new(seq: &SequenceParams, line: usize) -> Self {
        let ky = ky_target(line, seq.gy_amp);

        let mut gz = vec![
            Lobe {
                window: RF_EXCITATION,
                amp: seq.gz_amp,
            },
            Lobe {
                window: SLICE_REPHASE,
                amp: -seq.gz_amp,
            },
        ];
        if seq.sequence_type == SequenceType::Spoiled {
            gz.push(Lobe {
                window: SPOILER,
                amp: seq.gz_amp,
            });
        }

        let mut gy = vec![Lobe {
            window: PREWIND,
            amp: ky,
        }];
        if seq.sequence_type == SequenceType::Balanced {
            gy.push(Lobe {
                window: REWINDER,
                amp: -ky,
            });
        }

        let gx = vec![
            Lobe {
                window: PREWIND,
                amp: -seq.gx_amp,
            },
            Lobe {
                window: READOUT,
                amp: seq.gx_amp,
            },
        ];

        Self { gx, gy, gz }
    }

    fn lobes(&self, channel: GradientChannel) -> &[Lobe] {
        match channel {
            GradientChannel::X => &self.gx,
            GradientChannel::Y => &self.gy,
            GradientChannel::Z => &self.gz,
        }
    }

    fn sample_channel(&self, channel: GradientChannel, t: f64) -> f64 {
        self.lobes(channel)
            .iter()
            .find(|lobe| lobe.window.contains(t))
            .map_or(0.0, |lobe| lobe.amp)
    }

    /// RF, gradient and ADC state at `time_in_tr` percent of the TR.
    pub fn sample_one(&self, time_in_tr: f64) -> DiagramSample {
        DiagramSample {
            rf_active: RF_EXCITATION.contains(time_in_tr),
            gradient: GradientSample {
                x: self.sample_channel(GradientChannel::X, time_in_tr),
                y: self.sample_channel(GradientChannel::Y, time_in_tr),
                z: self.sample_channel(GradientChannel::Z, time_in_tr),
            },
            adc_active: READOUT.contains(time_in_tr),
        }
    }

    pub fn sample(&self, time: &[f64]) -> DiagramSampleVec {
        time.iter()
            .map(|&t| self.sample_one(t))
            .collect::<Vec<_>>()
            .into()
    }

    /// Returns the window of the next event of the given type. Only events
    /// *starting* at or after `t_start` are considered, so an event that is
    /// currently running is skipped.
    pub fn encounter(&self, t_start: f64, ty: EventType) -> Option<(f64, f64)> {
        let window = match ty {
            EventType::RfPulse => Some(RF_EXCITATION).filter(|w| w.start >= t_start),
            EventType::Adc => Some(READOUT).filter(|w| w.start >= t_start),
            EventType::Gradient(channel) => self
                .lobes(channel)
                .iter()
                .map(|lobe| lobe.window)
                .find(|w| w.start >= t_start),
        };
        window.map(|w| (w.start, w.end))
    }
}

/// Position of the echo on the percent-of-TR axis, capped at the end of
/// the repetition.
pub fn echo_tick(seq: &SequenceParams) -> f64 {
    if seq.tr <= 0.0 {
        return 100.0;
    }
    (seq.te / seq.tr * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn diagram(ty: SequenceType) -> SequenceDiagram {
        let seq = SequenceParams {
            sequence_type: ty,
            ..Default::default()
        };
        SequenceDiagram::new(&seq, 0)
    }

    #[test]
    fn excitation_with_slice_select() {
        let d = diagram(SequenceType::Spoiled);
        let s = d.sample_one(10.0);
        check!(s.rf_active);
        check!(s.gradient.z == 1.0);
        check!(!s.adc_active);

        let rephase = d.sample_one(17.0);
        check!(!rephase.rf_active);
        check!(rephase.gradient.z == -1.0);
        // Boundary tick belongs to the slice select
        check!(d.sample_one(15.0).gradient.z == 1.0);
    }

    #[test]
    fn rephaser_ends_before_prewind() {
        let d = diagram(SequenceType::Spoiled);
        check!(d.sample_one(19.9).gradient.z == -1.0);
        let s = d.sample_one(20.0);
        check!(s.gradient.z == 0.0);
        check!(s.gradient.x == -1.2);
        check!(s.gradient.y == 1.0);
    }

    #[test]
    fn prewind_and_readout() {
        let d = diagram(SequenceType::Hybrid);
        let pre = d.sample_one(25.0);
        check!(pre.gradient.x == -1.2);
        check!(pre.gradient.y == 1.0);

        let read = d.sample_one(60.0);
        check!(read.gradient.x == 1.2);
        check!(read.gradient.y == 0.0);
        check!(read.adc_active);

        check!(d.sample_one(40.0) == DiagramSample::default());
    }

    #[test]
    fn spoiler_and_rewinder_per_family() {
        check!(diagram(SequenceType::Spoiled).sample_one(95.0).gradient.z == 1.0);
        check!(diagram(SequenceType::Balanced).sample_one(95.0).gradient.z == 0.0);
        check!(diagram(SequenceType::Balanced).sample_one(92.0).gradient.y == -1.0);
        check!(diagram(SequenceType::Hybrid).sample_one(92.0) == DiagramSample::default());
    }

    #[test]
    fn encounter_next_events() {
        let d = diagram(SequenceType::Spoiled);
        check!(d.encounter(0.0, EventType::RfPulse) == Some((5.0, 15.0)));
        check!(d.encounter(6.0, EventType::RfPulse) == None);
        check!(d.encounter(0.0, EventType::Adc) == Some((45.0, 75.0)));

        let gz = EventType::Gradient(GradientChannel::Z);
        check!(d.encounter(0.0, gz) == Some((5.0, 15.0)));
        check!(d.encounter(10.0, gz) == Some((15.0, 20.0)));
        check!(d.encounter(16.0, gz) == Some((90.0, 98.0)));
        check!(diagram(SequenceType::Hybrid).encounter(16.0, gz) == None);

        let gx = EventType::Gradient(GradientChannel::X);
        check!(d.encounter(21.0, gx) == Some((45.0, 75.0)));
    }

    #[test]
    fn sample_many() {
        let ticks: Vec<f64> = (0..=100).map(f64::from).collect();
        let samples = diagram(SequenceType::Balanced).sample(&ticks);
        check!(samples.len() == 101);
        check!(samples.adc_active.iter().filter(|&&a| a).count() == 31);
        check!(samples.rf_active.iter().filter(|&&a| a).count() == 11);
    }

    #[test]
    fn echo_marker() {
        check!((echo_tick(&SequenceParams::default()) - 10.0 / 3.0).abs() < 1e-12);
        let long_te = SequenceParams {
            te: 500.0,
            ..Default::default()
        };
        check!(echo_tick(&long_te) == 100.0);
    }
}
