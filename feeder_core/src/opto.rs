//! Optical index debouncer.
//!
//! Produces the `is-indexed` latch consumed by the app FSM and the LED
//! evaluator, from either a hysteretic ADC reading or a plain digital
//! pin, depending on how the board wires the sensor.

/// One tick's raw opto-sensor sample, as handed in by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptoSample {
    /// ADC reading. `None` represents a read failure (the original
    /// firmware's negative sentinel) and leaves the latch unchanged.
    Adc(Option<u16>),
    /// Digital pin reading, already resolved to "active" by the
    /// platform's configured polarity.
    Digital(bool),
    /// The opto feature is not wired on this board; the latch never
    /// changes from its last value (effectively stays false).
    Unused,
}

/// Configuration of which source feeds the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptoSource {
    /// ADC channel with hysteresis thresholds.
    Adc { low: u16, high: u16 },
    /// Plain digital pin, no hysteresis.
    Digital,
    /// Feature not wired.
    Unused,
}

/// Opto-index debouncer: holds the `is-indexed` latch.
pub struct OptoIndex {
    is_indexed: bool,
    source: OptoSource,
}

impl OptoIndex {
    pub const fn new(source: OptoSource) -> Self {
        OptoIndex {
            is_indexed: false,
            source,
        }
    }

    /// Advances the latch by one tick given this tick's raw sample.
    pub fn tick(&mut self, sample: OptoSample) {
        match (self.source, sample) {
            (OptoSource::Adc { low, high }, OptoSample::Adc(Some(value))) => {
                self.is_indexed = if self.is_indexed {
                    value >= low
                } else {
                    value > high
                };
            }
            (OptoSource::Adc { .. }, OptoSample::Adc(None)) => {
                // adc-read-failure: last-good semantics, latch unchanged.
            }
            (OptoSource::Digital, OptoSample::Digital(active)) => {
                self.is_indexed = active;
            }
            _ => {}
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_hysteresis_requires_crossing_opposite_threshold() {
        let mut opto = OptoIndex::new(OptoSource::Adc { low: 100, high: 200 });
        assert!(!opto.is_indexed());

        // Mid-band samples never flip the latch.
        for _ in 0..10 {
            opto.tick(OptoSample::Adc(Some(150)));
            assert!(!opto.is_indexed());
        }

        opto.tick(OptoSample::Adc(Some(201)));
        assert!(opto.is_indexed());

        // Mid-band again: stays set until it drops below `low`.
        opto.tick(OptoSample::Adc(Some(150)));
        assert!(opto.is_indexed());

        opto.tick(OptoSample::Adc(Some(99)));
        assert!(!opto.is_indexed());
    }

    #[test]
    fn adc_failure_leaves_latch_unchanged() {
        let mut opto = OptoIndex::new(OptoSource::Adc { low: 100, high: 200 });
        opto.tick(OptoSample::Adc(Some(201)));
        assert!(opto.is_indexed());

        for _ in 0..5 {
            opto.tick(OptoSample::Adc(None));
            assert!(opto.is_indexed());
        }
    }

    #[test]
    fn digital_mode_latches_instantaneously() {
        let mut opto = OptoIndex::new(OptoSource::Digital);
        opto.tick(OptoSample::Digital(true));
        assert!(opto.is_indexed());
        opto.tick(OptoSample::Digital(false));
        assert!(!opto.is_indexed());
    }

    #[test]
    fn unused_source_never_sets_latch() {
        let mut opto = OptoIndex::new(OptoSource::Unused);
        opto.tick(OptoSample::Adc(Some(9999)));
        opto.tick(OptoSample::Digital(true));
        assert!(!opto.is_indexed());
    }
}
