mod common;

use std::convert::Infallible;

use approx::assert_relative_eq;
use seam_core::{HybridModel, SampleEvent, SimulationState, ZeroCrossingInfo};
use seam_events::{Config, EventCore, StepEvent};

use common::{Dynamics, run};

/// Counts the firings of its sample events, with no zero crossings.
#[derive(Default)]
struct Counter {
    firings: Vec<(usize, f64)>,
}

impl Dynamics for Counter {
    fn advance(&self, state: &mut SimulationState, h: f64) {
        state.time += h;
    }
}

impl HybridModel for Counter {
    type Error = Infallible;

    fn zero_crossing_count(&self) -> usize {
        0
    }

    fn zero_crossings(
        &self,
        _state: &mut SimulationState,
        _values: &mut [f64],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn zero_crossing_info(&self, _index: usize) -> ZeroCrossingInfo<'_> {
        unreachable!("model has no zero crossings")
    }

    fn update_discrete_system(
        &mut self,
        state: &mut SimulationState,
        samples: &[SampleEvent],
    ) -> Result<(), Self::Error> {
        for sample in samples.iter().filter(|sample| sample.is_active()) {
            self.firings.push((sample.index(), state.time));
        }
        Ok(())
    }

    fn update_continuous_system(&mut self, _state: &mut SimulationState) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn steps_land_on_every_sample() {
    let sample = SampleEvent::new(0, 0.5, 0.5).expect("valid sample");
    let mut core = EventCore::new(Config::default(), 0, [sample]).expect("valid config");
    let mut model = Counter::default();
    let mut state = SimulationState::new(0.0, vec![], 0);

    let applied = run(&mut core, &mut model, &mut state, 2.0, 0.3).expect("infallible");

    assert_eq!(applied.len(), 4);
    assert!(applied.iter().all(|event| event.kind == StepEvent::Time));
    assert_eq!(core.stats().sample_events, 4);

    let times: Vec<f64> = model.firings.iter().map(|&(_, time)| time).collect();
    for (time, expected) in times.iter().zip([0.5, 1.0, 1.5, 2.0]) {
        assert_relative_eq!(*time, expected, epsilon = 1e-12);
    }
    assert_eq!(times.len(), 4);
}

#[test]
fn coincident_samples_fire_together() {
    let samples = [
        SampleEvent::new(1, 0.0, 0.5).expect("valid sample"),
        SampleEvent::new(2, 0.0, 1.0).expect("valid sample"),
    ];
    let mut core = EventCore::new(Config::default(), 0, samples).expect("valid config");
    let mut model = Counter::default();
    let mut state = SimulationState::new(0.25, vec![], 0);

    run(&mut core, &mut model, &mut state, 2.2, 0.1).expect("infallible");

    let fired_at_one: Vec<usize> = model
        .firings
        .iter()
        .filter(|(_, time)| (time - 1.0).abs() < 1e-12)
        .map(|&(index, _)| index)
        .collect();
    assert_eq!(fired_at_one, vec![1, 2]);

    // Sample 1 at 0.5, 1.0, 1.5, 2.0 and sample 2 at 1.0, 2.0.
    assert_eq!(model.firings.len(), 6);
    assert_eq!(core.stats().sample_events, 4);
}

#[test]
fn samples_after_stop_never_fire() {
    let sample = SampleEvent::new(0, 5.0, 1.0).expect("valid sample");
    let mut core = EventCore::new(Config::default(), 0, [sample]).expect("valid config");
    let mut model = Counter::default();
    let mut state = SimulationState::new(0.0, vec![], 0);

    let applied = run(&mut core, &mut model, &mut state, 2.0, 0.3).expect("infallible");

    assert!(applied.is_empty());
    assert!(model.firings.is_empty());
    assert_relative_eq!(core.schedule().next_sample_event(), 5.0);
}
