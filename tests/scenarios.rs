//! End-to-end checks through the public API, the way a front end uses it.

use std::collections::HashMap;
use std::time::Duration;

use assert2::{check, let_assert};
use gresim::clock::{Animator, TimerId, TimerPort};
use gresim::config::SimulatorConfig;
use gresim::kspace::{echo_tick, SequenceDiagram};
use gresim::{
    evaluate_signal, evolve_magnetization, generate_curve_series, kspace_coordinate, ChartKind,
    EventType, GradientChannel, KSpaceCoordinate, SequenceParams, SequenceType, Tissue,
    TissueCatalog,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn gray_matter_flash_reference() {
    let gm = Tissue::GrayMatter.params();
    let s = evaluate_signal(150.0, 5.0, 60.0, &gm, SequenceType::Spoiled, 150.0);
    check!(close(s, 0.1767513961869659, 1e-12));
}

#[test]
fn inversion_nulls_fat() {
    let fat = Tissue::Fat.params();
    let null_ti = fat.t1 * std::f64::consts::LN_2;
    // Long TR so the tissue fully recovers between inversions
    let s = evaluate_signal(5000.0, 5.0, 60.0, &fat, SequenceType::InversionRecovery, null_ti);
    check!(s < 1e-6);

    let gm = Tissue::GrayMatter.params();
    let s_gm = evaluate_signal(5000.0, 5.0, 60.0, &gm, SequenceType::InversionRecovery, null_ti);
    check!(s_gm > 0.1);
}

#[test]
fn relaxation_chart_hits_one_minus_inverse_e() {
    let series = generate_curve_series(
        ChartKind::Relaxation,
        &SequenceParams::default(),
        &TissueCatalog::standard(),
    );
    let_assert!(Some(v) = series.value_at(600.0, "WM"));
    check!(close(v, 0.6321205588285577, 1e-12));
}

#[test]
fn contrast_chart_compares_gray_and_white() {
    let seq = SequenceParams::default();
    let series = generate_curve_series(ChartKind::Contrast, &seq, &TissueCatalog::standard());
    check!(series.keys == ["Contrast"]);

    let gm = Tissue::GrayMatter.params();
    let wm = Tissue::WhiteMatter.params();
    let expected = (evaluate_signal(150.0, 5.0, 60.0, &gm, SequenceType::Spoiled, 150.0)
        - evaluate_signal(150.0, 5.0, 60.0, &wm, SequenceType::Spoiled, 150.0))
    .abs();
    let_assert!(Some(v) = series.value_at(60.0, "Contrast"));
    check!(close(v, expected, 1e-15));
}

#[test]
fn spoiler_returns_to_origin() {
    check!(kspace_coordinate(95.0, 3, SequenceType::Spoiled, 1.0) == KSpaceCoordinate::ORIGIN);
    // Without a spoiler the trajectory stays at the end of the line
    let c = kspace_coordinate(95.0, 3, SequenceType::Hybrid, 1.0);
    check!(c.kx == 1.0);
    check!(c.ky != 0.0);
}

#[test]
fn diagram_matches_trajectory() {
    let seq = SequenceParams::default();
    let diagram = SequenceDiagram::new(&seq, 0);

    let_assert!(Some((start, end)) = diagram.encounter(0.0, EventType::Adc));
    check!(kspace_coordinate(start, 0, seq.sequence_type, seq.gy_amp).kx == -1.0);
    check!(kspace_coordinate(end, 0, seq.sequence_type, seq.gy_amp).kx == 1.0);

    let_assert!(Some((pe_start, _)) = diagram.encounter(0.0, EventType::Gradient(GradientChannel::Y)));
    check!(pe_start == 20.0);
    check!(diagram.sample_one(25.0).gradient.y == 1.0);

    // Echo of the default timing lands early in the TR
    check!(close(echo_tick(&seq), 5.0 / 150.0 * 100.0, 1e-12));
}

#[test]
fn magnetization_recovers_towards_equilibrium() {
    let seq = SequenceParams::default();
    let gm = Tissue::GrayMatter.params();
    let after_pulse = evolve_magnetization(&seq, &gm, 0.0);
    let end = evolve_magnetization(&seq, &gm, 100.0);
    check!(end.mz > after_pulse.mz);
    check!(end.mxy < after_pulse.mxy);
    check!(end.mz < 1.0);
}

#[derive(Default)]
struct HostTimers {
    armed: HashMap<TimerId, Duration>,
}

impl TimerPort for HostTimers {
    fn arm(&mut self, id: TimerId, period: Duration) {
        self.armed.insert(id, period);
    }

    fn cancel(&mut self, id: TimerId) {
        self.armed.remove(&id);
    }
}

#[test]
fn animation_from_config() {
    let text = r#"
        [animation]
        line_advance_period_ms = 350.0
        initial_line = 0

        [sequence]
        sequence_type = "bssfp"
        tr = 4000.0
    "#;
    let_assert!(Ok(cfg) = SimulatorConfig::from_toml(text));
    check!(cfg.sequence.sequence_type == SequenceType::Balanced);
    check!(cfg.sequence.te == 5.0);

    let mut animator = Animator::new(HostTimers::default(), cfg.animation, cfg.sequence);
    animator.start();
    check!(animator.port().armed[&TimerId::Tick] == Duration::from_millis(40));
    check!(animator.port().armed[&TimerId::Line] == Duration::from_millis(350));

    // One full TR plus one tick wraps the clock to 0
    for _ in 0..101 {
        animator.on_timer(TimerId::Tick);
    }
    check!(animator.clock().tick() == 0);

    for _ in 0..3 {
        animator.on_timer(TimerId::Line);
    }
    check!(animator.line().get() == 3);

    let csf = Tissue::Csf.params();
    let frame = animator.frame(&csf);
    check!(frame.kspace == KSpaceCoordinate::ORIGIN);
    check!(!frame.diagram.rf_active);
    check!(frame.magnetization == evolve_magnetization(animator.params(), &csf, 0.0));

    animator.stop();
    check!(animator.port().armed.is_empty());
}
