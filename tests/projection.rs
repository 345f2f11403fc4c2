//! Phase projection: element counts, cue content, and mask
//! independence from the assignment

use stimgen::resolve::assignment::{Orientation, Trial, reconstruct};
use stimgen::resolve::bars::{BarsTrial, ChangeAttribute, SubsetKind};
use stimgen::resolve::dumbbell::{BindingCondition, DumbbellConsistency, DumbbellTrial};
use stimgen::resolve::search::{
    CueTarget, DistractorCondition, ProbeCondition, SearchTrial, TargetOrientation,
};
use stimgen::resolve::wheel::{WheelKind, WheelTrial};
use stimgen::scene::element::Element;
use stimgen::scene::phase::Phase;
use stimgen::scene::project::project;
use stimgen::spatial::grid::Direction;

fn bars_trial(subset: SubsetKind) -> Trial {
    Trial::Bars(BarsTrial {
        subject: 1,
        subset,
        cue_items: 2,
        direction: Direction::Right,
        probe_change: false,
        change_attribute: ChangeAttribute::Color,
    })
}

fn dumbbell_trial() -> Trial {
    Trial::Dumbbell(DumbbellTrial {
        subject: 1,
        condition: BindingCondition::TwoBindingsTwoObjects,
        orientation: Orientation::Horizontal,
        consistency: DumbbellConsistency::Consistent,
    })
}

#[test]
fn bars_memory_scene_holds_grid_and_six_bars() {
    let reconstruction = reconstruct(&bars_trial(SubsetKind::MultiColorMultiOrientation), 3).unwrap();
    let scene = project(&reconstruction.assignment, Phase::Memory).unwrap();
    // A 4×4 lattice outline is 10 lines; each bar is another line
    assert_eq!(scene.elements.len(), 10 + 6);
    assert!(
        scene
            .elements
            .iter()
            .all(|e| matches!(e, Element::Line { .. }))
    );
}

#[test]
fn bars_cue_scene_names_the_direction() {
    let reconstruction = reconstruct(&bars_trial(SubsetKind::SingleColorMultiOrientation), 3).unwrap();
    let scene = project(&reconstruction.assignment, Phase::Cue).unwrap();

    let rings = scene
        .elements
        .iter()
        .filter(|e| matches!(e, Element::Circle { fill: false, .. }))
        .count();
    assert_eq!(rings, 3);

    let label = scene.elements.iter().find_map(|e| match e {
        Element::Text { text, .. } => Some(text.clone()),
        _ => None,
    });
    assert_eq!(label.as_deref(), Some("RIGHT"));
}

#[test]
fn mask_is_independent_of_the_assignment() {
    let first = reconstruct(&bars_trial(SubsetKind::SingleColorMultiOrientation), 3).unwrap();
    let second = reconstruct(&bars_trial(SubsetKind::MultiColorMultiOrientation), 99).unwrap();
    let mask_a = project(&first.assignment, Phase::Mask).unwrap();
    let mask_b = project(&second.assignment, Phase::Mask).unwrap();
    assert_eq!(mask_a, mask_b);
}

#[test]
fn dumbbell_memory_scene_holds_two_objects() {
    let reconstruction = reconstruct(&dumbbell_trial(), 42).unwrap();
    let scene = project(&reconstruction.assignment, Phase::Memory).unwrap();
    // Two connectors plus four end discs
    assert_eq!(scene.elements.len(), 6);

    let cue = project(&reconstruction.assignment, Phase::Cue).unwrap();
    assert_eq!(cue.elements.len(), 2);
    assert!(
        cue.elements
            .iter()
            .all(|e| matches!(e, Element::Circle { fill: false, .. }))
    );
}

#[test]
fn phases_outside_the_family_sequence_are_rejected() {
    let reconstruction = reconstruct(&dumbbell_trial(), 1).unwrap();
    assert!(project(&reconstruction.assignment, Phase::Wheel).is_err());
    assert!(project(&reconstruction.assignment, Phase::Search).is_err());
}

#[test]
fn search_array_has_eight_items_and_markers() {
    let trial = Trial::Search(SearchTrial {
        subject: 1,
        memory_color: 1,
        memory_shape: 6,
        distractor: DistractorCondition::NoSingleton,
        target_orientation: TargetOrientation::Left,
        cue: CueTarget::First,
        probe_condition: ProbeCondition::BothSame,
    });
    let reconstruction = reconstruct(&trial, 12).unwrap();
    let scene = project(&reconstruction.assignment, Phase::Search).unwrap();

    let discs = scene
        .elements
        .iter()
        .filter(|e| matches!(e, Element::Circle { fill: true, .. }))
        .count();
    let markers = scene
        .elements
        .iter()
        .filter(|e| matches!(e, Element::Line { .. }))
        .count();
    assert_eq!(discs, 8);
    // One tilted target line, two crossed lines on each of the others
    assert_eq!(markers, 1 + 7 * 2);
}

#[test]
fn baseline_wheel_trials_project_an_empty_probe() {
    let trial = Trial::Wheel(WheelTrial {
        subject: 1,
        kind: WheelKind::Color,
        memory_index: 77,
        probe_index: None,
    });
    let reconstruction = reconstruct(&trial, 5).unwrap();
    let probe = project(&reconstruction.assignment, Phase::Probe1).unwrap();
    assert!(probe.elements.is_empty());

    let wheel = project(&reconstruction.assignment, Phase::Wheel).unwrap();
    // 360 wedges plus the ring cut-out disc
    assert_eq!(wheel.elements.len(), 361);
}
