//! Card Layout Integration Tests
//!
//! Exercises the engine end to end through the public API:
//! - Pip tables for standard and extended ranks
//! - Corner mirroring as an exact point reflection
//! - Ability text scenarios and fixed-height fitting
//! - Deck export order through the compositor
//! - Wrap and pip invariants under proptest

use deck_core::ability::{
    extract_blocks, layout_ability_panel, split_inline, wrap_segments, BlockKind, InlinePiece,
    PipSuit, SegmentKind, TextSegment,
};
use deck_core::pips::extended_row_counts;
use deck_core::{
    draw_corner, pip_layout, AbilityStyle, CardCompositor, CardMetrics, CardRecord, CardSlot,
    CornerStyle, Deck, Element, FixedAdvance, HeightMode, Layer, OverflowMode, PipAnchors, Point,
    Scene, Settings, Suit,
};
use proptest::prelude::*;

const EPS: f32 = 1e-3;

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
        "expected {b:?}, got {a:?}"
    );
}

fn corner_style(settings: &Settings, suit: Suit) -> CornerStyle {
    settings.corner_style(suit)
}

fn ability_style(settings: &Settings) -> AbilityStyle {
    settings.ability_style()
}

// ============================================================================
// Pip Layout
// ============================================================================

#[test]
fn test_standard_ranks_match_face_value() {
    let anchors = PipAnchors::default();
    for (rank, expected) in [("A", 1), ("2", 2), ("3", 3), ("7", 7), ("10", 10)] {
        let pips = pip_layout(rank, &anchors);
        assert_eq!(pips.len(), expected, "rank {rank}");
        for pip in &pips {
            assert!((0.0..=1.0).contains(&pip.x) && (0.0..=1.0).contains(&pip.y));
            assert_eq!(pip.rotate180, pip.y > anchors.center, "rank {rank}");
        }
    }
}

#[test]
fn test_five_on_default_card() {
    let metrics = CardMetrics::new(825.0, 1125.0, 80.0);
    assert!((metrics.safe_width - 665.0).abs() < EPS);
    assert!((metrics.safe_height - 965.0).abs() < EPS);

    let pips = pip_layout("5", &PipAnchors::default());
    assert_eq!(pips.len(), 5);
    assert_eq!(pips.iter().filter(|p| p.rotate180).count(), 2);
}

#[test]
fn test_extended_ranks_use_five_rows() {
    let anchors = PipAnchors::default();
    for n in 11..=25 {
        let rank = n.to_string();
        let (rows, total) = extended_row_counts(&rank).expect("extended rank");
        assert_eq!(total, n);
        assert_eq!(rows.iter().sum::<usize>(), n);
        assert_eq!(pip_layout(&rank, &anchors).len(), n);
    }
}

#[test]
fn test_unknown_rank_draws_nothing() {
    let settings = Settings::default();
    let measurer = FixedAdvance::default();
    let scene = CardCompositor::new(&settings, &measurer).compose_card(
        "K",
        Suit::Spades,
        &CardRecord::default(),
    );
    assert_eq!(scene.elements_in(Layer::Pips).count(), 0);
    assert!(scene.elements_in(Layer::CornerIndex).count() > 0);
}

// ============================================================================
// Corner Mirroring
// ============================================================================

#[test]
fn test_mirrored_corner_is_point_reflection() {
    let settings = Settings::default();
    let metrics = settings.metrics();
    let measurer = FixedAdvance::default();

    for suit in Suit::ALL {
        let mut scene = Scene::new(metrics.card_width, metrics.card_height);
        draw_corner(
            &mut scene,
            "10",
            suit,
            &metrics,
            &corner_style(&settings, suit),
            &measurer,
            true,
        );
        let elements: Vec<&Element> = scene.elements().collect();
        assert_eq!(elements.len() % 2, 0);
        let (first, second) = elements.split_at(elements.len() / 2);

        for (a, b) in first.iter().zip(second) {
            let p = a.anchor();
            assert_close(
                b.anchor(),
                Point::new(metrics.card_width - p.x, metrics.card_height - p.y),
            );
            let turn = (b.transform.rotation() - a.transform.rotation())
                .rem_euclid(std::f32::consts::TAU);
            assert!((turn - std::f32::consts::PI).abs() < EPS);
        }
    }
}

// ============================================================================
// Ability Text
// ============================================================================

#[test]
fn test_draw_a_card_scenario() {
    let blocks = extract_blocks("Draw a card. ::suit::");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Paragraph);

    let pieces = split_inline(&blocks[0].text);
    assert_eq!(pieces.len(), 2);
    match &pieces[0] {
        InlinePiece::Text(text) => assert_eq!(text.trim_end(), "Draw a card."),
        other => panic!("expected text, got {other:?}"),
    }
    match pieces[1] {
        InlinePiece::Pip(pip) => {
            assert_eq!(pip, PipSuit::Own);
            assert_eq!(pip.resolve(Suit::Hearts), Suit::Hearts);
        }
        ref other => panic!("expected pip, got {other:?}"),
    }
}

#[test]
fn test_fixed_shrink_panel_fits_height() {
    let settings = Settings {
        ability_height_mode: HeightMode::Fixed,
        ability_fixed_height: 120.0,
        ability_overflow: OverflowMode::Shrink,
        ..Settings::default()
    };
    let markdown = "# Power\n\nDraw a card for every ::hearts:: you control. \
                    Then discard two cards and gain a ::spades:: token.\n\n- one\n- two\n- three";
    let layout = layout_ability_panel(
        markdown,
        "7",
        Suit::Hearts,
        &settings.metrics(),
        &ability_style(&settings),
        &FixedAdvance::default(),
    )
    .expect("panel");

    assert!(layout.natural_height > 120.0);
    assert!(layout.geometry.h <= 120.0 + EPS);
    assert!(layout.natural_height * layout.geometry.scale <= 120.0 + EPS);
}

#[test]
fn test_mirrored_ability_panel() {
    let settings = Settings {
        ability_mirror: true,
        ..Settings::default()
    };
    let measurer = FixedAdvance::default();
    let card = CardRecord {
        ability_markdown: "Gain ::suit::".to_string(),
        ..CardRecord::default()
    };
    let scene = CardCompositor::new(&settings, &measurer).compose_card("3", Suit::Clubs, &card);
    let icons: Vec<&Element> = scene
        .elements_in(Layer::AbilityText)
        .filter(|e| e.icon_suit().is_some())
        .collect();
    assert_eq!(icons.len(), 2);
    let p = icons[0].anchor();
    assert_close(icons[1].anchor(), Point::new(825.0 - p.x, 1125.0 - p.y));
}

// ============================================================================
// Deck Export
// ============================================================================

#[test]
fn test_every_slot_composes() {
    let settings = Settings {
        custom_ranks_string: "A, 2, 2, 13".to_string(),
        include_jokers: true,
        joker_count: 1,
        ..Settings::default()
    };
    let deck = Deck::from_settings(&settings);
    let measurer = FixedAdvance::default();
    let compositor = CardCompositor::new(&settings, &measurer);

    let slots = deck.export_list();
    assert_eq!(slots.len(), 4 * 4 + 1);
    for slot in &slots {
        let scene = compositor.compose_slot(&deck, slot).expect("slot in deck");
        assert_eq!(scene.layer_order().first(), Some(&Layer::Background));
    }

    let names: Vec<String> = slots
        .iter()
        .map(|s| s.file_name(&settings.joker_label, deck.joker_count(), "png"))
        .collect();
    assert!(names.contains(&"2H_2.png".to_string()));
    assert!(names.contains(&"13D.png".to_string()));
    assert_eq!(names.last().map(String::as_str), Some("JOKER.png"));
    assert_eq!(slots[0], CardSlot::standard(Suit::Spades, "A"));
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_segment() -> impl Strategy<Value = TextSegment> {
    prop_oneof![
        (1.0f32..80.0).prop_map(|width| TextSegment {
            kind: SegmentKind::Text,
            width,
            text: Some("w".to_string()),
            suit: None,
        }),
        (1.0f32..10.0).prop_map(|width| TextSegment {
            kind: SegmentKind::Space,
            width,
            text: Some(" ".to_string()),
            suit: None,
        }),
        (5.0f32..40.0).prop_map(|width| TextSegment {
            kind: SegmentKind::Pip,
            width,
            text: None,
            suit: Some(Suit::Diamonds),
        }),
    ]
}

proptest! {
    #[test]
    fn prop_wrap_respects_max_width(
        segments in prop::collection::vec(arb_segment(), 0..60),
        max_width in 20.0f32..300.0
    ) {
        let lines = wrap_segments(&segments, max_width);
        for line in &lines {
            prop_assert!(!line.segments.is_empty());
            prop_assert!(
                line.width <= max_width + EPS || line.segments.len() == 1,
                "line width {} exceeds {} with {} segments",
                line.width, max_width, line.segments.len()
            );
            prop_assert!(!line.segments[0].is_space());
            prop_assert!(!line.segments[line.segments.len() - 1].is_space());
        }

        let pips_in = segments.iter().filter(|s| s.kind == SegmentKind::Pip).count();
        let pips_out: usize = lines
            .iter()
            .map(|l| l.segments.iter().filter(|s| s.kind == SegmentKind::Pip).count())
            .sum();
        prop_assert_eq!(pips_in, pips_out);
    }

    #[test]
    fn prop_pips_stay_in_safe_area(n in 1usize..40) {
        let anchors = PipAnchors::default();
        let rank = n.to_string();
        let pips = pip_layout(&rank, &anchors);
        prop_assert!(!pips.is_empty());
        prop_assert!(pips.len() <= 25);
        for pip in &pips {
            prop_assert!((0.0..=1.0).contains(&pip.x));
            prop_assert!((0.0..=1.0).contains(&pip.y));
            prop_assert_eq!(pip.rotate180, pip.y > anchors.center);
        }
    }
}
